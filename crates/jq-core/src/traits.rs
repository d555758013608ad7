//! Core traits shared by the entities the navigator core looks up
//!
//! Entities reach this layer already persisted, so identifiers are never optional.

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;

    /// Id as it travels through navigator form values
    fn id_string(&self) -> String {
        self.id().to_string()
    }
}

/// Trait for entities with a display name that JQL literals can refer to
pub trait Named {
    fn name(&self) -> &str;

    /// Case-insensitive name comparison, the way JQL matches names
    fn name_matches(&self, candidate: &str) -> bool {
        self.name().eq_ignore_ascii_case(candidate.trim())
    }
}

/// Parse a navigator form value as an id
///
/// Malformed input is not an error at this layer; callers fall back to the raw string.
pub fn parse_id(value: &str) -> Option<Id> {
    value.trim().parse::<Id>().ok()
}
