//! Version, group and clause name collaborators

use parking_lot::RwLock;
use std::collections::HashMap;

use jq_core::{Group, Id, Named, SearchResult, User, Version};
use jq_query::names::is_system_name;

/// Looks up versions
pub trait VersionResolver: Send + Sync {
    fn by_id(&self, id: Id) -> SearchResult<Option<Version>>;

    /// Versions whose name matches, case-insensitively, in any project
    fn versions_for_name(&self, name: &str) -> SearchResult<Vec<Version>>;
}

/// Looks up groups
pub trait GroupResolver: Send + Sync {
    /// Group whose name matches, case-insensitively
    fn by_name(&self, name: &str) -> SearchResult<Option<Group>>;
}

/// Chooses the clause name written into generated clauses
pub trait ClauseNameResolver: Send + Sync {
    /// The field name when it unambiguously names one field for this user, else `primary`
    fn unique_clause_name(&self, user: Option<&User>, primary: &str, field_name: &str) -> String;
}

#[derive(Default)]
pub struct MemoryVersionResolver {
    versions: RwLock<Vec<Version>>,
}

impl MemoryVersionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(versions: impl IntoIterator<Item = Version>) -> Self {
        let resolver = Self::new();
        resolver.versions.write().extend(versions);
        resolver
    }

    pub fn add(&self, version: Version) {
        self.versions.write().push(version);
    }
}

impl VersionResolver for MemoryVersionResolver {
    fn by_id(&self, id: Id) -> SearchResult<Option<Version>> {
        Ok(self.versions.read().iter().find(|v| v.id == id).cloned())
    }

    fn versions_for_name(&self, name: &str) -> SearchResult<Vec<Version>> {
        Ok(self
            .versions
            .read()
            .iter()
            .filter(|v| v.name_matches(name))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryGroupResolver {
    groups: RwLock<Vec<Group>>,
}

impl MemoryGroupResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_groups<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let resolver = Self::new();
        resolver
            .groups
            .write()
            .extend(names.into_iter().map(Group::new));
        resolver
    }
}

impl GroupResolver for MemoryGroupResolver {
    fn by_name(&self, name: &str) -> SearchResult<Option<Group>> {
        Ok(self.groups.read().iter().find(|g| g.name_matches(name)).cloned())
    }
}

/// Counts field names; a name registered once is unique
#[derive(Default)]
pub struct MemoryClauseNameResolver {
    field_names: RwLock<HashMap<String, usize>>,
}

impl MemoryClauseNameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_field(&self, field_name: &str) {
        *self
            .field_names
            .write()
            .entry(field_name.trim().to_lowercase())
            .or_default() += 1;
    }
}

impl ClauseNameResolver for MemoryClauseNameResolver {
    fn unique_clause_name(&self, _user: Option<&User>, primary: &str, field_name: &str) -> String {
        let name = field_name.trim();
        if name.is_empty() || is_system_name(name) {
            return primary.to_string();
        }
        let count = self
            .field_names
            .read()
            .get(&name.to_lowercase())
            .copied()
            .unwrap_or(0);
        if count == 1 {
            name.to_string()
        } else {
            primary.to_string()
        }
    }
}
