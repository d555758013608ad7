//! Clause names
//!
//! A field answers to a primary clause name plus aliases. Custom fields always answer to
//! `cf[<id>]` and usually to their display name as well.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use jq_core::Id;

static CUSTOM_FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*cf\[(\d+)\]\s*$").unwrap());

static BARE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.\-]+|cf\[\d+\])$").unwrap());

const RESERVED_WORDS: &[&str] = &[
    "and", "or", "not", "empty", "null", "in", "is", "was", "changed", "order", "by",
];

/// System clause names
pub mod system {
    pub const PROJECT: &str = "project";
    pub const ISSUE_TYPE: &str = "issuetype";
    pub const ISSUE_TYPE_ALIAS: &str = "type";
}

/// The set of names a field can be referred to by in a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseNames {
    primary: String,
    names: BTreeSet<String>,
}

impl ClauseNames {
    pub fn new(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        let mut names = BTreeSet::new();
        names.insert(primary.to_lowercase());
        Self { primary, names }
    }

    pub fn with_alias(mut self, alias: impl AsRef<str>) -> Self {
        self.names.insert(alias.as_ref().to_lowercase());
        self
    }

    /// Names for the first entry as primary, the rest as aliases
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        let (first, rest) = names.split_first()?;
        Some(
            rest.iter()
                .fold(Self::new(first.as_ref()), |acc, alias| acc.with_alias(alias)),
        )
    }

    /// `cf[<id>]` plus the field's display name
    pub fn custom_field(id: Id, field_name: &str) -> Self {
        let names = Self::new(format!("cf[{id}]"));
        if field_name.trim().is_empty() {
            names
        } else {
            names.with_alias(field_name.trim())
        }
    }

    pub fn project() -> Self {
        Self::new(system::PROJECT)
    }

    pub fn issue_type() -> Self {
        Self::new(system::ISSUE_TYPE).with_alias(system::ISSUE_TYPE_ALIAS)
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Merge two name sets, keeping this primary
    pub fn merge(mut self, other: &ClauseNames) -> Self {
        self.names.extend(other.names.iter().cloned());
        self
    }
}

/// Parse the custom field id out of a `cf[<id>]` clause name
pub fn custom_field_id(clause_name: &str) -> Option<Id> {
    CUSTOM_FIELD_NAME
        .captures(clause_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

pub fn is_system_name(name: &str) -> bool {
    let name = name.trim();
    [system::PROJECT, system::ISSUE_TYPE, system::ISSUE_TYPE_ALIAS]
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

/// Quote a name or value for JQL text when it is not a plain word
pub fn quote_if_needed(value: &str) -> Cow<'_, str> {
    let reserved = RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(value));
    if !reserved && BARE_WORD.is_match(value) {
        Cow::Borrowed(value)
    } else {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        Cow::Owned(format!("\"{escaped}\""))
    }
}
