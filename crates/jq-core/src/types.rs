//! Domain entities consumed by the navigator core
//!
//! These are read-only views handed out by collaborators. The core never creates or mutates
//! the underlying records.

use serde::{Deserialize, Serialize};

use crate::traits::{Id, Identifiable, Named};

/// The acting user; needed to resolve visible projects and per-user clause names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub login: String,
    pub active: bool,
}

impl User {
    pub fn new(id: Id, login: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            active: true,
        }
    }
}

impl Identifiable for User {
    fn id(&self) -> Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub key: String,
    pub name: String,
}

impl Project {
    pub fn new(id: Id, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
        }
    }

    /// JQL accepts either the key or the name of a project
    pub fn matches_key_or_name(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        self.key.eq_ignore_ascii_case(candidate) || self.name.eq_ignore_ascii_case(candidate)
    }
}

impl Identifiable for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Issue types carry string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

impl IssueType {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subtask: false,
        }
    }
}

impl Named for IssueType {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub id: Id,
    pub project_id: Id,
    pub name: String,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Version {
    pub fn new(id: Id, project_id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            project_id,
            name: name.into(),
            released: false,
            archived: false,
        }
    }

    pub fn released(mut self) -> Self {
        self.released = true;
        self
    }
}

impl Identifiable for Version {
    fn id(&self) -> Id {
        self.id
    }
}

impl Named for Version {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Back-reference from a child option to its parent
///
/// A parent reference carries no parent of its own: option hierarchies are two levels deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentOption {
    pub id: Id,
    pub value: String,
}

/// A select-list vocabulary entry owned by field configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: Id,
    pub value: String,
    pub parent: Option<ParentOption>,
    #[serde(default)]
    pub disabled: bool,
}

impl FieldOption {
    pub fn new(id: Id, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            parent: None,
            disabled: false,
        }
    }

    /// Child option below `parent`; the parent must itself be a top-level option
    pub fn child_of(id: Id, value: impl Into<String>, parent: &FieldOption) -> Self {
        Self {
            id,
            value: value.into(),
            parent: Some(ParentOption {
                id: parent.id,
                value: parent.value.clone(),
            }),
            disabled: false,
        }
    }

    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    pub fn parent_id(&self) -> Option<Id> {
        self.parent.as_ref().map(|p| p.id)
    }
}

impl Identifiable for FieldOption {
    fn id(&self) -> Id {
        self.id
    }
}
