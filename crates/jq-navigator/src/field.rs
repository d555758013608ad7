//! Custom field descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

use jq_core::Id;
use jq_query::ClauseNames;

/// The closed set of field types the navigator form supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Select,
    MultiSelect,
    Cascading,
    Group,
    Project,
    Version,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Select,
        FieldType::MultiSelect,
        FieldType::Cascading,
        FieldType::Group,
        FieldType::Project,
        FieldType::Version,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "select" => Some(Self::Select),
            "multiselect" | "multi_select" => Some(Self::MultiSelect),
            "cascadingselect" | "cascading" => Some(Self::Cascading),
            "group" | "multigroup" => Some(Self::Group),
            "project" => Some(Self::Project),
            "version" | "multiversion" => Some(Self::Version),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Cascading => "cascading",
            Self::Group => "group",
            Self::Project => "project",
            Self::Version => "version",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom field as the navigator sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomField {
    pub id: Id,
    pub name: String,
    pub field_type: FieldType,
    pub clause_names: ClauseNames,
}

impl CustomField {
    pub fn new(id: Id, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let clause_names = ClauseNames::custom_field(id, &name);
        Self {
            id,
            name,
            field_type,
            clause_names,
        }
    }

    /// `cf[<id>]`
    pub fn primary_clause_name(&self) -> &str {
        self.clause_names.primary()
    }
}
