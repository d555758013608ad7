//! Query Model
//!
//! A Query is an optional where-clause tree plus the JQL text it was parsed from, if any.
//! Parsing itself happens elsewhere; this crate only carries the result.

use serde::{Deserialize, Serialize};

use crate::clause::Clause;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Boolean root; `None` matches everything
    pub where_clause: Option<Clause>,

    /// Raw JQL text, when the query came from text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
}

impl Query {
    pub fn new(where_clause: Clause) -> Self {
        Self {
            where_clause: Some(where_clause),
            query_string: None,
        }
    }

    /// Query without any clause
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_query_string(mut self, text: impl Into<String>) -> Self {
        self.query_string = Some(text.into());
        self
    }

    pub fn has_where_clause(&self) -> bool {
        self.where_clause.is_some()
    }

    /// JQL text: the original text if present, otherwise rendered from the tree
    pub fn jql(&self) -> String {
        match (&self.query_string, &self.where_clause) {
            (Some(text), _) => text.clone(),
            (None, Some(clause)) => clause.to_string(),
            (None, None) => String::new(),
        }
    }
}

impl From<Clause> for Query {
    fn from(clause: Clause) -> Self {
        Self::new(clause)
    }
}
