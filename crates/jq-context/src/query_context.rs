//! Query context and search context
//!
//! A [`QueryContext`] is what the resolver returns for a query. A [`SearchContext`] is the
//! project / issue type selection of the navigator form, which reconcilers use to scope option
//! lookups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use jq_core::Id;

use crate::scope::{ClauseContext, IssueTypeScope, ProjectScope, ScopePair};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryContext {
    context: ClauseContext,
}

impl QueryContext {
    pub fn new(context: ClauseContext) -> Self {
        Self { context }
    }

    pub fn global() -> Self {
        Self::new(ClauseContext::global())
    }

    pub fn clause_context(&self) -> &ClauseContext {
        &self.context
    }

    pub fn is_global(&self) -> bool {
        self.context.is_global()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ScopePair> {
        self.context.pairs()
    }

    pub fn project_ids(&self) -> BTreeSet<Id> {
        self.context.project_ids()
    }

    pub fn issue_type_ids(&self) -> BTreeSet<String> {
        self.context.issue_type_ids()
    }

    /// True when any pair of this context admits the given project and issue type
    pub fn admits(&self, project_id: Id, issue_type_id: &str) -> bool {
        self.context.pairs().any(|pair| {
            let project_ok = match &pair.project {
                ProjectScope::All => true,
                ProjectScope::Id(id) => *id == project_id,
            };
            let type_ok = match &pair.issue_type {
                IssueTypeScope::All => true,
                IssueTypeScope::Id(id) => id == issue_type_id,
            };
            project_ok && type_ok
        })
    }
}

impl From<ClauseContext> for QueryContext {
    fn from(context: ClauseContext) -> Self {
        Self::new(context)
    }
}

/// Project and issue type selection of the navigator form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchContext {
    #[serde(default)]
    pub project_ids: Vec<Id>,
    #[serde(default)]
    pub issue_type_ids: Vec<String>,
}

impl SearchContext {
    pub fn new(project_ids: Vec<Id>, issue_type_ids: Vec<String>) -> Self {
        Self {
            project_ids,
            issue_type_ids,
        }
    }

    /// Nothing selected: every project, every issue type
    pub fn global() -> Self {
        Self::default()
    }

    pub fn for_project(project_id: Id) -> Self {
        Self::new(vec![project_id], Vec::new())
    }

    /// The single selected project, if exactly one is selected
    pub fn single_project(&self) -> Option<Id> {
        match self.project_ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Cross product of the selections; an empty side stands for All
    pub fn to_query_context(&self) -> QueryContext {
        let projects: Vec<ProjectScope> = if self.project_ids.is_empty() {
            vec![ProjectScope::All]
        } else {
            self.project_ids.iter().copied().map(ProjectScope::Id).collect()
        };
        let issue_types: Vec<IssueTypeScope> = if self.issue_type_ids.is_empty() {
            vec![IssueTypeScope::All]
        } else {
            self.issue_type_ids
                .iter()
                .cloned()
                .map(IssueTypeScope::Id)
                .collect()
        };

        let pairs = projects.iter().flat_map(|project| {
            issue_types
                .iter()
                .map(move |issue_type| ScopePair::new(project.clone(), issue_type.clone()))
        });
        QueryContext::new(ClauseContext::new(pairs))
    }
}
