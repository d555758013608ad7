//! Scope pairs and clause contexts
//!
//! `All` on either side is the wildcard. The global context is the single pair `(All, All)`;
//! the empty context matches nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use jq_core::Id;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectScope {
    All,
    Id(Id),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTypeScope {
    All,
    Id(String),
}

impl ProjectScope {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn id(&self) -> Option<Id> {
        match self {
            Self::All => None,
            Self::Id(id) => Some(*id),
        }
    }

    /// All ∩ x = x, x ∩ x = x, otherwise nothing
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::All, x) | (x, Self::All) => Some(x.clone()),
            (Self::Id(a), Self::Id(b)) if a == b => Some(self.clone()),
            _ => None,
        }
    }
}

impl IssueTypeScope {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Id(id) => Some(id),
        }
    }

    pub fn intersect(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::All, x) | (x, Self::All) => Some(x.clone()),
            (Self::Id(a), Self::Id(b)) if a == b => Some(self.clone()),
            _ => None,
        }
    }
}

/// One (project, issue type) combination a query may match
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopePair {
    pub project: ProjectScope,
    pub issue_type: IssueTypeScope,
}

impl ScopePair {
    pub fn new(project: ProjectScope, issue_type: IssueTypeScope) -> Self {
        Self {
            project,
            issue_type,
        }
    }

    pub fn global() -> Self {
        Self::new(ProjectScope::All, IssueTypeScope::All)
    }

    /// A project with all of its issue types
    pub fn project(id: Id) -> Self {
        Self::new(ProjectScope::Id(id), IssueTypeScope::All)
    }

    /// An issue type in all projects
    pub fn issue_type(id: impl Into<String>) -> Self {
        Self::new(ProjectScope::All, IssueTypeScope::Id(id.into()))
    }

    pub fn is_global(&self) -> bool {
        self.project.is_all() && self.issue_type.is_all()
    }

    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Some(Self::new(
            self.project.intersect(&other.project)?,
            self.issue_type.intersect(&other.issue_type)?,
        ))
    }
}

impl fmt::Display for ScopePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let project = match &self.project {
            ProjectScope::All => "*".to_string(),
            ProjectScope::Id(id) => id.to_string(),
        };
        let issue_type = self.issue_type.id().unwrap_or("*");
        write!(f, "({project}, {issue_type})")
    }
}

/// Set of scope pairs; iteration order carries no meaning
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClauseContext {
    pairs: BTreeSet<ScopePair>,
}

impl ClauseContext {
    pub fn new(pairs: impl IntoIterator<Item = ScopePair>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    /// All projects and all issue types
    pub fn global() -> Self {
        Self::new([ScopePair::global()])
    }

    /// Matches nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn projects(ids: impl IntoIterator<Item = Id>) -> Self {
        Self::new(ids.into_iter().map(ScopePair::project))
    }

    pub fn issue_types<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(ids.into_iter().map(ScopePair::issue_type))
    }

    pub fn is_global(&self) -> bool {
        self.pairs.iter().any(ScopePair::is_global)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn contains(&self, pair: &ScopePair) -> bool {
        self.pairs.contains(pair)
    }

    pub fn pairs(&self) -> impl Iterator<Item = &ScopePair> {
        self.pairs.iter()
    }

    /// Explicit project ids named by the context
    pub fn project_ids(&self) -> BTreeSet<Id> {
        self.pairs.iter().filter_map(|p| p.project.id()).collect()
    }

    /// Explicit issue type ids named by the context
    pub fn issue_type_ids(&self) -> BTreeSet<String> {
        self.pairs
            .iter()
            .filter_map(|p| p.issue_type.id().map(str::to_string))
            .collect()
    }

    pub(crate) fn into_pairs(self) -> BTreeSet<ScopePair> {
        self.pairs
    }
}

impl FromIterator<ScopePair> for ClauseContext {
    fn from_iter<T: IntoIterator<Item = ScopePair>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for ClauseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.pairs.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_intersection() {
        let all = ProjectScope::All;
        let ten = ProjectScope::Id(10);
        let twenty = ProjectScope::Id(20);

        assert_eq!(all.intersect(&ten), Some(ten.clone()));
        assert_eq!(ten.intersect(&all), Some(ten.clone()));
        assert_eq!(ten.intersect(&ten), Some(ten.clone()));
        assert_eq!(ten.intersect(&twenty), None);
        assert_eq!(
            IssueTypeScope::Id("1".into()).intersect(&IssueTypeScope::Id("2".into())),
            None
        );
    }

    #[test]
    fn test_pair_intersection() {
        let project = ScopePair::project(10);
        let bug = ScopePair::issue_type("1");
        assert_eq!(
            project.intersect(&bug),
            Some(ScopePair::new(ProjectScope::Id(10), IssueTypeScope::Id("1".into())))
        );
        assert_eq!(project.intersect(&ScopePair::project(20)), None);
        assert_eq!(ScopePair::global().intersect(&bug), Some(bug));
    }

    #[test]
    fn test_global_and_empty_differ() {
        assert!(ClauseContext::global().is_global());
        assert!(!ClauseContext::global().is_empty());
        assert!(ClauseContext::empty().is_empty());
        assert!(!ClauseContext::empty().is_global());
    }

    #[test]
    fn test_explicit_ids() {
        let context = ClauseContext::new([
            ScopePair::project(10),
            ScopePair::new(ProjectScope::Id(20), IssueTypeScope::Id("3".into())),
            ScopePair::issue_type("4"),
        ]);
        assert_eq!(context.project_ids(), BTreeSet::from([10, 20]));
        assert_eq!(
            context.issue_type_ids(),
            BTreeSet::from(["3".to_string(), "4".to_string()])
        );
        assert_eq!(context.to_string(), "{(*, 4), (10, *), (20, 3)}");
    }
}
