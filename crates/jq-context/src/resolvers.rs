//! Project and issue type resolvers
//!
//! Lookup contracts used by the context factories, with in-memory implementations.

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use jq_core::{Id, IssueType, Named, Project, SearchError, SearchResult, User};

/// Looks up projects
pub trait ProjectResolver: Send + Sync {
    fn by_id(&self, id: Id) -> SearchResult<Option<Project>>;

    /// Ids of projects whose key or name matches, case-insensitively
    fn ids_for_name(&self, name: &str) -> SearchResult<Vec<Id>>;

    /// Projects the user may browse
    fn visible_projects(&self, user: Option<&User>) -> SearchResult<Vec<Project>>;
}

/// Looks up issue types
pub trait IssueTypeResolver: Send + Sync {
    fn by_id(&self, id: &str) -> SearchResult<Option<IssueType>>;

    fn ids_for_name(&self, name: &str) -> SearchResult<Vec<String>>;

    fn all_issue_types(&self) -> SearchResult<Vec<IssueType>>;
}

/// In-memory project resolver
///
/// Every project is visible unless visibility was restricted for the user.
pub struct MemoryProjectResolver {
    projects: RwLock<Vec<Project>>,
    visibility: RwLock<HashMap<Option<Id>, BTreeSet<Id>>>,
    failure: RwLock<Option<String>>,
}

impl Default for MemoryProjectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProjectResolver {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
            visibility: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
        }
    }

    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let resolver = Self::new();
        resolver.projects.write().extend(projects);
        resolver
    }

    pub fn add(&self, project: Project) {
        self.projects.write().push(project);
    }

    /// Limit the projects `user` can see; `None` is the anonymous user
    pub fn restrict(&self, user: Option<&User>, project_ids: impl IntoIterator<Item = Id>) {
        self.visibility
            .write()
            .insert(user.map(|u| u.id), project_ids.into_iter().collect());
    }

    /// Make every call fail, as a broken backing store would
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    fn check(&self) -> SearchResult<()> {
        match self.failure.read().as_ref() {
            Some(message) => Err(SearchError::collaborator("project-resolver", message.clone())),
            None => Ok(()),
        }
    }
}

impl ProjectResolver for MemoryProjectResolver {
    fn by_id(&self, id: Id) -> SearchResult<Option<Project>> {
        self.check()?;
        Ok(self.projects.read().iter().find(|p| p.id == id).cloned())
    }

    fn ids_for_name(&self, name: &str) -> SearchResult<Vec<Id>> {
        self.check()?;
        Ok(self
            .projects
            .read()
            .iter()
            .filter(|p| p.matches_key_or_name(name))
            .map(|p| p.id)
            .collect())
    }

    fn visible_projects(&self, user: Option<&User>) -> SearchResult<Vec<Project>> {
        self.check()?;
        let visibility = self.visibility.read();
        let allowed = visibility.get(&user.map(|u| u.id));
        Ok(self
            .projects
            .read()
            .iter()
            .filter(|p| allowed.map_or(true, |ids| ids.contains(&p.id)))
            .cloned()
            .collect())
    }
}

/// In-memory issue type resolver
pub struct MemoryIssueTypeResolver {
    issue_types: RwLock<Vec<IssueType>>,
}

impl Default for MemoryIssueTypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIssueTypeResolver {
    pub fn new() -> Self {
        Self {
            issue_types: RwLock::new(Vec::new()),
        }
    }

    pub fn with_issue_types(issue_types: impl IntoIterator<Item = IssueType>) -> Self {
        let resolver = Self::new();
        resolver.issue_types.write().extend(issue_types);
        resolver
    }

    pub fn add(&self, issue_type: IssueType) {
        self.issue_types.write().push(issue_type);
    }
}

impl IssueTypeResolver for MemoryIssueTypeResolver {
    fn by_id(&self, id: &str) -> SearchResult<Option<IssueType>> {
        Ok(self.issue_types.read().iter().find(|t| t.id == id).cloned())
    }

    fn ids_for_name(&self, name: &str) -> SearchResult<Vec<String>> {
        Ok(self
            .issue_types
            .read()
            .iter()
            .filter(|t| t.name_matches(name))
            .map(|t| t.id.clone())
            .collect())
    }

    fn all_issue_types(&self) -> SearchResult<Vec<IssueType>> {
        Ok(self.issue_types.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> MemoryProjectResolver {
        MemoryProjectResolver::with_projects([
            Project::new(10, "HSP", "Homosapien"),
            Project::new(20, "MKY", "Monkey"),
        ])
    }

    #[test]
    fn test_project_lookup() {
        let resolver = resolver();
        assert_eq!(resolver.by_id(10).unwrap().map(|p| p.key), Some("HSP".to_string()));
        assert_eq!(resolver.by_id(99).unwrap(), None);
        assert_eq!(resolver.ids_for_name("monkey").unwrap(), vec![20]);
        assert_eq!(resolver.ids_for_name("hsp").unwrap(), vec![10]);
        assert!(resolver.ids_for_name("nope").unwrap().is_empty());
    }

    #[test]
    fn test_visibility_restriction() {
        let resolver = resolver();
        let fred = User::new(1, "fred");
        assert_eq!(resolver.visible_projects(Some(&fred)).unwrap().len(), 2);

        resolver.restrict(Some(&fred), [20]);
        let visible = resolver.visible_projects(Some(&fred)).unwrap();
        assert_eq!(visible.iter().map(|p| p.id).collect::<Vec<_>>(), vec![20]);
        assert_eq!(resolver.visible_projects(None).unwrap().len(), 2);
    }

    #[test]
    fn test_failure_is_collaborator_error() {
        let resolver = resolver();
        resolver.fail_with("database down");
        let err = resolver.by_id(10).unwrap_err();
        assert!(err.is_collaborator_fault());
    }

    #[test]
    fn test_issue_type_lookup() {
        let resolver = MemoryIssueTypeResolver::with_issue_types([
            IssueType::new("1", "Bug"),
            IssueType::new("2", "Task"),
        ]);
        assert_eq!(resolver.ids_for_name("bug").unwrap(), vec!["1".to_string()]);
        assert_eq!(resolver.by_id("2").unwrap().map(|t| t.name), Some("Task".to_string()));
        assert_eq!(resolver.all_issue_types().unwrap().len(), 2);
    }
}
