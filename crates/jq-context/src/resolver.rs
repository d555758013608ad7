//! Query context resolution
//!
//! The simple context only trusts project and issue-type clauses that are plain conjuncts of the
//! query. The full context walks the whole tree. Both fall back to the global context rather
//! than narrowing scope on anything they cannot interpret.

use std::sync::Arc;

use tracing::{debug, instrument};

use jq_core::config::ContextConfig;
use jq_core::{SearchConfig, SearchError, SearchResult, User};
use jq_query::{ClauseNames, NavigatorCollector, OperandResolver, Query};

use crate::factory::{IssueTypeClauseContextFactory, ProjectClauseContextFactory};
use crate::query_context::QueryContext;
use crate::resolvers::{IssueTypeResolver, ProjectResolver};
use crate::scope::ClauseContext;
use crate::set_ops;
use crate::visitor::{ContextFactories, FullContextVisitor};

/// Both fidelities for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextResult {
    pub full: QueryContext,
    pub simple: QueryContext,
}

pub struct ContextResolver {
    factories: ContextFactories,
    navigator_names: ClauseNames,
    config: ContextConfig,
}

impl ContextResolver {
    /// Resolver with the project and issue type factories
    pub fn new(
        operand_resolver: Arc<dyn OperandResolver>,
        projects: Arc<dyn ProjectResolver>,
        issue_types: Arc<dyn IssueTypeResolver>,
        config: &SearchConfig,
    ) -> SearchResult<Self> {
        let project_names = ClauseNames::from_names(&config.context.project_clause_names)
            .ok_or_else(|| SearchError::Config("no project clause names configured".to_string()))?;

        let mut factories = ContextFactories::new().with(
            project_names,
            Arc::new(ProjectClauseContextFactory::new(
                operand_resolver.clone(),
                projects,
            )),
        );
        if let Some(issue_type_names) = ClauseNames::from_names(&config.context.issue_type_clause_names) {
            factories = factories.with(
                issue_type_names,
                Arc::new(IssueTypeClauseContextFactory::new(operand_resolver, issue_types)),
            );
        }

        Self::with_factories(factories, config.context.clone())
    }

    /// Resolver over an explicit factory registry
    pub fn with_factories(factories: ContextFactories, config: ContextConfig) -> SearchResult<Self> {
        let navigator_names = factories
            .clause_names()
            .ok_or_else(|| SearchError::Config("no clause context factories registered".to_string()))?;
        Ok(Self {
            factories,
            navigator_names,
            config,
        })
    }

    /// Context implied by the whole boolean tree
    #[instrument(level = "debug", skip_all)]
    pub fn full_context(&self, user: Option<&User>, query: &Query) -> SearchResult<QueryContext> {
        let Some(clause) = &query.where_clause else {
            return Ok(QueryContext::global());
        };
        let context = clause.accept(&mut FullContextVisitor::new(user, &self.factories))?;
        Ok(self.finish(context, "full"))
    }

    /// Context implied by top-level conjuncts only
    #[instrument(level = "debug", skip_all)]
    pub fn simple_context(&self, user: Option<&User>, query: &Query) -> SearchResult<QueryContext> {
        if query.where_clause.is_none() {
            return Ok(QueryContext::global());
        }

        let collector = NavigatorCollector::collect(&self.navigator_names, query);
        if !collector.is_valid() {
            debug!("scope clauses below OR/NOT, simple context is global");
            return Ok(QueryContext::global());
        }
        if collector.clauses().is_empty() {
            return Ok(QueryContext::global());
        }

        let mut contexts = Vec::with_capacity(collector.clauses().len());
        for clause in collector.clauses() {
            let context = match self.factories.factory_for(&clause.name) {
                Some(factory) => factory.clause_context(user, clause)?,
                None => ClauseContext::global(),
            };
            contexts.push(context);
        }
        Ok(self.finish(set_ops::intersect(&contexts), "simple"))
    }

    /// Full and simple context together
    pub fn contexts(&self, user: Option<&User>, query: &Query) -> SearchResult<ContextResult> {
        Ok(ContextResult {
            full: self.full_context(user, query)?,
            simple: self.simple_context(user, query)?,
        })
    }

    fn finish(&self, context: ClauseContext, fidelity: &'static str) -> QueryContext {
        if context.is_empty() && self.config.widen_empty {
            debug!(fidelity, "context matches nothing, widening to global");
            return QueryContext::global();
        }
        debug!(fidelity, context = %context, "resolved query context");
        QueryContext::new(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::{MemoryIssueTypeResolver, MemoryProjectResolver};
    use crate::scope::{IssueTypeScope, ProjectScope, ScopePair};
    use jq_core::{IssueType, Project};
    use jq_query::{Clause, JqlClauseBuilder, LiteralOperandResolver, Operand, Operator};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_resolver_is_send_and_sync() {
        assert_send_sync::<ContextResolver>();
        assert_send_sync::<ContextResult>();
    }

    fn resolver_with(config: &SearchConfig) -> ContextResolver {
        ContextResolver::new(
            Arc::new(LiteralOperandResolver::new()),
            Arc::new(MemoryProjectResolver::with_projects([
                Project::new(10, "HSP", "Homosapien"),
                Project::new(20, "MKY", "Monkey"),
            ])),
            Arc::new(MemoryIssueTypeResolver::with_issue_types([
                IssueType::new("1", "Bug"),
                IssueType::new("2", "Task"),
            ])),
            config,
        )
        .unwrap()
    }

    fn resolver() -> ContextResolver {
        resolver_with(&SearchConfig::default())
    }

    fn eq(name: &str, value: &str) -> Clause {
        Clause::terminal(name, Operator::Equals, Operand::string(value))
    }

    fn pair(project: i64, issue_type: &str) -> ScopePair {
        ScopePair::new(ProjectScope::Id(project), IssueTypeScope::Id(issue_type.to_string()))
    }

    #[test]
    fn test_no_clauses_is_global() {
        let resolver = resolver();
        let result = resolver.contexts(None, &Query::empty()).unwrap();
        assert!(result.full.is_global());
        assert!(result.simple.is_global());

        let query = Query::new(eq("status", "Open"));
        let result = resolver.contexts(None, &query).unwrap();
        assert_eq!(result.full, QueryContext::global());
        assert_eq!(result.simple, QueryContext::global());
    }

    #[test]
    fn test_conjunction_is_cross_product() {
        let query = JqlClauseBuilder::new()
            .project(["HSP", "MKY"])
            .issue_type(["Bug"])
            .build_query();
        let result = resolver().contexts(None, &query).unwrap();

        let expected = QueryContext::new(ClauseContext::new([pair(10, "1"), pair(20, "1")]));
        assert_eq!(result.full, expected);
        assert_eq!(result.simple, expected);
    }

    #[test]
    fn test_project_only_covers_all_issue_types() {
        let query = Query::new(eq("project", "HSP"));
        let context = resolver().full_context(None, &query).unwrap();
        assert_eq!(context, QueryContext::new(ClauseContext::projects([10])));
    }

    #[test]
    fn test_issue_type_only_covers_all_projects() {
        let query = Query::new(eq("type", "Task"));
        let context = resolver().simple_context(None, &query).unwrap();
        assert_eq!(context, QueryContext::new(ClauseContext::issue_types(["2"])));
    }

    #[test]
    fn test_disjunction_only_counts_in_full_context() {
        let query = Query::new(Clause::or(vec![eq("project", "HSP"), eq("project", "MKY")]));
        let result = resolver().contexts(None, &query).unwrap();
        assert_eq!(result.full, QueryContext::new(ClauseContext::projects([10, 20])));
        assert!(result.simple.is_global());
    }

    #[test]
    fn test_disjunction_with_unscoped_clause_widens() {
        let query = Query::new(Clause::or(vec![eq("project", "HSP"), eq("status", "Open")]));
        assert!(resolver().full_context(None, &query).unwrap().is_global());
    }

    #[test]
    fn test_negation_in_full_context() {
        let query = Query::new(Clause::and(vec![
            Clause::not(eq("project", "HSP")),
            eq("type", "Bug"),
        ]));
        let result = resolver().contexts(None, &query).unwrap();
        assert_eq!(result.full, QueryContext::new(ClauseContext::new([pair(20, "1")])));
        assert!(result.simple.is_global());
    }

    #[test]
    fn test_contradiction_widens_by_default() {
        let query = Query::new(Clause::and(vec![eq("project", "HSP"), eq("project", "MKY")]));
        let result = resolver().contexts(None, &query).unwrap();
        assert!(result.full.is_global());
        assert!(result.simple.is_global());
    }

    #[test]
    fn test_contradiction_without_widening_is_empty() {
        let mut config = SearchConfig::default();
        config.context.widen_empty = false;
        let query = Query::new(Clause::and(vec![eq("project", "HSP"), eq("project", "MKY")]));
        let context = resolver_with(&config).full_context(None, &query).unwrap();
        assert!(context.clause_context().is_empty());
    }

    #[test]
    fn test_missing_project_names_is_config_error() {
        let mut config = SearchConfig::default();
        config.context.project_clause_names.clear();
        let result = ContextResolver::new(
            Arc::new(LiteralOperandResolver::new()),
            Arc::new(MemoryProjectResolver::new()),
            Arc::new(MemoryIssueTypeResolver::new()),
            &config,
        );
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[test]
    fn test_project_fault_propagates() {
        let projects = Arc::new(MemoryProjectResolver::new());
        projects.fail_with("down");
        let resolver = ContextResolver::new(
            Arc::new(LiteralOperandResolver::new()),
            projects,
            Arc::new(MemoryIssueTypeResolver::new()),
            &SearchConfig::default(),
        )
        .unwrap();
        let query = Query::new(eq("project", "HSP"));
        assert!(resolver.full_context(None, &query).unwrap_err().is_collaborator_fault());
        assert!(resolver.simple_context(None, &query).is_err());
    }
}
