//! Clause context factories
//!
//! A factory computes the context of one terminal clause. Anything a factory cannot interpret
//! yields the global context: scope is widened, never narrowed, when in doubt.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::trace;

use jq_core::{parse_id, Id, SearchResult, User};
use jq_query::{Operator, OperandResolver, QueryLiteral, TerminalClause};

use crate::resolvers::{IssueTypeResolver, ProjectResolver};
use crate::scope::ClauseContext;

const SUPPORTED_OPERATORS: [Operator; 6] = [
    Operator::Equals,
    Operator::NotEquals,
    Operator::In,
    Operator::NotIn,
    Operator::Is,
    Operator::IsNot,
];

/// Computes the context of a single terminal clause
pub trait ClauseContextFactory: Send + Sync {
    fn clause_context(
        &self,
        user: Option<&User>,
        clause: &TerminalClause,
    ) -> SearchResult<ClauseContext>;
}

/// Non-empty literals of a supported clause, or `None` when the clause says nothing about scope
fn scoping_literals(
    resolver: &dyn OperandResolver,
    user: Option<&User>,
    clause: &TerminalClause,
) -> Option<Vec<QueryLiteral>> {
    if !SUPPORTED_OPERATORS.contains(&clause.operator) {
        trace!(clause = %clause, "operator does not scope the query");
        return None;
    }
    let literals: Vec<QueryLiteral> = resolver
        .values(user, &clause.operand, clause)?
        .into_iter()
        .filter(|literal| !literal.is_empty())
        .collect();
    if literals.is_empty() {
        None
    } else {
        Some(literals)
    }
}

/// Positive operators keep the named ids, negative ones keep everything else
fn select<T: Ord + Clone>(operator: Operator, named: &BTreeSet<T>, universe: &BTreeSet<T>) -> BTreeSet<T> {
    if operator.is_negative() {
        universe.difference(named).cloned().collect()
    } else {
        universe.intersection(named).cloned().collect()
    }
}

/// Context of `project` clauses: each project with all of its issue types
pub struct ProjectClauseContextFactory {
    operand_resolver: Arc<dyn OperandResolver>,
    projects: Arc<dyn ProjectResolver>,
}

impl ProjectClauseContextFactory {
    pub fn new(operand_resolver: Arc<dyn OperandResolver>, projects: Arc<dyn ProjectResolver>) -> Self {
        Self {
            operand_resolver,
            projects,
        }
    }

    fn project_ids(&self, literal: &QueryLiteral) -> SearchResult<Vec<Id>> {
        match literal {
            QueryLiteral::Long(id) => match self.projects.by_id(*id)? {
                Some(project) => Ok(vec![project.id]),
                None => self.projects.ids_for_name(&id.to_string()),
            },
            QueryLiteral::String(name) => {
                let ids = self.projects.ids_for_name(name)?;
                if !ids.is_empty() {
                    return Ok(ids);
                }
                match parse_id(name) {
                    Some(id) => Ok(self.projects.by_id(id)?.map(|p| p.id).into_iter().collect()),
                    None => Ok(Vec::new()),
                }
            }
            QueryLiteral::Empty => Ok(Vec::new()),
        }
    }
}

impl ClauseContextFactory for ProjectClauseContextFactory {
    fn clause_context(
        &self,
        user: Option<&User>,
        clause: &TerminalClause,
    ) -> SearchResult<ClauseContext> {
        let Some(literals) = scoping_literals(self.operand_resolver.as_ref(), user, clause) else {
            return Ok(ClauseContext::global());
        };

        let mut named = BTreeSet::new();
        for literal in &literals {
            named.extend(self.project_ids(literal)?);
        }

        let visible: BTreeSet<Id> = self
            .projects
            .visible_projects(user)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        let selected = select(clause.operator, &named, &visible);
        if selected.is_empty() {
            trace!(clause = %clause, "no visible project selected");
            return Ok(ClauseContext::global());
        }
        Ok(ClauseContext::projects(selected))
    }
}

/// Context of `issuetype` clauses: each issue type in all projects
pub struct IssueTypeClauseContextFactory {
    operand_resolver: Arc<dyn OperandResolver>,
    issue_types: Arc<dyn IssueTypeResolver>,
}

impl IssueTypeClauseContextFactory {
    pub fn new(
        operand_resolver: Arc<dyn OperandResolver>,
        issue_types: Arc<dyn IssueTypeResolver>,
    ) -> Self {
        Self {
            operand_resolver,
            issue_types,
        }
    }

    fn issue_type_ids(&self, literal: &QueryLiteral) -> SearchResult<Vec<String>> {
        match literal {
            QueryLiteral::Long(id) => {
                let id = id.to_string();
                match self.issue_types.by_id(&id)? {
                    Some(issue_type) => Ok(vec![issue_type.id]),
                    None => self.issue_types.ids_for_name(&id),
                }
            }
            QueryLiteral::String(name) => {
                let ids = self.issue_types.ids_for_name(name)?;
                if !ids.is_empty() {
                    return Ok(ids);
                }
                Ok(self.issue_types.by_id(name)?.map(|t| t.id).into_iter().collect())
            }
            QueryLiteral::Empty => Ok(Vec::new()),
        }
    }
}

impl ClauseContextFactory for IssueTypeClauseContextFactory {
    fn clause_context(
        &self,
        user: Option<&User>,
        clause: &TerminalClause,
    ) -> SearchResult<ClauseContext> {
        let Some(literals) = scoping_literals(self.operand_resolver.as_ref(), user, clause) else {
            return Ok(ClauseContext::global());
        };

        let mut named = BTreeSet::new();
        for literal in &literals {
            named.extend(self.issue_type_ids(literal)?);
        }

        let all: BTreeSet<String> = self
            .issue_types
            .all_issue_types()?
            .into_iter()
            .map(|t| t.id)
            .collect();

        let selected = select(clause.operator, &named, &all);
        if selected.is_empty() {
            return Ok(ClauseContext::global());
        }
        Ok(ClauseContext::issue_types(selected))
    }
}
