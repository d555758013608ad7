//! Full context visitor
//!
//! AND intersects the contexts of its children, OR unions them. NOT is pushed down to the
//! terminal clauses: connectives swap and operators are negated.

use std::sync::Arc;

use jq_core::{SearchResult, User};
use jq_query::{Clause, ClauseNames, ClauseVisitor, TerminalClause};
use tracing::trace;

use crate::factory::ClauseContextFactory;
use crate::scope::ClauseContext;
use crate::set_ops;

/// Clause context factories keyed by the clause names they answer to
#[derive(Clone, Default)]
pub struct ContextFactories {
    entries: Vec<(ClauseNames, Arc<dyn ClauseContextFactory>)>,
}

impl ContextFactories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, names: ClauseNames, factory: Arc<dyn ClauseContextFactory>) -> Self {
        self.entries.push((names, factory));
        self
    }

    pub fn factory_for(&self, clause_name: &str) -> Option<&dyn ClauseContextFactory> {
        self.entries
            .iter()
            .find(|(names, _)| names.contains(clause_name))
            .map(|(_, factory)| factory.as_ref())
    }

    /// Union of all registered names
    pub fn clause_names(&self) -> Option<ClauseNames> {
        let mut entries = self.entries.iter();
        let (first, _) = entries.next()?;
        Some(entries.fold(first.clone(), |acc, (names, _)| acc.merge(names)))
    }
}

pub(crate) struct FullContextVisitor<'a> {
    user: Option<&'a User>,
    factories: &'a ContextFactories,
    negated: bool,
}

impl<'a> FullContextVisitor<'a> {
    pub(crate) fn new(user: Option<&'a User>, factories: &'a ContextFactories) -> Self {
        Self {
            user,
            factories,
            negated: false,
        }
    }

    fn children(&mut self, clauses: &[Clause]) -> SearchResult<Vec<ClauseContext>> {
        clauses.iter().map(|c| c.accept(self)).collect()
    }

    fn intersect(&mut self, clauses: &[Clause]) -> SearchResult<ClauseContext> {
        let contexts = self.children(clauses)?;
        Ok(set_ops::intersect(&contexts))
    }

    fn union(&mut self, clauses: &[Clause]) -> SearchResult<ClauseContext> {
        let contexts = self.children(clauses)?;
        Ok(set_ops::union(&contexts))
    }
}

impl ClauseVisitor for FullContextVisitor<'_> {
    type Output = SearchResult<ClauseContext>;

    fn visit_and(&mut self, clauses: &[Clause]) -> Self::Output {
        if self.negated {
            self.union(clauses)
        } else {
            self.intersect(clauses)
        }
    }

    fn visit_or(&mut self, clauses: &[Clause]) -> Self::Output {
        if self.negated {
            self.intersect(clauses)
        } else {
            self.union(clauses)
        }
    }

    fn visit_not(&mut self, clause: &Clause) -> Self::Output {
        self.negated = !self.negated;
        let result = clause.accept(self);
        self.negated = !self.negated;
        result
    }

    fn visit_terminal(&mut self, clause: &TerminalClause) -> Self::Output {
        let Some(factory) = self.factories.factory_for(&clause.name) else {
            return Ok(ClauseContext::global());
        };
        if !self.negated {
            return factory.clause_context(self.user, clause);
        }
        match clause.operator.negate() {
            Some(operator) => factory.clause_context(self.user, &clause.with_operator(operator)),
            None => {
                trace!(clause = %clause, "operator cannot be negated");
                Ok(ClauseContext::global())
            }
        }
    }
}
