//! Navigator structure collector
//!
//! The issue navigator form can only show a field's clauses when they are plain conjuncts of the
//! query. The collector gathers the terminal clauses for one field and records whether any of
//! them sits below an OR or a NOT. Clauses for other fields may be nested freely.

use tracing::trace;

use crate::clause::{Clause, ClauseVisitor, TerminalClause};
use crate::names::ClauseNames;
use crate::query::Query;

#[derive(Debug, Clone)]
pub struct NavigatorCollector {
    names: ClauseNames,
    clauses: Vec<TerminalClause>,
    valid: bool,
    valid_path: bool,
}

impl NavigatorCollector {
    pub fn new(names: ClauseNames) -> Self {
        Self {
            names,
            clauses: Vec::new(),
            valid: true,
            valid_path: true,
        }
    }

    /// Run a collector over the query's where-clause
    pub fn collect(names: &ClauseNames, query: &Query) -> Self {
        let mut collector = Self::new(names.clone());
        if let Some(clause) = &query.where_clause {
            clause.accept(&mut collector);
        }
        collector
    }

    /// False when a matching clause was found below an OR or a NOT
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn clauses(&self) -> &[TerminalClause] {
        &self.clauses
    }

    pub fn into_clauses(self) -> Vec<TerminalClause> {
        self.clauses
    }

    fn visit_off_path(&mut self, clauses: &[Clause]) {
        let previous = self.valid_path;
        self.valid_path = false;
        for clause in clauses {
            clause.accept(self);
        }
        self.valid_path = previous;
    }
}

impl ClauseVisitor for NavigatorCollector {
    type Output = ();

    fn visit_and(&mut self, clauses: &[Clause]) {
        for clause in clauses {
            clause.accept(self);
        }
    }

    fn visit_or(&mut self, clauses: &[Clause]) {
        self.visit_off_path(clauses);
    }

    fn visit_not(&mut self, clause: &Clause) {
        self.visit_off_path(std::slice::from_ref(clause));
    }

    fn visit_terminal(&mut self, clause: &TerminalClause) {
        if !self.names.contains(&clause.name) {
            return;
        }
        if !self.valid_path {
            trace!(clause = %clause, "clause below OR/NOT");
            self.valid = false;
        }
        self.clauses.push(clause.clone());
    }
}
