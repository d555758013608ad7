//! Clause Builder
//!
//! Fluent API for building conjunctive where-clauses, the shape the issue navigator produces.

use jq_core::Id;

use crate::clause::{Clause, TerminalClause};
use crate::names::system;
use crate::operand::{Operand, SingleValue};
use crate::operator::Operator;
use crate::query::Query;

/// Builds an AND of clauses; a single clause is returned bare
#[derive(Debug, Clone, Default)]
pub struct JqlClauseBuilder {
    clauses: Vec<Clause>,
}

impl JqlClauseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any clause
    pub fn add_clause(mut self, clause: impl Into<Clause>) -> Self {
        self.clauses.push(clause.into());
        self
    }

    /// Add an optional clause, as produced by a reconciler
    pub fn add_optional(self, clause: Option<TerminalClause>) -> Self {
        match clause {
            Some(clause) => self.add_clause(clause),
            None => self,
        }
    }

    /// Add `name op operand`
    pub fn field(self, name: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        self.add_clause(TerminalClause::new(name, operator, operand))
    }

    /// Add `cf[id] op operand`
    pub fn custom_field(self, id: Id, operator: Operator, operand: Operand) -> Self {
        self.field(format!("cf[{id}]"), operator, operand)
    }

    /// Filter by project keys or ids; several values use `in`
    pub fn project<V: Into<SingleValue>>(self, values: impl IntoIterator<Item = V>) -> Self {
        self.system_values(system::PROJECT, values)
    }

    /// Filter by issue type names or ids; several values use `in`
    pub fn issue_type<V: Into<SingleValue>>(self, values: impl IntoIterator<Item = V>) -> Self {
        self.system_values(system::ISSUE_TYPE, values)
    }

    fn system_values<V: Into<SingleValue>>(
        self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let mut values: Vec<SingleValue> = values.into_iter().map(Into::into).collect();
        match values.len() {
            0 => self,
            1 => {
                let value = values.remove(0);
                self.field(name, Operator::Equals, Operand::Single(value))
            }
            _ => self.field(name, Operator::In, Operand::multi(values)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Build the where-clause
    pub fn build_clause(mut self) -> Option<Clause> {
        match self.clauses.len() {
            0 => None,
            1 => self.clauses.pop(),
            _ => Some(Clause::And(self.clauses)),
        }
    }

    /// Build the query
    pub fn build_query(self) -> Query {
        match self.build_clause() {
            Some(clause) => Query::new(clause),
            None => Query::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        let builder = JqlClauseBuilder::new();
        assert!(builder.is_empty());
        assert_eq!(builder.build_query(), Query::empty());
    }

    #[test]
    fn test_single_clause_is_not_wrapped() {
        let clause = JqlClauseBuilder::new().project(["HSP"]).build_clause();
        assert_eq!(
            clause,
            Some(Clause::terminal("project", Operator::Equals, Operand::string("HSP")))
        );
    }

    #[test]
    fn test_conjunction() {
        let query = JqlClauseBuilder::new()
            .project([10_000_i64, 10_001])
            .issue_type(["Bug"])
            .custom_field(10_100, Operator::Equals, Operand::string("Red"))
            .add_optional(None)
            .build_query();

        assert_eq!(
            query.jql(),
            "project in (10000, 10001) AND issuetype = Bug AND cf[10100] = Red"
        );
    }
}
