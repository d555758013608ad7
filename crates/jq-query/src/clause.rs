//! Boolean clause tree
//!
//! Clauses are immutable values. Code that needs a different tree builds a new one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::names::quote_if_needed;
use crate::operand::Operand;
use crate::operator::Operator;

/// A leaf clause: `name operator operand`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerminalClause {
    pub name: String,
    pub operator: Operator,
    pub operand: Operand,
}

impl TerminalClause {
    pub fn new(name: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self {
            name: name.into(),
            operator,
            operand,
        }
    }

    pub fn equals(name: impl Into<String>, operand: Operand) -> Self {
        Self::new(name, Operator::Equals, operand)
    }

    pub fn is_in(name: impl Into<String>, operand: Operand) -> Self {
        Self::new(name, Operator::In, operand)
    }

    /// Same clause with a different operator
    pub fn with_operator(&self, operator: Operator) -> Self {
        Self {
            name: self.name.clone(),
            operator,
            operand: self.operand.clone(),
        }
    }
}

/// A node in the boolean query tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    And(Vec<Clause>),
    Or(Vec<Clause>),
    Not(Box<Clause>),
    Terminal(TerminalClause),
}

/// Visitor over the clause tree
pub trait ClauseVisitor {
    type Output;

    fn visit_and(&mut self, clauses: &[Clause]) -> Self::Output;
    fn visit_or(&mut self, clauses: &[Clause]) -> Self::Output;
    fn visit_not(&mut self, clause: &Clause) -> Self::Output;
    fn visit_terminal(&mut self, clause: &TerminalClause) -> Self::Output;
}

impl Clause {
    pub fn terminal(name: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self::Terminal(TerminalClause::new(name, operator, operand))
    }

    pub fn and(clauses: Vec<Clause>) -> Self {
        Self::And(clauses)
    }

    pub fn or(clauses: Vec<Clause>) -> Self {
        Self::Or(clauses)
    }

    pub fn not(clause: Clause) -> Self {
        Self::Not(Box::new(clause))
    }

    pub fn accept<V: ClauseVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::And(clauses) => visitor.visit_and(clauses),
            Self::Or(clauses) => visitor.visit_or(clauses),
            Self::Not(clause) => visitor.visit_not(clause),
            Self::Terminal(clause) => visitor.visit_terminal(clause),
        }
    }

    /// All terminal clauses in the tree, depth first
    pub fn terminal_clauses(&self) -> Vec<&TerminalClause> {
        let mut found = Vec::new();
        self.collect_terminals(&mut found);
        found
    }

    fn collect_terminals<'a>(&'a self, found: &mut Vec<&'a TerminalClause>) {
        match self {
            Self::And(clauses) | Self::Or(clauses) => {
                clauses.iter().for_each(|c| c.collect_terminals(found))
            }
            Self::Not(clause) => clause.collect_terminals(found),
            Self::Terminal(clause) => found.push(clause),
        }
    }
}

impl From<TerminalClause> for Clause {
    fn from(clause: TerminalClause) -> Self {
        Self::Terminal(clause)
    }
}

impl fmt::Display for TerminalClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            quote_if_needed(&self.name),
            self.operator,
            self.operand
        )
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(clause) => write!(f, "{clause}"),
            Self::And(clauses) => {
                let parts: Vec<String> = clauses
                    .iter()
                    .map(|c| match c {
                        Self::Or(_) => format!("({c})"),
                        _ => c.to_string(),
                    })
                    .collect();
                f.write_str(&parts.join(" AND "))
            }
            Self::Or(clauses) => {
                let parts: Vec<String> = clauses.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(" OR "))
            }
            Self::Not(clause) => match clause.as_ref() {
                Self::Terminal(_) | Self::Not(_) => write!(f, "NOT {clause}"),
                _ => write!(f, "NOT ({clause})"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(name: &str, value: &str) -> Clause {
        Clause::terminal(name, Operator::Equals, Operand::string(value))
    }

    #[test]
    fn test_terminal_display() {
        let clause = TerminalClause::is_in("cf[10000]", Operand::multi(vec![10_i64, 20]));
        assert_eq!(clause.to_string(), "cf[10000] in (10, 20)");

        let clause = TerminalClause::equals("Component Owner", Operand::string("fred"));
        assert_eq!(clause.to_string(), "\"Component Owner\" = fred");
    }

    #[test]
    fn test_tree_display_parenthesizes() {
        let tree = Clause::and(vec![
            eq("project", "HSP"),
            Clause::or(vec![eq("type", "Bug"), eq("type", "Task")]),
            Clause::not(Clause::and(vec![eq("a", "1"), eq("b", "2")])),
        ]);
        assert_eq!(
            tree.to_string(),
            "project = HSP AND (type = Bug OR type = Task) AND NOT (a = 1 AND b = 2)"
        );
    }

    #[test]
    fn test_terminal_clauses_depth_first() {
        let tree = Clause::or(vec![
            eq("a", "1"),
            Clause::not(Clause::and(vec![eq("b", "2"), eq("c", "3")])),
        ]);
        let names: Vec<&str> = tree
            .terminal_clauses()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    struct Depth;

    impl ClauseVisitor for Depth {
        type Output = usize;

        fn visit_and(&mut self, clauses: &[Clause]) -> usize {
            1 + clauses.iter().map(|c| c.accept(self)).max().unwrap_or(0)
        }

        fn visit_or(&mut self, clauses: &[Clause]) -> usize {
            self.visit_and(clauses)
        }

        fn visit_not(&mut self, clause: &Clause) -> usize {
            1 + clause.accept(self)
        }

        fn visit_terminal(&mut self, _clause: &TerminalClause) -> usize {
            1
        }
    }

    #[test]
    fn test_visitor_dispatch() {
        let tree = Clause::and(vec![eq("a", "1"), Clause::not(eq("b", "2"))]);
        assert_eq!(tree.accept(&mut Depth), 3);
        assert_eq!(eq("a", "1").accept(&mut Depth), 1);
    }

    #[test]
    fn test_with_operator_keeps_operand() {
        let clause = TerminalClause::equals("project", Operand::long(1));
        let negated = clause.with_operator(Operator::NotEquals);
        assert_eq!(negated.operand, clause.operand);
        assert_eq!(negated.operator, Operator::NotEquals);
    }
}
