//! Operand resolution
//!
//! Expands an operand into the literals it stands for, for a given user. Functions are opaque
//! here: they resolve only through handlers registered by the host application.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jq_core::User;
use tracing::trace;

use crate::clause::TerminalClause;
use crate::operand::{FunctionOperand, Operand, QueryLiteral};

/// Resolves operands to literal values
///
/// `None` or an empty list means the operand could not be resolved. Implementations never fail.
pub trait OperandResolver: Send + Sync {
    fn values(
        &self,
        user: Option<&User>,
        operand: &Operand,
        clause: &TerminalClause,
    ) -> Option<Vec<QueryLiteral>>;

    fn is_function(&self, operand: &Operand) -> bool {
        matches!(operand, Operand::Function(_))
    }

    /// EMPTY, or a list made only of EMPTY
    fn is_empty_operand(&self, operand: &Operand) -> bool {
        match operand {
            Operand::Empty => true,
            Operand::Multi(values) => !values.is_empty() && values.iter().all(Operand::is_empty),
            _ => false,
        }
    }
}

/// Handler for one JQL function
pub type FunctionHandler = Arc<
    dyn Fn(Option<&User>, &FunctionOperand, &TerminalClause) -> Option<Vec<QueryLiteral>>
        + Send
        + Sync,
>;

/// Resolver for literal operands with pluggable function handlers
#[derive(Clone, Default)]
pub struct LiteralOperandResolver {
    functions: HashMap<String, FunctionHandler>,
}

impl LiteralOperandResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; function names are case-insensitive
    pub fn with_function<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Option<&User>, &FunctionOperand, &TerminalClause) -> Option<Vec<QueryLiteral>>
            + Send
            + Sync
            + 'static,
    {
        self.functions.insert(name.to_lowercase(), Arc::new(handler));
        self
    }

    fn resolve_into(
        &self,
        user: Option<&User>,
        operand: &Operand,
        clause: &TerminalClause,
        out: &mut Vec<QueryLiteral>,
    ) -> bool {
        match operand {
            Operand::Single(value) => {
                out.push(value.to_literal());
                true
            }
            Operand::Empty => {
                out.push(QueryLiteral::Empty);
                true
            }
            Operand::Multi(values) => {
                for value in values {
                    // children that do not resolve contribute nothing
                    self.resolve_into(user, value, clause, out);
                }
                true
            }
            Operand::Function(function) => {
                match self.functions.get(&function.name.to_lowercase()) {
                    Some(handler) => match handler(user, function, clause) {
                        Some(values) => {
                            out.extend(values);
                            true
                        }
                        None => false,
                    },
                    None => {
                        trace!(function = %function.name, "no handler registered for function");
                        false
                    }
                }
            }
        }
    }
}

impl OperandResolver for LiteralOperandResolver {
    fn values(
        &self,
        user: Option<&User>,
        operand: &Operand,
        clause: &TerminalClause,
    ) -> Option<Vec<QueryLiteral>> {
        let mut literals = Vec::new();
        if self.resolve_into(user, operand, clause, &mut literals) {
            Some(literals)
        } else {
            None
        }
    }
}

impl fmt::Debug for LiteralOperandResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("LiteralOperandResolver")
            .field("functions", &names)
            .finish()
    }
}
