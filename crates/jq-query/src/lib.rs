//! # jq-query
//!
//! The structured query model the navigator core reads and writes.
//!
//! A [`Query`] holds an optional boolean tree of [`Clause`]s. Terminal clauses pair a clause
//! name with an [`Operator`] and an [`Operand`]. Operands are expanded to [`QueryLiteral`]s by an
//! [`OperandResolver`]; the [`NavigatorCollector`] decides whether a tree is simple enough for the
//! issue navigator form.

pub mod builder;
pub mod clause;
pub mod names;
pub mod navigator;
pub mod operand;
pub mod operator;
pub mod query;
pub mod resolver;

pub use builder::JqlClauseBuilder;
pub use clause::{Clause, ClauseVisitor, TerminalClause};
pub use names::ClauseNames;
pub use navigator::NavigatorCollector;
pub use operand::{FunctionOperand, Operand, QueryLiteral, SingleValue};
pub use operator::Operator;
pub use query::Query;
pub use resolver::{LiteralOperandResolver, OperandResolver};
