//! # jq-context
//!
//! Computes the (project, issue type) scope a structured query is restricted to.
//!
//! - [`ClauseContext`] is a set of [`ScopePair`]s, with `All` wildcards on either side
//! - [`set_ops`] combines contexts for AND (intersection) and OR (union)
//! - [`factory`] turns a single project or issue-type clause into a context
//! - [`ContextResolver`] walks a whole query, in simple or full fidelity

pub mod factory;
pub mod query_context;
pub mod resolver;
pub mod resolvers;
pub mod scope;
pub mod set_ops;
pub mod visitor;

pub use factory::{ClauseContextFactory, IssueTypeClauseContextFactory, ProjectClauseContextFactory};
pub use query_context::{QueryContext, SearchContext};
pub use resolver::{ContextResolver, ContextResult};
pub use resolvers::{IssueTypeResolver, MemoryIssueTypeResolver, MemoryProjectResolver, ProjectResolver};
pub use scope::{ClauseContext, IssueTypeScope, ProjectScope, ScopePair};
pub use visitor::ContextFactories;
