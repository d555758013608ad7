//! # jq-navigator
//!
//! Reconciles the issue navigator form with structured queries, one field at a time.
//!
//! Each custom field type has a reconciler that:
//! - turns form values ([`CustomFieldParams`]) into a single clause
//! - turns a query back into form values, or answers `None` when the query does not fit the form
//! - tells whether the query's clauses for the field fit the form at all
//!
//! The set of field types is closed; [`FieldReconciler`] dispatches over it.

pub mod cascade;
pub mod field;
pub mod helper;
pub mod indexed;
pub mod lookups;
pub mod options;
pub mod params;
pub mod reconciler;
pub mod reconcilers;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use field::{CustomField, FieldType};
pub use lookups::{
    ClauseNameResolver, GroupResolver, MemoryClauseNameResolver, MemoryGroupResolver,
    MemoryVersionResolver, VersionResolver,
};
pub use options::{MemoryOptionLookup, OptionLookup};
pub use params::CustomFieldParams;
pub use reconciler::{ClauseReconciler, FieldReconciler};
pub use reconcilers::{
    CascadingSelectReconciler, GroupReconciler, MultiSelectReconciler, ProjectReconciler,
    SelectReconciler, VersionReconciler,
};
pub use services::NavigatorServices;
