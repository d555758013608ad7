//! Field reconcilers
//!
//! One module per field type. Each reconciler owns its form sub-key vocabulary.

mod cascading;
mod group;
mod multi_select;
mod project;
mod select;
mod version;

pub use cascading::{CascadingSelectReconciler, CHILD_KEY, PARENT_KEY};
pub use group::GroupReconciler;
pub use multi_select::MultiSelectReconciler;
pub use project::ProjectReconciler;
pub use select::SelectReconciler;
pub use version::VersionReconciler;
