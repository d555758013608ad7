//! Collaborators shared by every reconciler

use std::sync::Arc;

use jq_context::ProjectResolver;
use jq_core::SearchConfig;
use jq_query::OperandResolver;

use crate::lookups::{ClauseNameResolver, GroupResolver, VersionResolver};
use crate::options::OptionLookup;

/// Read-only collaborators injected into reconcilers at construction
#[derive(Clone)]
pub struct NavigatorServices {
    pub operand_resolver: Arc<dyn OperandResolver>,
    pub options: Arc<dyn OptionLookup>,
    pub projects: Arc<dyn ProjectResolver>,
    pub versions: Arc<dyn VersionResolver>,
    pub groups: Arc<dyn GroupResolver>,
    pub clause_names: Arc<dyn ClauseNameResolver>,
    pub config: Arc<SearchConfig>,
}
