//! The reconciler capability and the closed set of field reconcilers

use jq_context::SearchContext;
use jq_core::{SearchResult, User};
use jq_query::{Query, TerminalClause};
use tracing::instrument;

use crate::field::{CustomField, FieldType};
use crate::params::CustomFieldParams;
use crate::reconcilers::{
    CascadingSelectReconciler, GroupReconciler, MultiSelectReconciler, ProjectReconciler,
    SelectReconciler, VersionReconciler,
};
use crate::services::NavigatorServices;

/// Two-way mapping between navigator form values and a field's clause
///
/// `Ok(None)` means "not representable"; errors are collaborator faults only.
pub trait ClauseReconciler {
    /// Clause for the form values, or `None` when they do not constrain the search
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>>;

    /// Form values for the query, or `None` when the form cannot show it
    fn params_from_search_request(
        &self,
        user: Option<&User>,
        query: &Query,
        search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>>;

    /// Whether the query's clauses for this field can be shown in the form
    fn relevant_clauses_fit(
        &self,
        user: Option<&User>,
        query: &Query,
        search_context: &SearchContext,
    ) -> SearchResult<bool> {
        Ok(self
            .params_from_search_request(user, query, search_context)?
            .is_some())
    }
}

/// Reconciler for one custom field, chosen by its field type
pub enum FieldReconciler {
    Select(SelectReconciler),
    MultiSelect(MultiSelectReconciler),
    Cascading(CascadingSelectReconciler),
    Group(GroupReconciler),
    Project(ProjectReconciler),
    Version(VersionReconciler),
}

macro_rules! dispatch {
    ($self:ident, $reconciler:ident => $call:expr) => {
        match $self {
            FieldReconciler::Select($reconciler) => $call,
            FieldReconciler::MultiSelect($reconciler) => $call,
            FieldReconciler::Cascading($reconciler) => $call,
            FieldReconciler::Group($reconciler) => $call,
            FieldReconciler::Project($reconciler) => $call,
            FieldReconciler::Version($reconciler) => $call,
        }
    };
}

impl FieldReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        match field.field_type {
            FieldType::Select => Self::Select(SelectReconciler::new(field, services)),
            FieldType::MultiSelect => Self::MultiSelect(MultiSelectReconciler::new(field, services)),
            FieldType::Cascading => Self::Cascading(CascadingSelectReconciler::new(field, services)),
            FieldType::Group => Self::Group(GroupReconciler::new(field, services)),
            FieldType::Project => Self::Project(ProjectReconciler::new(field, services)),
            FieldType::Version => Self::Version(VersionReconciler::new(field, services)),
        }
    }

    pub fn field(&self) -> &CustomField {
        dispatch!(self, r => r.base().field())
    }

    pub fn field_type(&self) -> FieldType {
        self.field().field_type
    }
}

impl ClauseReconciler for FieldReconciler {
    #[instrument(level = "debug", skip_all, fields(field = %self.field().name))]
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        dispatch!(self, r => r.clause_from_params(user, params))
    }

    #[instrument(level = "debug", skip_all, fields(field = %self.field().name))]
    fn params_from_search_request(
        &self,
        user: Option<&User>,
        query: &Query,
        search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>> {
        dispatch!(self, r => r.params_from_search_request(user, query, search_context))
    }

    #[instrument(level = "debug", skip_all, fields(field = %self.field().name))]
    fn relevant_clauses_fit(
        &self,
        user: Option<&User>,
        query: &Query,
        search_context: &SearchContext,
    ) -> SearchResult<bool> {
        dispatch!(self, r => r.relevant_clauses_fit(user, query, search_context))
    }
}
