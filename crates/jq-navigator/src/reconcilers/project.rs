//! Project picker fields
//!
//! The form stores a project id; clauses name the project by key.

use jq_context::SearchContext;
use jq_core::{parse_id, SearchResult, User};
use jq_query::{Operand, Query, TerminalClause};
use tracing::debug;

use crate::field::CustomField;
use crate::helper::{ReconcilerBase, DEFAULT_OPERATORS};
use crate::indexed::{single_navigator_value, ProjectIndex};
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

pub struct ProjectReconciler {
    base: ReconcilerBase,
}

impl ProjectReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }
}

impl ClauseReconciler for ProjectReconciler {
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let Some(value) = self.base.form_values(params, None).into_iter().next() else {
            return Ok(None);
        };

        let operand = match parse_id(&value) {
            Some(id) => match self.base.services().projects.by_id(id)? {
                Some(project) => Operand::string(project.key),
                None => Operand::long(id),
            },
            None => Operand::string(value),
        };
        Ok(Some(TerminalClause::equals(self.base.clause_name(user), operand)))
    }

    fn params_from_search_request(
        &self,
        user: Option<&User>,
        query: &Query,
        _search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>> {
        let Some(clause) = self.base.single_clause(query, &DEFAULT_OPERATORS) else {
            return Ok(None);
        };
        let Some(literals) = self.base.non_empty_literals(user, &clause) else {
            return Ok(None);
        };
        let [literal] = literals.as_slice() else {
            debug!(field = %self.base.field().name, count = literals.len(), "project field takes one value");
            return Ok(None);
        };

        let index = ProjectIndex::new(self.base.services().projects.as_ref());
        Ok(single_navigator_value(&index, literal)?.map(|value| CustomFieldParams::with_values([value])))
    }
}
