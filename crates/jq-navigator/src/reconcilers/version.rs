//! Version picker fields

use jq_context::SearchContext;
use jq_core::{SearchResult, User};
use jq_query::{Operand, Query, TerminalClause};

use crate::field::CustomField;
use crate::helper::{raw_operand, ReconcilerBase, DEFAULT_OPERATORS};
use crate::indexed::{navigator_values, VersionIndex};
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

pub struct VersionReconciler {
    base: ReconcilerBase,
}

impl VersionReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }
}

impl ClauseReconciler for VersionReconciler {
    /// Clauses always carry version ids; names differ between projects
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let operands: Vec<Operand> = self
            .base
            .form_values(params, None)
            .iter()
            .map(|value| raw_operand(value))
            .collect();
        Ok(self.base.clause_for_operands(user, operands))
    }

    fn params_from_search_request(
        &self,
        user: Option<&User>,
        query: &Query,
        search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>> {
        let Some(clause) = self.base.single_clause(query, &DEFAULT_OPERATORS) else {
            return Ok(None);
        };
        let Some(literals) = self.base.non_empty_literals(user, &clause) else {
            return Ok(None);
        };

        let index = VersionIndex::new(
            self.base.services().versions.as_ref(),
            &search_context.project_ids,
        );
        Ok(navigator_values(&index, &literals)?.map(CustomFieldParams::with_values))
    }
}
