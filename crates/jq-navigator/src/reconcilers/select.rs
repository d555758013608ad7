//! Single select fields
//!
//! The form holds one option id under the null key. Clauses name the option by its value so
//! the generated JQL stays readable.

use jq_context::SearchContext;
use jq_core::{parse_id, SearchResult, User};
use jq_query::{Operand, Query, TerminalClause};
use tracing::debug;

use crate::field::CustomField;
use crate::helper::{ReconcilerBase, DEFAULT_OPERATORS};
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

pub struct SelectReconciler {
    base: ReconcilerBase,
}

impl SelectReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }
}

impl ClauseReconciler for SelectReconciler {
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let Some(value) = self.base.form_values(params, None).into_iter().next() else {
            return Ok(None);
        };

        let option = match parse_id(&value) {
            Some(id) => self.base.field_option(id)?,
            None => None,
        };
        let operand = match option {
            Some(option) => Operand::string(option.value),
            None => Operand::string(value),
        };
        Ok(Some(TerminalClause::equals(self.base.clause_name(user), operand)))
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
        let [literal] = literals.as_slice() else {
            debug!(field = %self.base.field().name, count = literals.len(), "single select needs one value");
            return Ok(None);
        };

        Ok(self
            .base
            .option_form_value(search_context, literal)?
            .map(|value| CustomFieldParams::with_values([value])))
    }
}
