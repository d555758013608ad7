//! Multi select fields

use std::collections::BTreeSet;

use jq_context::SearchContext;
use jq_core::{parse_id, SearchResult, User};
use jq_query::{Operand, Query, TerminalClause};

use crate::field::CustomField;
use crate::helper::{ReconcilerBase, DEFAULT_OPERATORS};
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

pub struct MultiSelectReconciler {
    base: ReconcilerBase,
}

impl MultiSelectReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }

    fn operand_for(&self, value: String) -> SearchResult<Operand> {
        let option = match parse_id(&value) {
            Some(id) => self.base.field_option(id)?,
            None => None,
        };
        Ok(Operand::string(option.map_or(value, |o| o.value)))
    }
}

impl ClauseReconciler for MultiSelectReconciler {
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let operands = self
            .base
            .form_values(params, None)
            .into_iter()
            .map(|value| self.operand_for(value))
            .collect::<SearchResult<Vec<_>>>()?;
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

        let mut values = BTreeSet::new();
        for literal in &literals {
            match self.base.option_form_value(search_context, literal)? {
                Some(value) => values.insert(value),
                None => return Ok(None),
            };
        }
        Ok(Some(CustomFieldParams::with_values(values)))
    }
}
