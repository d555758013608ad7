//! Group picker fields
//!
//! Form values are group names. Known groups are written with their stored spelling.

use std::collections::BTreeSet;

use jq_context::SearchContext;
use jq_core::{SearchResult, User};
use jq_query::{Operand, Operator, Query, TerminalClause};

use crate::field::CustomField;
use crate::helper::ReconcilerBase;
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

const GROUP_OPERATORS: [Operator; 2] = [Operator::Equals, Operator::In];

pub struct GroupReconciler {
    base: ReconcilerBase,
}

impl GroupReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }

    fn canonical_name(&self, name: String) -> SearchResult<String> {
        Ok(match self.base.services().groups.by_name(&name)? {
            Some(group) => group.name,
            None => name,
        })
    }
}

impl ClauseReconciler for GroupReconciler {
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let operands = self
            .base
            .form_values(params, None)
            .into_iter()
            .map(|name| self.canonical_name(name).map(Operand::string))
            .collect::<SearchResult<Vec<_>>>()?;
        Ok(self.base.clause_for_operands(user, operands))
    }

    fn params_from_search_request(
        &self,
        user: Option<&User>,
        query: &Query,
        _search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>> {
        let Some(clause) = self.base.single_clause(query, &GROUP_OPERATORS) else {
            return Ok(None);
        };
        let Some(literals) = self.base.non_empty_literals(user, &clause) else {
            return Ok(None);
        };

        let mut names = BTreeSet::new();
        for literal in literals {
            if let Some(name) = literal.as_string() {
                names.insert(self.canonical_name(name)?);
            }
        }
        Ok(Some(CustomFieldParams::with_values(names)))
    }
}
