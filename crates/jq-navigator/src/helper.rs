//! Shared reconciler plumbing
//!
//! Every reconciler owns a [`ReconcilerBase`] for clause naming, form value cleanup and the
//! structural checks that decide whether a query can be shown in the form.

use jq_context::{QueryContext, SearchContext};
use jq_core::config::NavigatorConfig;
use jq_core::{parse_id, FieldOption, Id, Identifiable, SearchResult, User};
use jq_query::{NavigatorCollector, Operand, Operator, Query, QueryLiteral, TerminalClause};
use tracing::debug;

use crate::field::CustomField;
use crate::params::CustomFieldParams;
use crate::services::NavigatorServices;

/// Operators the form can show for most fields
pub const DEFAULT_OPERATORS: [Operator; 3] = [Operator::Equals, Operator::Is, Operator::In];

#[derive(Clone)]
pub struct ReconcilerBase {
    field: CustomField,
    services: NavigatorServices,
}

impl ReconcilerBase {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self { field, services }
    }

    pub fn field(&self) -> &CustomField {
        &self.field
    }

    pub fn services(&self) -> &NavigatorServices {
        &self.services
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.services.config.navigator
    }

    /// Name written into generated clauses
    pub fn clause_name(&self, user: Option<&User>) -> String {
        self.services.clause_names.unique_clause_name(
            user,
            self.field.primary_clause_name(),
            &self.field.name,
        )
    }

    /// Option `id` of this field; ids of other fields' options are not found
    pub fn field_option(&self, id: Id) -> SearchResult<Option<FieldOption>> {
        let Some(option) = self.services.options.by_id(id)? else {
            return Ok(None);
        };
        let own = self
            .services
            .options
            .search(self.field.id, None, &QueryLiteral::Long(id), true)?;
        if own.iter().any(|o| o.id == option.id) {
            return Ok(Some(option));
        }
        debug!(field = %self.field.name, option = id, "option belongs to another field");
        Ok(None)
    }

    /// Form values under `key` without the "any" sentinels, in order
    pub fn form_values(&self, params: &CustomFieldParams, key: Option<&str>) -> Vec<String> {
        params
            .values_for(key)
            .into_iter()
            .flatten()
            .filter(|value| !self.config().is_all_value(value))
            .cloned()
            .collect()
    }

    /// All clauses for this field, provided none of them sits below an OR or a NOT
    pub fn relevant_clauses(&self, query: &Query) -> Option<Vec<TerminalClause>> {
        if query.where_clause.is_none() {
            debug!(field = %self.field.name, "query has no where clause");
            return None;
        }
        let collector = NavigatorCollector::collect(&self.field.clause_names, query);
        if !collector.is_valid() {
            debug!(field = %self.field.name, "field clauses below OR/NOT");
            return None;
        }
        Some(collector.into_clauses())
    }

    /// The one clause for this field, if its operator is one of `allowed`
    pub fn single_clause(&self, query: &Query, allowed: &[Operator]) -> Option<TerminalClause> {
        let mut clauses = self.relevant_clauses(query)?;
        if clauses.len() != 1 {
            debug!(field = %self.field.name, count = clauses.len(), "expected exactly one clause");
            return None;
        }
        let clause = clauses.remove(0);
        if !allowed.contains(&clause.operator) {
            debug!(field = %self.field.name, operator = %clause.operator, "operator not supported by the form");
            return None;
        }
        Some(clause)
    }

    /// Literals of the clause's operand; `None` when it does not resolve to anything
    pub fn literals(&self, user: Option<&User>, clause: &TerminalClause) -> Option<Vec<QueryLiteral>> {
        let literals = self
            .services
            .operand_resolver
            .values(user, &clause.operand, clause)?;
        if literals.is_empty() {
            debug!(field = %self.field.name, clause = %clause, "operand did not resolve");
            return None;
        }
        Some(literals)
    }

    /// Literals of the clause, rejecting EMPTY which the form cannot show
    pub fn non_empty_literals(
        &self,
        user: Option<&User>,
        clause: &TerminalClause,
    ) -> Option<Vec<QueryLiteral>> {
        let literals = self.literals(user, clause)?;
        if literals.iter().any(QueryLiteral::is_empty) {
            debug!(field = %self.field.name, "EMPTY cannot be shown in the form");
            return None;
        }
        Some(literals)
    }

    /// Options of this field matching `literal` in the search's scope
    pub fn options_in_context(
        &self,
        context: &QueryContext,
        literal: &QueryLiteral,
    ) -> SearchResult<Vec<FieldOption>> {
        self.services
            .options
            .search(self.field.id, Some(context), literal, false)
    }

    /// Form value for a literal that must resolve to at most one option
    ///
    /// `Ok(None)` when the literal is ambiguous; the raw literal when nothing matches.
    pub fn option_form_value(
        &self,
        search_context: &SearchContext,
        literal: &QueryLiteral,
    ) -> SearchResult<Option<String>> {
        let options = self.options_in_context(&search_context.to_query_context(), literal)?;
        match options.as_slice() {
            [] => Ok(literal.as_string()),
            [option] => Ok(Some(option.id_string())),
            _ => {
                debug!(field = %self.field.name, literal = %literal, matches = options.len(), "ambiguous option");
                Ok(None)
            }
        }
    }

    /// One operand is `=`, several are `in (...)`, none is no clause
    pub fn clause_for_operands(&self, user: Option<&User>, mut operands: Vec<Operand>) -> Option<TerminalClause> {
        match operands.len() {
            0 => None,
            1 => Some(TerminalClause::equals(self.clause_name(user), operands.remove(0))),
            _ => Some(TerminalClause::is_in(self.clause_name(user), Operand::Multi(operands))),
        }
    }
}

/// Numeric form values become Long operands, everything else stays a string
pub fn raw_operand(value: &str) -> Operand {
    match parse_id(value) {
        Some(id) => Operand::long(id),
        None => Operand::string(value),
    }
}
