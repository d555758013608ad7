//! Cascading select fields
//!
//! The form has two inputs: the parent option id under the null key and the child option id
//! under [`CHILD_KEY`]. A chosen child is written as `cascadeOption(parent, child)`, a parent
//! alone as `cascadeOption(parent)`.

use jq_context::SearchContext;
use jq_core::{parse_id, FieldOption, Identifiable, SearchResult, User};
use jq_query::{FunctionOperand, Operand, Operator, Query, QueryLiteral, TerminalClause};
use tracing::debug;

use crate::cascade::{cascade_operand, validate_cascade_args, CascadeArgs};
use crate::field::CustomField;
use crate::helper::{ReconcilerBase, DEFAULT_OPERATORS};
use crate::params::CustomFieldParams;
use crate::reconciler::ClauseReconciler;
use crate::services::NavigatorServices;

/// Form key of the parent input
pub const PARENT_KEY: Option<&str> = None;

/// Form key of the child input
pub const CHILD_KEY: &str = "1";

pub struct CascadingSelectReconciler {
    base: ReconcilerBase,
}

impl CascadingSelectReconciler {
    pub fn new(field: CustomField, services: NavigatorServices) -> Self {
        Self {
            base: ReconcilerBase::new(field, services),
        }
    }

    pub fn base(&self) -> &ReconcilerBase {
        &self.base
    }

    /// Validation messages for a `cascadeOption` call on this field; empty when valid
    pub fn validate_clause(&self, function: &FunctionOperand) -> SearchResult<Vec<String>> {
        validate_cascade_args(
            self.base.services().options.as_ref(),
            self.base.config(),
            self.base.field().id,
            function,
        )
    }

    fn first_form_value(&self, params: &CustomFieldParams, key: Option<&str>) -> Option<String> {
        self.base.form_values(params, key).into_iter().next()
    }

    fn child_operand(&self, child: &str) -> SearchResult<(Operator, Operand)> {
        let Some(id) = parse_id(child) else {
            return Ok((Operator::Equals, Operand::string(child)));
        };
        match self.base.field_option(id)? {
            Some(FieldOption {
                id,
                parent: Some(parent),
                ..
            }) => Ok((
                Operator::In,
                cascade_operand(self.base.config(), parent.id, Some(id)),
            )),
            _ => {
                debug!(field = %self.base.field().name, child, "child is not a known child option");
                Ok((Operator::Equals, Operand::long(id)))
            }
        }
    }

    fn parent_operand(&self, parent: &str) -> SearchResult<(Operator, Operand)> {
        let Some(id) = parse_id(parent) else {
            return Ok((Operator::Equals, Operand::string(parent)));
        };
        Ok(match self.base.field_option(id)? {
            Some(option) => (
                Operator::In,
                cascade_operand(self.base.config(), option.id, None),
            ),
            None => (Operator::Equals, Operand::long(id)),
        })
    }

    fn params_for_literal(
        &self,
        literal: &QueryLiteral,
        search_context: &SearchContext,
    ) -> SearchResult<Option<CustomFieldParams>> {
        let Some(raw) = literal.as_string() else {
            return Ok(None);
        };
        let options = self
            .base
            .options_in_context(&search_context.to_query_context(), literal)?;
        Ok(match options.as_slice() {
            [] => Some(CustomFieldParams::new().with(PARENT_KEY, [raw])),
            [option] => Some(match option.parent_id() {
                Some(parent_id) => CustomFieldParams::new()
                    .with(PARENT_KEY, [parent_id.to_string()])
                    .with(Some(CHILD_KEY), [option.id_string()]),
                None => CustomFieldParams::new().with(PARENT_KEY, [option.id_string()]),
            }),
            _ => {
                debug!(field = %self.base.field().name, literal = %literal, matches = options.len(), "ambiguous option");
                None
            }
        })
    }

    /// `cascadeOption(parent[, child])` whose arguments the form can show as typed
    fn params_for_function(&self, function: &FunctionOperand) -> SearchResult<Option<CustomFieldParams>> {
        let Some(args) = CascadeArgs::parse(function) else {
            return Ok(None);
        };
        if args.uses_none(self.base.config()) {
            debug!(field = %self.base.field().name, "cascade 'none' cannot be shown in the form");
            return Ok(None);
        }

        let parent_literal = QueryLiteral::String(args.parent.to_string());
        let parents = self.base.services().options.search(
            self.base.field().id,
            None,
            &parent_literal,
            false,
        )?;
        if parents.is_empty() {
            return Ok(None);
        }

        let mut params = CustomFieldParams::new().with(PARENT_KEY, [args.parent]);
        if let Some(child) = args.child {
            params.put(Some(CHILD_KEY), [child]);
        }
        Ok(Some(params))
    }
}

impl ClauseReconciler for CascadingSelectReconciler {
    fn clause_from_params(
        &self,
        user: Option<&User>,
        params: &CustomFieldParams,
    ) -> SearchResult<Option<TerminalClause>> {
        let (operator, operand) = match (
            self.first_form_value(params, Some(CHILD_KEY)),
            self.first_form_value(params, PARENT_KEY),
        ) {
            (Some(child), _) => self.child_operand(&child)?,
            (None, Some(parent)) => self.parent_operand(&parent)?,
            (None, None) => return Ok(None),
        };
        Ok(Some(TerminalClause::new(
            self.base.clause_name(user),
            operator,
            operand,
        )))
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

        if let Some(literals) = self.base.literals(user, &clause) {
            if let [literal] = literals.as_slice() {
                return self.params_for_literal(literal, search_context);
            }
        }

        match clause.operand.as_function() {
            Some(function) if self.base.config().is_cascade_function(&function.name) => {
                self.params_for_function(function)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::testing::{field, fixture, query_of, Fixture, CASCADE_FIELD};
    use jq_core::Id;
    use jq_query::{Clause, LiteralOperandResolver};
    use std::sync::Arc;

    fn reconciler(fixture: &Fixture) -> CascadingSelectReconciler {
        CascadingSelectReconciler::new(field(CASCADE_FIELD, FieldType::Cascading), fixture.services())
    }

    fn params(parent: &str, child: Option<&str>) -> CustomFieldParams {
        let params = CustomFieldParams::new().with(PARENT_KEY, [parent]);
        match child {
            Some(child) => params.with(Some(CHILD_KEY), [child]),
            None => params,
        }
    }

    fn query(operator: Operator, operand: Operand) -> Query {
        Query::new(Clause::terminal("cf[10002]", operator, operand))
    }

    fn cascade(args: &[&str]) -> Operand {
        Operand::function("cascadeOption", args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_child_selection() {
        let fixture = fixture();
        let clause = reconciler(&fixture)
            .clause_from_params(None, &params("20", Some("41")))
            .unwrap()
            .unwrap();
        assert_eq!(clause.to_string(), "cf[10002] in cascadeOption(20, 41)");
    }

    #[test]
    fn test_child_wins_over_mismatched_parent() {
        let fixture = fixture();
        let clause = reconciler(&fixture)
            .clause_from_params(None, &params("30", Some("40")))
            .unwrap()
            .unwrap();
        assert_eq!(clause.operand, cascade(&["20", "40"]));
    }

    #[test]
    fn test_parent_selection() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        for child in [None, Some("-1")] {
            let clause = reconciler
                .clause_from_params(None, &params("20", child))
                .unwrap()
                .unwrap();
            assert_eq!(clause.operator, Operator::In);
            assert_eq!(clause.operand, cascade(&["20"]));
        }
    }

    #[test]
    fn test_unknown_ids_fall_back_to_equals() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);

        let clause = reconciler.clause_from_params(None, &params("999", None)).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::long(999)));

        // a top level option given as child has no parent to cascade from
        let clause = reconciler.clause_from_params(None, &params("-1", Some("30"))).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::long(30)));

        let clause = reconciler.clause_from_params(None, &params("-1", Some("Mouse"))).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::string("Mouse")));

        let clause = reconciler.clause_from_params(None, &params("Hardware", None)).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::string("Hardware")));
    }

    #[test]
    fn test_options_of_other_fields_are_not_cascaded() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        // 10 and 100 are options of the select and multi select fields
        let clause = reconciler.clause_from_params(None, &params("10", None)).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::long(10)));
        let clause = reconciler.clause_from_params(None, &params("20", Some("100"))).unwrap().unwrap();
        assert_eq!(clause, TerminalClause::equals("cf[10002]", Operand::long(100)));
    }

    #[test]
    fn test_nothing_selected() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        assert_eq!(reconciler.clause_from_params(None, &params("-1", Some(""))).unwrap(), None);
        assert_eq!(reconciler.clause_from_params(None, &CustomFieldParams::new()).unwrap(), None);
    }

    #[test]
    fn test_params_from_option_value() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        let context = SearchContext::global();

        let keyboard = query(Operator::Equals, Operand::string("keyboard"));
        assert_eq!(
            reconciler.params_from_search_request(None, &keyboard, &context).unwrap(),
            Some(params("20", Some("40")))
        );

        let software = query(Operator::Equals, Operand::string("Software"));
        assert_eq!(
            reconciler.params_from_search_request(None, &software, &context).unwrap(),
            Some(params("30", None))
        );

        let unknown = query(Operator::Equals, Operand::string("Tablet"));
        assert_eq!(
            reconciler.params_from_search_request(None, &unknown, &context).unwrap(),
            Some(params("Tablet", None))
        );
    }

    #[test]
    fn test_params_from_cascade_function() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        let context = SearchContext::global();

        let child = query(Operator::In, cascade(&["Hardware", "Mouse"]));
        assert_eq!(
            reconciler.params_from_search_request(None, &child, &context).unwrap(),
            Some(params("Hardware", Some("Mouse")))
        );

        let parent = query(Operator::In, cascade(&["20"]));
        assert_eq!(
            reconciler.params_from_search_request(None, &parent, &context).unwrap(),
            Some(params("20", None))
        );
    }

    /// The function expands to the selected option plus, for a parent, all its children
    fn expanding_reconciler(fixture: &Fixture) -> CascadingSelectReconciler {
        let resolver = LiteralOperandResolver::new().with_function("cascadeOption", |_, function, _| {
            let ids: Vec<Id> = match function.args.as_slice() {
                [parent] if parent == "20" => vec![20, 40, 41],
                [parent] => vec![parent.parse().ok()?],
                [_, child] => vec![child.parse().ok()?],
                _ => return None,
            };
            Some(ids.into_iter().map(QueryLiteral::Long).collect())
        });
        let mut services = fixture.services();
        services.operand_resolver = Arc::new(resolver);
        CascadingSelectReconciler::new(field(CASCADE_FIELD, FieldType::Cascading), services)
    }

    #[test]
    fn test_expanded_cascade_function() {
        let fixture = fixture();
        let reconciler = expanding_reconciler(&fixture);
        let context = SearchContext::global();

        // several literals: the arguments are read directly
        let parent = query(Operator::In, cascade(&["20"]));
        assert_eq!(
            reconciler.params_from_search_request(None, &parent, &context).unwrap(),
            Some(params("20", None))
        );

        // one literal: the option it names decides parent and child
        let child = query(Operator::In, cascade(&["20", "40"]));
        assert_eq!(
            reconciler.params_from_search_request(None, &child, &context).unwrap(),
            Some(params("20", Some("40")))
        );

        let software = query(Operator::In, cascade(&["30"]));
        assert_eq!(
            reconciler.params_from_search_request(None, &software, &context).unwrap(),
            Some(params("30", None))
        );
    }

    #[test]
    fn test_cascade_function_that_cannot_be_shown() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        let context = SearchContext::global();
        for operand in [
            cascade(&["20", "none"]),
            cascade(&["none"]),
            cascade(&["Tablet"]),
            cascade(&[]),
            cascade(&["20", "40", "41"]),
            Operand::function("currentUser", vec![]),
        ] {
            let query = query(Operator::In, operand);
            assert_eq!(
                reconciler.params_from_search_request(None, &query, &context).unwrap(),
                None,
                "{}",
                query.jql()
            );
        }
    }

    #[test]
    fn test_params_reject_empty_and_lists() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        let context = SearchContext::global();

        let empty = query(Operator::Is, Operand::Empty);
        assert_eq!(reconciler.params_from_search_request(None, &empty, &context).unwrap(), None);

        let list = query(Operator::In, Operand::multi(vec!["Keyboard", "Mouse"]));
        assert_eq!(reconciler.params_from_search_request(None, &list, &context).unwrap(), None);
    }

    #[test]
    fn test_round_trip() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        for original in [
            params("20", Some("40")),
            params("20", None),
            params("30", None),
            params("Tablet", None),
        ] {
            let clause = reconciler.clause_from_params(None, &original).unwrap();
            let query = query_of(clause);
            assert_eq!(
                reconciler
                    .params_from_search_request(None, &query, &SearchContext::global())
                    .unwrap(),
                Some(original)
            );
        }
    }

    #[test]
    fn test_validate_clause() {
        let fixture = fixture();
        let reconciler = reconciler(&fixture);
        let valid = FunctionOperand::new("cascadeOption", vec!["20".into(), "40".into()]);
        assert!(reconciler.validate_clause(&valid).unwrap().is_empty());
        let invalid = FunctionOperand::new("cascadeOption", vec!["30".into(), "40".into()]);
        assert_eq!(reconciler.validate_clause(&invalid).unwrap().len(), 1);
    }

    #[test]
    fn test_option_fault_propagates() {
        let fixture = fixture();
        fixture.options.fail_with("index offline");
        let reconciler = reconciler(&fixture);
        assert!(reconciler
            .clause_from_params(None, &params("20", None))
            .unwrap_err()
            .is_collaborator_fault());
        let keyboard = query(Operator::Equals, Operand::string("Keyboard"));
        assert!(reconciler
            .params_from_search_request(None, &keyboard, &SearchContext::global())
            .is_err());
    }
}
