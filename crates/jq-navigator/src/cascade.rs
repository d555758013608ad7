//! Cascade option function
//!
//! `cascadeOption(parent)` selects a parent option and any of its children,
//! `cascadeOption(parent, child)` one child, `cascadeOption(parent, none)` the parent without
//! a child and `cascadeOption(none)` issues with no value at all.

use jq_core::config::NavigatorConfig;
use jq_core::{Id, SearchResult};
use jq_query::{FunctionOperand, Operand, QueryLiteral};

use crate::options::OptionLookup;

/// Positional arguments of a cascade function call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeArgs<'a> {
    pub parent: &'a str,
    pub child: Option<&'a str>,
}

impl<'a> CascadeArgs<'a> {
    /// One or two arguments; anything else is not a cascade selection
    pub fn parse(function: &'a FunctionOperand) -> Option<Self> {
        match function.args.as_slice() {
            [parent] => Some(Self {
                parent: parent.as_str(),
                child: None,
            }),
            [parent, child] => Some(Self {
                parent: parent.as_str(),
                child: Some(child.as_str()),
            }),
            _ => None,
        }
    }

    /// Either argument is the `none` keyword
    pub fn uses_none(&self, config: &NavigatorConfig) -> bool {
        config.is_none_keyword(self.parent) || self.child.is_some_and(|c| config.is_none_keyword(c))
    }
}

/// Function operand for a parent and optional child option id
pub fn cascade_operand(config: &NavigatorConfig, parent_id: Id, child_id: Option<Id>) -> Operand {
    let mut args = vec![parent_id.to_string()];
    args.extend(child_id.map(|id| id.to_string()));
    Operand::Function(FunctionOperand::new(config.cascade_function.clone(), args))
}

/// Validation messages for a cascade function call on `field_id`; empty when valid
pub fn validate_cascade_args(
    options: &dyn OptionLookup,
    config: &NavigatorConfig,
    field_id: Id,
    function: &FunctionOperand,
) -> SearchResult<Vec<String>> {
    let Some(args) = CascadeArgs::parse(function) else {
        return Ok(vec![format!(
            "Function '{}' expects between 1 and 2 arguments, but got {}.",
            function.name,
            function.args.len()
        )]);
    };

    if config.is_none_keyword(args.parent) {
        return Ok(match args.child {
            None => Vec::new(),
            Some(_) => vec![format!(
                "Function '{}': '{}' must be the only argument.",
                function.name, config.cascade_none_keyword
            )],
        });
    }

    let parent_literal = QueryLiteral::String(args.parent.to_string());
    let parents: Vec<_> = options
        .search(field_id, None, &parent_literal, false)?
        .into_iter()
        .filter(|o| !o.is_child())
        .collect();
    if parents.is_empty() {
        return Ok(vec![format!(
            "Function '{}': '{}' is not a parent option.",
            function.name, args.parent
        )]);
    }

    let Some(child) = args.child else {
        return Ok(Vec::new());
    };
    if config.is_none_keyword(child) {
        return Ok(Vec::new());
    }

    let child_literal = QueryLiteral::String(child.to_string());
    let is_child_of_parent = options
        .search(field_id, None, &child_literal, false)?
        .iter()
        .any(|o| o.parent_id().is_some_and(|p| parents.iter().any(|parent| parent.id == p)));
    if is_child_of_parent {
        Ok(Vec::new())
    } else {
        Ok(vec![format!(
            "Function '{}': '{}' is not a child of '{}'.",
            function.name, child, args.parent
        )])
    }
}
