//! Option lookup
//!
//! Select-list options are configured per field and per (project, issue type) scope. Lookups
//! are restricted to the scope of the query being reconciled.

use parking_lot::RwLock;
use std::collections::BTreeMap;

use jq_context::{set_ops, ClauseContext, QueryContext};
use jq_core::{parse_id, FieldOption, Id, SearchError, SearchResult};
use jq_query::QueryLiteral;

/// Looks up the options of select-like custom fields
pub trait OptionLookup: Send + Sync {
    fn by_id(&self, id: Id) -> SearchResult<Option<FieldOption>>;

    /// Options of `field_id` matching `literal`
    ///
    /// `context` limits the search to options configured for an overlapping scope; `None`
    /// searches every configuration. String literals match option values, Long literals match
    /// ids. Unless `exact_only` is set, a miss is retried with the other interpretation.
    fn search(
        &self,
        field_id: Id,
        context: Option<&QueryContext>,
        literal: &QueryLiteral,
        exact_only: bool,
    ) -> SearchResult<Vec<FieldOption>>;
}

struct OptionConfig {
    field_id: Id,
    scope: ClauseContext,
    options: Vec<FieldOption>,
}

/// In-memory option store
pub struct MemoryOptionLookup {
    configs: RwLock<Vec<OptionConfig>>,
    failure: RwLock<Option<String>>,
}

impl Default for MemoryOptionLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOptionLookup {
    pub fn new() -> Self {
        Self {
            configs: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    /// Options of `field_id` available in every project and issue type
    pub fn add_options(&self, field_id: Id, options: impl IntoIterator<Item = FieldOption>) {
        self.add_scoped_options(field_id, ClauseContext::global(), options);
    }

    /// Options of `field_id` available in `scope` only
    pub fn add_scoped_options(
        &self,
        field_id: Id,
        scope: ClauseContext,
        options: impl IntoIterator<Item = FieldOption>,
    ) {
        self.configs.write().push(OptionConfig {
            field_id,
            scope,
            options: options.into_iter().collect(),
        });
    }

    /// Make every call fail, as a broken backing store would
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    fn check(&self) -> SearchResult<()> {
        match self.failure.read().as_ref() {
            Some(message) => Err(SearchError::collaborator("option-lookup", message.clone())),
            None => Ok(()),
        }
    }

    fn matching<F>(&self, field_id: Id, context: Option<&QueryContext>, predicate: F) -> Vec<FieldOption>
    where
        F: Fn(&FieldOption) -> bool,
    {
        let configs = self.configs.read();
        let mut found = BTreeMap::new();
        for config in configs.iter().filter(|c| c.field_id == field_id) {
            let in_scope = match context {
                None => true,
                Some(context) => {
                    !set_ops::intersect([&config.scope, context.clause_context()]).is_empty()
                }
            };
            if !in_scope {
                continue;
            }
            for option in config.options.iter().filter(|o| predicate(o)) {
                found.insert(option.id, option.clone());
            }
        }
        found.into_values().collect()
    }
}

impl OptionLookup for MemoryOptionLookup {
    fn by_id(&self, id: Id) -> SearchResult<Option<FieldOption>> {
        self.check()?;
        Ok(self
            .configs
            .read()
            .iter()
            .flat_map(|c| c.options.iter())
            .find(|o| o.id == id)
            .cloned())
    }

    fn search(
        &self,
        field_id: Id,
        context: Option<&QueryContext>,
        literal: &QueryLiteral,
        exact_only: bool,
    ) -> SearchResult<Vec<FieldOption>> {
        self.check()?;
        let by_value = |value: String| {
            move |o: &FieldOption| o.value.eq_ignore_ascii_case(value.trim())
        };
        let by_id = |id: Id| move |o: &FieldOption| o.id == id;

        let found = match literal {
            QueryLiteral::Empty => return Ok(Vec::new()),
            QueryLiteral::String(value) => {
                let found = self.matching(field_id, context, by_value(value.clone()));
                match parse_id(value) {
                    Some(id) if found.is_empty() && !exact_only => {
                        self.matching(field_id, context, by_id(id))
                    }
                    _ => found,
                }
            }
            QueryLiteral::Long(id) => {
                let found = self.matching(field_id, context, by_id(*id));
                if found.is_empty() && !exact_only {
                    self.matching(field_id, context, by_value(id.to_string()))
                } else {
                    found
                }
            }
        };
        Ok(found)
    }
}
