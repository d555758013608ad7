//! Indexed input helper
//!
//! Project and version fields store entity ids in the form. Clauses carry the ids as numbers;
//! literals in a query may name the entity instead and are mapped back to ids here.

use std::collections::BTreeSet;

use jq_context::ProjectResolver;
use jq_core::{parse_id, Id, SearchResult};
use jq_query::QueryLiteral;
use tracing::debug;

use crate::lookups::VersionResolver;

/// Maps a literal to the ids it denotes
pub trait IdIndex {
    fn ids_for_literal(&self, literal: &QueryLiteral) -> SearchResult<Vec<Id>>;
}

/// Projects by id, key or name
pub struct ProjectIndex<'a> {
    projects: &'a dyn ProjectResolver,
}

impl<'a> ProjectIndex<'a> {
    pub fn new(projects: &'a dyn ProjectResolver) -> Self {
        Self { projects }
    }
}

impl IdIndex for ProjectIndex<'_> {
    fn ids_for_literal(&self, literal: &QueryLiteral) -> SearchResult<Vec<Id>> {
        match literal {
            QueryLiteral::Long(id) => match self.projects.by_id(*id)? {
                Some(project) => Ok(vec![project.id]),
                None => self.projects.ids_for_name(&id.to_string()),
            },
            QueryLiteral::String(name) => {
                let ids = self.projects.ids_for_name(name)?;
                match parse_id(name) {
                    Some(id) if ids.is_empty() => {
                        Ok(self.projects.by_id(id)?.map(|p| p.id).into_iter().collect())
                    }
                    _ => Ok(ids),
                }
            }
            QueryLiteral::Empty => Ok(Vec::new()),
        }
    }
}

/// Versions by id or name, names limited to the selected projects when there are any
pub struct VersionIndex<'a> {
    versions: &'a dyn VersionResolver,
    project_ids: &'a [Id],
}

impl<'a> VersionIndex<'a> {
    pub fn new(versions: &'a dyn VersionResolver, project_ids: &'a [Id]) -> Self {
        Self {
            versions,
            project_ids,
        }
    }

    fn ids_for_name(&self, name: &str) -> SearchResult<Vec<Id>> {
        Ok(self
            .versions
            .versions_for_name(name)?
            .into_iter()
            .filter(|v| self.project_ids.is_empty() || self.project_ids.contains(&v.project_id))
            .map(|v| v.id)
            .collect())
    }
}

impl IdIndex for VersionIndex<'_> {
    fn ids_for_literal(&self, literal: &QueryLiteral) -> SearchResult<Vec<Id>> {
        match literal {
            QueryLiteral::Long(id) => match self.versions.by_id(*id)? {
                Some(version) => Ok(vec![version.id]),
                None => self.ids_for_name(&id.to_string()),
            },
            QueryLiteral::String(name) => {
                let ids = self.ids_for_name(name)?;
                match parse_id(name) {
                    Some(id) if ids.is_empty() => {
                        Ok(self.versions.by_id(id)?.map(|v| v.id).into_iter().collect())
                    }
                    _ => Ok(ids),
                }
            }
            QueryLiteral::Empty => Ok(Vec::new()),
        }
    }
}

/// Form values for literals of a multi-valued field
///
/// A literal naming several entities selects all of them; one naming none is kept raw.
/// EMPTY cannot be shown.
pub fn navigator_values(
    index: &dyn IdIndex,
    literals: &[QueryLiteral],
) -> SearchResult<Option<BTreeSet<String>>> {
    let mut values = BTreeSet::new();
    for literal in literals {
        let Some(raw) = literal.as_string() else {
            return Ok(None);
        };
        let ids = index.ids_for_literal(literal)?;
        if ids.is_empty() {
            values.insert(raw);
        } else {
            values.extend(ids.into_iter().map(|id| id.to_string()));
        }
    }
    Ok(Some(values))
}

/// Form value for the literal of a single-valued field
///
/// `Ok(None)` when the literal names more than one entity.
pub fn single_navigator_value(
    index: &dyn IdIndex,
    literal: &QueryLiteral,
) -> SearchResult<Option<String>> {
    let Some(raw) = literal.as_string() else {
        return Ok(None);
    };
    let ids = index.ids_for_literal(literal)?;
    match ids.as_slice() {
        [] => Ok(Some(raw)),
        [id] => Ok(Some(id.to_string())),
        _ => {
            debug!(literal = %literal, matches = ids.len(), "literal names several entities");
            Ok(None)
        }
    }
}
