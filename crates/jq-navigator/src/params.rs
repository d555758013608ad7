//! Navigator form values for one custom field
//!
//! Values are grouped by sub-key. Flat fields use the null key only; each reconciler owns the
//! meaning of any other key.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomFieldParams {
    values: BTreeMap<Option<String>, BTreeSet<String>>,
}

impl CustomFieldParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Params holding `values` under the null key
    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().with(None, values)
    }

    /// Builder form of [`put`](Self::put)
    pub fn with<I, S>(mut self, key: Option<&str>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.put(key, values);
        self
    }

    /// Replace the values under `key`; an empty value list removes the key
    pub fn put<I, S>(&mut self, key: Option<&str>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        let key = key.map(str::to_string);
        if values.is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, values);
        }
    }

    pub fn add_value(&mut self, key: Option<&str>, value: impl Into<String>) {
        self.values
            .entry(key.map(str::to_string))
            .or_default()
            .insert(value.into());
    }

    pub fn values_for(&self, key: Option<&str>) -> Option<&BTreeSet<String>> {
        self.values.get(&key.map(str::to_string))
    }

    pub fn values_for_null_key(&self) -> Option<&BTreeSet<String>> {
        self.values_for(None)
    }

    pub fn first_value_for(&self, key: Option<&str>) -> Option<&str> {
        self.values_for(key)
            .and_then(|values| values.iter().next())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: Option<&str>) -> bool {
        self.values_for(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = Option<&str>> {
        self.values.keys().map(|k| k.as_deref())
    }

    /// Every value regardless of key
    pub fn all_values(&self) -> BTreeSet<&str> {
        self.values
            .values()
            .flat_map(|values| values.iter().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
