/// Ordered filter mapping
///
/// Maps column ids to their `ColumnFilterState`. Iteration order is the order in
/// which the engine applies column filters, so entries keep their position when
/// they are replaced and new columns are appended at the end.

use crate::state::ColumnFilterState;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterMapping {
    entries: IndexMap<String, ColumnFilterState>,
}

impl FilterMapping {
    pub fn new() -> Self {
        FilterMapping {
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, column_id: &str) -> Option<&ColumnFilterState> {
        self.entries.get(column_id)
    }

    /// The column's stored state, or an empty state when the column has none.
    pub fn resolve(&self, column_id: &str) -> ColumnFilterState {
        self.entries
            .get(column_id)
            .cloned()
            .unwrap_or_else(|| ColumnFilterState::empty(column_id))
    }

    /// Returns a new mapping with `state` merged under its column id.
    ///
    /// An existing entry is replaced in place; a new column goes last.
    pub fn with_column(&self, state: ColumnFilterState) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(state.column_id.clone(), state);
        FilterMapping { entries }
    }

    /// Returns a new mapping without the column's entry
    pub fn without_column(&self, column_id: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.shift_remove(column_id);
        FilterMapping { entries }
    }

    /// Entries in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnFilterState)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn column_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Column ids whose state is not empty, in application order
    pub fn active_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, state)| state.is_active())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Parses a JSON object of column states. Entries without a `columnId`
    /// take their key.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let mut entries: IndexMap<String, ColumnFilterState> = serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid filter mapping: {}", e))?;
        for (key, state) in entries.iter_mut() {
            if state.column_id.is_empty() {
                state.column_id = key.clone();
            }
        }
        Ok(FilterMapping { entries })
    }
}

impl FromIterator<ColumnFilterState> for FilterMapping {
    fn from_iter<T: IntoIterator<Item = ColumnFilterState>>(iter: T) -> Self {
        let entries = iter
            .into_iter()
            .map(|state| (state.column_id.clone(), state))
            .collect();
        FilterMapping { entries }
    }
}
