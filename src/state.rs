/// Per-column filter state
///
/// A `ColumnFilterState` is an immutable value: every update function returns a
/// new state and leaves the receiver untouched. The presentation layer decides
/// when a draft becomes committed by merging it into a `FilterMapping`.

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sort direction for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Do not sort by this column
    #[default]
    #[serde(rename = "none")]
    None,
    /// Smallest first
    #[serde(rename = "ascend", alias = "asc", alias = "ascending")]
    Ascending,
    /// Largest first
    #[serde(rename = "descend", alias = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    /// Parse a sort direction from a string.
    ///
    /// Accepts: "none", "ascend"/"asc"/"ascending", "descend"/"desc"/"descending"
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(SortDirection::None),
            "ascend" | "asc" | "ascending" => Ok(SortDirection::Ascending),
            "descend" | "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "Unknown sort direction: '{}'. Use 'none', 'ascend' or 'descend'",
                s
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::None => "none",
            SortDirection::Ascending => "ascend",
            SortDirection::Descending => "descend",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, SortDirection::None)
    }
}

/// Filter, sort and selection configuration for one column.
///
/// A state whose three criteria are all inactive (blank search, no sort, no
/// selected keys) is *empty* and has no effect on the filtered view.
///
/// # Examples
///
/// ```
/// use tablefilter::{ColumnFilterState, SortDirection};
///
/// let state = ColumnFilterState::empty("name")
///     .set_search_query("king")
///     .set_sort(SortDirection::Ascending);
/// assert!(!state.is_empty());
/// assert!(state.clear().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilterState {
    #[serde(default)]
    pub column_id: String,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
    #[serde(default)]
    pub selected_keys: Vec<FieldValue>,
}

impl ColumnFilterState {
    /// Creates the empty state for a column
    pub fn empty(column_id: impl Into<String>) -> Self {
        ColumnFilterState {
            column_id: column_id.into(),
            search_query: String::new(),
            sort_direction: SortDirection::None,
            selected_keys: Vec::new(),
        }
    }

    pub fn set_search_query(&self, text: impl Into<String>) -> Self {
        ColumnFilterState {
            search_query: text.into(),
            ..self.clone()
        }
    }

    pub fn set_sort(&self, direction: SortDirection) -> Self {
        ColumnFilterState {
            sort_direction: direction,
            ..self.clone()
        }
    }

    /// Replaces the selected keys. Duplicates are dropped, first one kept.
    pub fn set_selection<I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        let mut seen = HashSet::new();
        let selected_keys: Vec<FieldValue> = keys
            .into_iter()
            .filter(|key| seen.insert(key.key()))
            .collect();
        ColumnFilterState {
            selected_keys,
            ..self.clone()
        }
    }

    /// Resets every criterion, keeping the column id
    pub fn clear(&self) -> Self {
        ColumnFilterState::empty(self.column_id.clone())
    }

    /// The trimmed, lower-cased search query; empty when search is inactive.
    pub fn normalized_query(&self) -> String {
        self.search_query.trim().to_lowercase()
    }

    pub fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_keys.is_empty()
    }

    pub fn has_sort(&self) -> bool {
        !self.sort_direction.is_none()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_search() && !self.has_sort() && !self.has_selection()
    }

    pub fn is_active(&self) -> bool {
        !self.is_empty()
    }
}

/// How a column's values should be ordered in the selection list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    #[default]
    String,
    Number,
}

impl ValueKind {
    /// Accepts: "string", "number"
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "string" => Ok(ValueKind::String),
            "number" => Ok(ValueKind::Number),
            _ => Err(format!(
                "Unknown value kind: '{}'. Use 'string' or 'number'",
                s
            )),
        }
    }
}

/// Which filter widgets a column offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnConfig {
    pub show_sorting: bool,
    pub show_search: bool,
    pub show_selection: bool,
    pub value_kind: ValueKind,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            show_sorting: true,
            show_search: true,
            show_selection: true,
            value_kind: ValueKind::String,
        }
    }
}

impl ColumnConfig {
    /// Sort-only column, e.g. a numeric age column
    pub fn sort_only(value_kind: ValueKind) -> Self {
        ColumnConfig {
            show_sorting: true,
            show_search: false,
            show_selection: false,
            value_kind,
        }
    }

    pub fn with_value_kind(mut self, value_kind: ValueKind) -> Self {
        self.value_kind = value_kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = ColumnFilterState::empty("age");
        assert_eq!(state.column_id, "age");
        assert!(state.is_empty());
        assert!(!state.is_active());
    }

    #[test]
    fn test_transitions() {
        let empty = ColumnFilterState::empty("name");

        assert!(empty.set_search_query("king").is_active());
        assert!(empty.set_search_query("   ").is_empty());
        assert!(empty.set_sort(SortDirection::Descending).is_active());
        assert!(empty.set_sort(SortDirection::None).is_empty());
        assert!(empty.set_selection(vec![FieldValue::from("Male")]).is_active());
        assert!(empty.set_selection(Vec::new()).is_empty());
    }

    #[test]
    fn test_updates_do_not_mutate_receiver() {
        let original = ColumnFilterState::empty("name").set_search_query("queen");
        let sorted = original.set_sort(SortDirection::Ascending);

        assert_eq!(original.sort_direction, SortDirection::None);
        assert_eq!(sorted.search_query, "queen");
        assert_eq!(sorted.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_clear_keeps_column_id() {
        let state = ColumnFilterState::empty("gender")
            .set_search_query("ma")
            .set_sort(SortDirection::Ascending)
            .set_selection(vec![FieldValue::from("Male")]);

        let cleared = state.clear();
        assert!(cleared.is_empty());
        assert_eq!(cleared, ColumnFilterState::empty("gender"));
    }

    #[test]
    fn test_selection_deduplicates() {
        let state = ColumnFilterState::empty("age").set_selection(vec![
            FieldValue::Int(25),
            FieldValue::Float(25.0),
            FieldValue::Int(30),
        ]);
        assert_eq!(state.selected_keys, vec![FieldValue::Int(25), FieldValue::Int(30)]);

        let big = 1_i64 << 53;
        let distinct = ColumnFilterState::empty("n")
            .set_selection(vec![FieldValue::Int(big + 1), FieldValue::Float(big as f64)]);
        assert_eq!(distinct.selected_keys.len(), 2);
    }

    #[test]
    fn test_normalized_query() {
        let state = ColumnFilterState::empty("name").set_search_query("  KiNg ");
        assert_eq!(state.normalized_query(), "king");
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!(SortDirection::from_str("ascend").unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::from_str("DESC").unwrap(), SortDirection::Descending);
        assert_eq!(SortDirection::from_str("none").unwrap(), SortDirection::None);
        assert!(SortDirection::from_str("sideways").is_err());
    }

    #[test]
    fn test_state_json_shape() {
        let state = ColumnFilterState::empty("age").set_sort(SortDirection::Ascending);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columnId": "age",
                "searchQuery": "",
                "sortDirection": "ascend",
                "selectedKeys": []
            })
        );

        let parsed: ColumnFilterState =
            serde_json::from_str(r#"{"columnId": "age", "sortDirection": "desc"}"#).unwrap();
        assert_eq!(parsed.sort_direction, SortDirection::Descending);
        assert!(parsed.search_query.is_empty());
    }

    #[test]
    fn test_column_config_defaults() {
        let config = ColumnConfig::default();
        assert!(config.show_sorting && config.show_search && config.show_selection);
        assert_eq!(config.value_kind, ValueKind::String);

        let parsed: ColumnConfig =
            serde_json::from_str(r#"{"showSearch": false, "valueKind": "number"}"#).unwrap();
        assert!(!parsed.show_search);
        assert!(parsed.show_selection);
        assert_eq!(parsed.value_kind, ValueKind::Number);
        assert_eq!(ValueKind::from_str("Number").unwrap(), ValueKind::Number);

        let json = serde_json::to_value(ColumnConfig::sort_only(ValueKind::Number)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "showSorting": true,
                "showSearch": false,
                "showSelection": false,
                "valueKind": "number"
            })
        );
    }
}
