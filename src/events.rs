/// Column filter controller and change events
///
/// A `ColumnFilter` holds the draft state of one column's filter popover. The
/// draft only reaches the shared `FilterMapping` through `apply` or `clear`,
/// each of which returns a `FilterEvent` carrying a freshly merged mapping for
/// the owning view to store.
///
/// # Usage Pattern
///
/// 1. The view creates one `ColumnFilter` per filterable column from its mapping
/// 2. User edits mutate the draft (`set_search_query`, `set_sort`, `set_selection`)
/// 3. `apply`/`clear` produce an event; the view replaces its mapping with `event.filters()`
/// 4. Other columns call `sync` with the new mapping

use crate::mapping::FilterMapping;
use crate::selection::{selection_candidates, sort_candidates};
use crate::state::{ColumnConfig, ColumnFilterState, SortDirection};
use crate::value::{FieldValue, Record};
use serde::Serialize;

/// Notification sent to the view when a column commits its filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum FilterEvent {
    /// The column's draft was merged into the mapping
    Applied {
        filters: FilterMapping,
        column: ColumnFilterState,
    },

    /// The column was reset to empty and merged into the mapping
    Cleared {
        filters: FilterMapping,
        column: ColumnFilterState,
    },
}

impl FilterEvent {
    /// The full mapping after the change
    pub fn filters(&self) -> &FilterMapping {
        match self {
            FilterEvent::Applied { filters, .. } => filters,
            FilterEvent::Cleared { filters, .. } => filters,
        }
    }

    /// The state of the column that changed
    pub fn column(&self) -> &ColumnFilterState {
        match self {
            FilterEvent::Applied { column, .. } => column,
            FilterEvent::Cleared { column, .. } => column,
        }
    }

    pub fn into_filters(self) -> FilterMapping {
        match self {
            FilterEvent::Applied { filters, .. } => filters,
            FilterEvent::Cleared { filters, .. } => filters,
        }
    }

    pub fn is_cleared(&self) -> bool {
        matches!(self, FilterEvent::Cleared { .. })
    }
}

/// Draft filter state for one column.
#[derive(Debug, Clone)]
pub struct ColumnFilter {
    config: ColumnConfig,
    draft: ColumnFilterState,
    visible: bool,
}

impl ColumnFilter {
    pub fn new(column_id: impl Into<String>, config: ColumnConfig, filters: &FilterMapping) -> Self {
        let column_id = column_id.into();
        ColumnFilter {
            config,
            draft: filters.resolve(&column_id),
            visible: false,
        }
    }

    pub fn column_id(&self) -> &str {
        &self.draft.column_id
    }

    pub fn config(&self) -> &ColumnConfig {
        &self.config
    }

    /// Current draft, possibly not yet applied
    pub fn draft(&self) -> &ColumnFilterState {
        &self.draft
    }

    /// Re-derives the draft from a mapping that changed elsewhere
    pub fn sync(&mut self, filters: &FilterMapping) {
        self.draft = filters.resolve(&self.draft.column_id);
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        if !self.config.show_search {
            log::debug!("column '{}' has no search box, ignoring query", self.column_id());
            return;
        }
        self.draft = self.draft.set_search_query(text);
    }

    pub fn set_sort(&mut self, direction: SortDirection) {
        if !self.config.show_sorting {
            log::debug!("column '{}' is not sortable, ignoring sort", self.column_id());
            return;
        }
        self.draft = self.draft.set_sort(direction);
    }

    pub fn set_selection<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = FieldValue>,
    {
        if !self.config.show_selection {
            log::debug!("column '{}' has no selection list, ignoring keys", self.column_id());
            return;
        }
        self.draft = self.draft.set_selection(keys);
    }

    /// Merges the draft into a new mapping and closes the popover
    pub fn apply(&mut self, filters: &FilterMapping) -> FilterEvent {
        self.visible = false;
        log::debug!("applying filter for column '{}'", self.column_id());
        FilterEvent::Applied {
            filters: filters.with_column(self.draft.clone()),
            column: self.draft.clone(),
        }
    }

    /// Resets the draft, merges it into a new mapping and closes the popover
    pub fn clear(&mut self, filters: &FilterMapping) -> FilterEvent {
        self.draft = self.draft.clear();
        self.visible = false;
        log::debug!("cleared filter for column '{}'", self.column_id());
        FilterEvent::Cleared {
            filters: filters.with_column(self.draft.clone()),
            column: self.draft.clone(),
        }
    }

    /// Whether the filter indicator should show as active
    pub fn is_filtered(&self) -> bool {
        self.draft.is_active()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Rows for the selection list, ordered per the column's value kind
    pub fn selection_candidates<'a>(&self, records: &'a [Record], live_search: &str) -> Vec<&'a Record> {
        let mut candidates = selection_candidates(records, self.column_id(), live_search);
        sort_candidates(&mut candidates, self.column_id(), self.config.value_kind);
        candidates
    }
}
