/// TableFilter - Column Filtering for Tabular Views
///
/// Per-column search, selection and sort state composed into a deterministic
/// pipeline that turns a record collection into the rows a table should show.
/// Column filters apply one after another in mapping order, so each column
/// narrows the output of the column before it.

pub mod value;
pub mod state;
pub mod mapping;
pub mod engine;
pub mod selection;
pub mod events;

pub use value::{field, record, records_from_json, FieldValue, Record};
pub use state::{ColumnConfig, ColumnFilterState, SortDirection, ValueKind};
pub use mapping::FilterMapping;
pub use engine::{apply_column_filter, apply_filters, filter_indices, matches_search, matches_selection};
pub use selection::{candidate_values, selection_candidates, sort_candidates};
pub use events::{ColumnFilter, FilterEvent};

// Python bindings - only when python feature is enabled
#[cfg(feature = "python")]
mod python_bindings;
#[cfg(feature = "python")]
pub use python_bindings::*;
