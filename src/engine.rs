/// Filter Engine
///
/// Turns a record collection and a `FilterMapping` into the rows to display.
/// Column filters run as a pipeline in mapping order: each column only sees the
/// rows that survived the columns before it. Nothing here mutates its inputs;
/// results borrow the caller's records.

use crate::mapping::FilterMapping;
use crate::state::{ColumnFilterState, SortDirection};
use crate::value::{field, FieldValue, Record};
use std::cmp::Ordering;

/// Applies every column filter in `filters`, in order, to `records`.
///
/// # Examples
///
/// ```
/// use tablefilter::{apply_filters, record, ColumnFilterState, FieldValue, FilterMapping, SortDirection};
///
/// let records = vec![
///     record([("name", FieldValue::from("Bob")), ("age", FieldValue::Int(30))]),
///     record([("name", FieldValue::from("Ann")), ("age", FieldValue::Int(25))]),
/// ];
/// let filters = FilterMapping::new()
///     .with_column(ColumnFilterState::empty("age").set_sort(SortDirection::Ascending));
///
/// let rows = apply_filters(&records, &filters);
/// assert_eq!(rows[0]["name"].as_string(), Some("Ann"));
/// ```
pub fn apply_filters<'a>(records: &'a [Record], filters: &FilterMapping) -> Vec<&'a Record> {
    run_pipeline(records, filters)
        .into_iter()
        .map(|(_, row)| row)
        .collect()
}

/// Same pipeline as [`apply_filters`], reported as positions into `records`.
pub fn filter_indices(records: &[Record], filters: &FilterMapping) -> Vec<usize> {
    run_pipeline(records, filters)
        .into_iter()
        .map(|(index, _)| index)
        .collect()
}

/// Working rows carry their input position alongside the borrowed record.
type Rows<'a> = Vec<(usize, &'a Record)>;

fn run_pipeline<'a>(records: &'a [Record], filters: &FilterMapping) -> Rows<'a> {
    let mut working: Rows<'a> = records.iter().enumerate().collect();

    for (column_id, state) in filters.iter() {
        if working.is_empty() {
            log::trace!("pipeline empty, skipping remaining columns from '{}'", column_id);
            break;
        }
        working = column_pass(working, column_id, state);
        log::debug!("column '{}' filter left {} rows", column_id, working.len());
    }

    working
}

/// Applies one column's state to the working rows.
///
/// A non-empty selection wins over the search query. Sorting, when requested,
/// runs on whatever survived and is stable.
pub fn apply_column_filter<'a>(
    records: Vec<&'a Record>,
    column_id: &str,
    state: &ColumnFilterState,
) -> Vec<&'a Record> {
    let rows: Rows<'a> = records.into_iter().enumerate().collect();
    column_pass(rows, column_id, state)
        .into_iter()
        .map(|(_, row)| row)
        .collect()
}

fn column_pass<'a>(rows: Rows<'a>, column_id: &str, state: &ColumnFilterState) -> Rows<'a> {
    let mut rows: Rows<'a> = if state.has_selection() {
        rows.into_iter()
            .filter(|(_, row)| matches_selection(row, column_id, &state.selected_keys))
            .collect()
    } else if state.has_search() {
        let query = state.normalized_query();
        rows.into_iter()
            .filter(|(_, row)| contains_query(row, column_id, &query))
            .collect()
    } else {
        rows
    };

    if state.has_sort() {
        sort_rows(&mut rows, column_id, state.sort_direction);
    }

    rows
}

/// True when the record's value is one of the selected keys.
///
/// Missing values never match.
pub fn matches_selection(record: &Record, column_id: &str, selected_keys: &[FieldValue]) -> bool {
    match field(record, column_id) {
        Some(value) => selected_keys.contains(value),
        None => false,
    }
}

/// Case-insensitive substring test against the value's text.
///
/// `query` is trimmed and lower-cased first. A blank query matches
/// everything; a missing value matches nothing else.
pub fn matches_search(record: &Record, column_id: &str, query: &str) -> bool {
    contains_query(record, column_id, &query.trim().to_lowercase())
}

/// [`matches_search`] for a query that is already normalized.
pub(crate) fn contains_query(record: &Record, column_id: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    match field(record, column_id) {
        Some(value) => value.to_text().to_lowercase().contains(query),
        None => false,
    }
}

/// Precomputed sort key for one row
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    /// Missing value in a numeric column, ordered before every number
    Missing,
    Number(FieldValue),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
            (SortKey::Missing, _) => Ordering::Less,
            (_, SortKey::Missing) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.numeric_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // Keys for one pass are built in a single mode, never mixed
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Builds the keys for a column: numeric when every present value is a
/// number, stringified otherwise.
fn sort_keys(rows: &[(usize, &Record)], column_id: &str) -> Vec<SortKey> {
    let numeric = rows
        .iter()
        .filter_map(|(_, row)| field(row, column_id))
        .all(|value| value.is_numeric());

    rows.iter()
        .map(|(_, row)| match (field(row, column_id), numeric) {
            (Some(value), true) => SortKey::Number(value.clone()),
            (None, true) => SortKey::Missing,
            (Some(value), false) => SortKey::Text(value.to_text()),
            (None, false) => SortKey::Text(String::new()),
        })
        .collect()
}

fn sort_rows(rows: &mut Rows<'_>, column_id: &str, direction: SortDirection) {
    let keys = sort_keys(rows, column_id);
    let mut keyed: Vec<(SortKey, (usize, &Record))> = keys.into_iter().zip(rows.iter().copied()).collect();

    // slice::sort_by is stable, so equal keys keep their input order both ways
    match direction {
        SortDirection::Ascending => keyed.sort_by(|a, b| a.0.compare(&b.0)),
        SortDirection::Descending => keyed.sort_by(|a, b| b.0.compare(&a.0)),
        SortDirection::None => return,
    }

    for (slot, (_, row)) in rows.iter_mut().zip(keyed) {
        *slot = row;
    }
}
