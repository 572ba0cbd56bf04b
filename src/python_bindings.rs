/// Python bindings for TableFilter using PyO3
///
/// Records cross the boundary as lists of dicts with scalar values
/// (None, bool, int, float, str).

use pyo3::prelude::*;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::types::{PyBool, PyDict, PyList};

use crate::engine::apply_filters as rust_apply_filters;
use crate::mapping::FilterMapping as RustFilterMapping;
use crate::selection::selection_candidates as rust_selection_candidates;
use crate::state::{ColumnFilterState as RustColumnFilterState, SortDirection as RustSortDirection};
use crate::value::{FieldValue, Record};

// ============================================================================
// Value Conversions
// ============================================================================

fn py_to_field_value(value: &Bound<'_, PyAny>) -> PyResult<FieldValue> {
    if value.is_none() {
        return Ok(FieldValue::Null);
    }

    // Bool must be checked before int (bool is subclass of int in Python)
    if value.is_instance_of::<PyBool>() {
        return Ok(FieldValue::Bool(value.extract::<bool>()?));
    }
    if let Ok(v) = value.extract::<i64>() {
        return Ok(FieldValue::Int(v));
    }
    if let Ok(v) = value.extract::<f64>() {
        return Ok(FieldValue::Float(v));
    }
    if let Ok(v) = value.extract::<String>() {
        return Ok(FieldValue::String(v));
    }

    Err(PyTypeError::new_err(format!(
        "Unsupported field value type: {}",
        value.get_type().name()?
    )))
}

fn field_value_to_py(py: Python, value: &FieldValue) -> PyObject {
    match value {
        FieldValue::Int(v) => v.to_object(py),
        FieldValue::Float(v) => v.to_object(py),
        FieldValue::Bool(v) => v.to_object(py),
        FieldValue::String(v) => v.to_object(py),
        FieldValue::Null => py.None(),
    }
}

fn py_to_records(rows: &Bound<'_, PyList>) -> PyResult<Vec<Record>> {
    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let dict = row
            .downcast::<PyDict>()
            .map_err(|_| PyTypeError::new_err(format!("Record {} is not a dict", index)))?;
        let mut record = Record::with_capacity(dict.len());
        for (key, value) in dict.iter() {
            let name: String = key.extract()?;
            record.insert(name, py_to_field_value(&value)?);
        }
        records.push(record);
    }
    Ok(records)
}

fn record_to_py(py: Python, record: &Record) -> PyResult<PyObject> {
    let dict = PyDict::new_bound(py);
    for (name, value) in record {
        dict.set_item(name, field_value_to_py(py, value))?;
    }
    Ok(dict.into_any().unbind())
}

// ============================================================================
// Filter State
// ============================================================================

/// Python-exposed SortDirection enum
#[pyclass(name = "SortDirection")]
#[derive(Clone, Copy)]
pub struct PySortDirection {
    inner: RustSortDirection,
}

#[pymethods]
impl PySortDirection {
    #[classattr]
    const NONE: PySortDirection = PySortDirection { inner: RustSortDirection::None };

    #[classattr]
    const ASCENDING: PySortDirection = PySortDirection { inner: RustSortDirection::Ascending };

    #[classattr]
    const DESCENDING: PySortDirection = PySortDirection { inner: RustSortDirection::Descending };

    #[staticmethod]
    fn parse(text: &str) -> PyResult<Self> {
        RustSortDirection::from_str(text)
            .map(|inner| PySortDirection { inner })
            .map_err(PyValueError::new_err)
    }

    fn __repr__(&self) -> String {
        format!("SortDirection('{}')", self.inner.as_str())
    }

    fn __eq__(&self, other: &PySortDirection) -> bool {
        self.inner == other.inner
    }
}

/// Immutable per-column filter state; setters return a new object
#[pyclass(name = "ColumnFilterState")]
#[derive(Clone)]
pub struct PyColumnFilterState {
    inner: RustColumnFilterState,
}

#[pymethods]
impl PyColumnFilterState {
    #[new]
    fn new(column_id: String) -> Self {
        PyColumnFilterState {
            inner: RustColumnFilterState::empty(column_id),
        }
    }

    #[getter]
    fn column_id(&self) -> String {
        self.inner.column_id.clone()
    }

    #[getter]
    fn search_query(&self) -> String {
        self.inner.search_query.clone()
    }

    #[getter]
    fn sort_direction(&self) -> PySortDirection {
        PySortDirection { inner: self.inner.sort_direction }
    }

    #[getter]
    fn selected_keys(&self, py: Python) -> Vec<PyObject> {
        self.inner
            .selected_keys
            .iter()
            .map(|key| field_value_to_py(py, key))
            .collect()
    }

    fn set_search_query(&self, text: String) -> Self {
        PyColumnFilterState { inner: self.inner.set_search_query(text) }
    }

    fn set_sort(&self, direction: &PySortDirection) -> Self {
        PyColumnFilterState { inner: self.inner.set_sort(direction.inner) }
    }

    fn set_selection(&self, keys: &Bound<'_, PyList>) -> PyResult<Self> {
        let keys = keys
            .iter()
            .map(|key| py_to_field_value(&key))
            .collect::<PyResult<Vec<FieldValue>>>()?;
        Ok(PyColumnFilterState { inner: self.inner.set_selection(keys) })
    }

    fn clear(&self) -> Self {
        PyColumnFilterState { inner: self.inner.clear() }
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn __repr__(&self) -> String {
        format!(
            "ColumnFilterState(column_id='{}', search_query='{}', sort_direction='{}', selected_keys={})",
            self.inner.column_id,
            self.inner.search_query,
            self.inner.sort_direction.as_str(),
            self.inner.selected_keys.len()
        )
    }
}

/// Ordered mapping of column id to filter state
#[pyclass(name = "FilterMapping")]
#[derive(Clone, Default)]
pub struct PyFilterMapping {
    inner: RustFilterMapping,
}

#[pymethods]
impl PyFilterMapping {
    #[new]
    fn new() -> Self {
        PyFilterMapping::default()
    }

    /// Returns a new mapping with the state merged in
    fn with_column(&self, state: &PyColumnFilterState) -> Self {
        PyFilterMapping { inner: self.inner.with_column(state.inner.clone()) }
    }

    fn resolve(&self, column_id: &str) -> PyColumnFilterState {
        PyColumnFilterState { inner: self.inner.resolve(column_id) }
    }

    fn column_ids(&self) -> Vec<String> {
        self.inner.column_ids().map(|id| id.to_string()).collect()
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[staticmethod]
    fn from_json(text: &str) -> PyResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| PyValueError::new_err(format!("Invalid JSON: {}", e)))?;
        RustFilterMapping::from_json(&value)
            .map(|inner| PyFilterMapping { inner })
            .map_err(PyValueError::new_err)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Filter and sort a list of dict records
#[pyfunction]
#[pyo3(name = "apply_filters")]
fn py_apply_filters(
    py: Python,
    records: &Bound<'_, PyList>,
    filters: &PyFilterMapping,
) -> PyResult<Vec<PyObject>> {
    let records = py_to_records(records)?;
    rust_apply_filters(&records, &filters.inner)
        .into_iter()
        .map(|row| record_to_py(py, row))
        .collect()
}

/// Distinct-value rows for a column's selection list
#[pyfunction]
#[pyo3(name = "selection_candidates", signature = (records, column_id, live_search = ""))]
fn py_selection_candidates(
    py: Python,
    records: &Bound<'_, PyList>,
    column_id: &str,
    live_search: &str,
) -> PyResult<Vec<PyObject>> {
    let records = py_to_records(records)?;
    rust_selection_candidates(&records, column_id, live_search)
        .into_iter()
        .map(|row| record_to_py(py, row))
        .collect()
}

#[pymodule]
fn tablefilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySortDirection>()?;
    m.add_class::<PyColumnFilterState>()?;
    m.add_class::<PyFilterMapping>()?;

    m.add_function(wrap_pyfunction!(py_apply_filters, m)?)?;
    m.add_function(wrap_pyfunction!(py_selection_candidates, m)?)?;

    Ok(())
}
