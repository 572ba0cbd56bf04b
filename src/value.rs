/// Field values and records
///
/// A Record is one row of tabular data: a flat, insertion-ordered mapping from
/// field name to a scalar `FieldValue`. Records are not bound to a schema; the
/// filter engine only ever looks up the one field a column filter governs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 2^63, the first float above every `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// One row of data, keyed by field name.
pub type Record = IndexMap<String, FieldValue>;

/// Scalar value stored in a record field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Null,
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Int(_) | FieldValue::Float(_))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Total numeric order: integers compare exactly, Int/Float pairs by
    /// exact value, and NaN after every other number.
    ///
    /// `None` unless both values are numeric.
    pub fn numeric_cmp(&self, other: &FieldValue) -> Option<Ordering> {
        let ordering = match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            },
            (FieldValue::Int(i), FieldValue::Float(f)) => {
                compare_int_float(*i, *f).unwrap_or(Ordering::Less)
            }
            (FieldValue::Float(f), FieldValue::Int(i)) => {
                compare_int_float(*i, *f).map_or(Ordering::Greater, Ordering::reverse)
            }
            _ => return None,
        };
        Some(ordering)
    }

    pub(crate) fn key(&self) -> ValueKey {
        match self {
            FieldValue::Int(v) => ValueKey::Int(*v),
            FieldValue::Float(v) if v.fract() == 0.0 && *v >= -I64_BOUND && *v < I64_BOUND => {
                ValueKey::Int(*v as i64)
            }
            FieldValue::Float(v) => ValueKey::Float(v.to_bits()),
            FieldValue::Bool(v) => ValueKey::Bool(*v),
            FieldValue::String(v) => ValueKey::String(v.clone()),
            FieldValue::Null => ValueKey::Null,
        }
    }

    /// Textual representation used for search matching and string sorting.
    ///
    /// `Null` renders as the empty string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Converts a JSON value into a field value.
    ///
    /// Only scalars are accepted; arrays and objects are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        use serde_json::Value as JsonValue;
        match value {
            JsonValue::Null => Ok(FieldValue::Null),
            JsonValue::Bool(b) => Ok(FieldValue::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(FieldValue::Float(f))
                } else {
                    Err(format!("Number {} is out of range", n))
                }
            }
            JsonValue::String(s) => Ok(FieldValue::String(s.clone())),
            JsonValue::Array(_) => Err("Arrays are not valid field values".to_string()),
            JsonValue::Object(_) => Err("Objects are not valid field values".to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Int(v) => serde_json::Value::from(*v),
            FieldValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(v) => serde_json::Value::Bool(*v),
            FieldValue::String(v) => serde_json::Value::String(v.clone()),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::String(v) => f.write_str(v),
            FieldValue::Null => Ok(()),
        }
    }
}

/// Numbers compare by value regardless of Int/Float representation.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Int(i), FieldValue::Float(f)) | (FieldValue::Float(f), FieldValue::Int(i)) => {
                compare_int_float(*i, *f) == Some(Ordering::Equal)
            }
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Null, FieldValue::Null) => true,
            _ => false,
        }
    }
}

/// Compares an integer with a float by exact value, without widening the
/// integer to f64. `None` when `f` is NaN.
fn compare_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if f < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    // In range, so the integral part converts to i64 exactly
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&f),
        ordering => Some(ordering),
    }
}

/// Hashable stand-in for a `FieldValue`, equal exactly when the values are.
///
/// Integral floats in `i64` range fold into `Int`, so `Int(25)` and
/// `Float(25.0)` share a key. NaN keys compare by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    String(String),
    Null,
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

/// Looks up `field` on a record, treating `Null` the same as an absent field.
pub fn field<'a>(record: &'a Record, field: &str) -> Option<&'a FieldValue> {
    record.get(field).filter(|v| !v.is_null())
}

/// Parses a JSON array of flat objects into records.
pub fn records_from_json(value: &serde_json::Value) -> Result<Vec<Record>, String> {
    let rows = value
        .as_array()
        .ok_or_else(|| "Expected a JSON array of records".to_string())?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let object = row
            .as_object()
            .ok_or_else(|| format!("Record {} is not a JSON object", index))?;
        let mut record = Record::with_capacity(object.len());
        for (name, value) in object {
            let value = FieldValue::from_json(value)
                .map_err(|e| format!("Record {}, field '{}': {}", index, name, e))?;
            record.insert(name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Builds a record from `(field, value)` pairs, preserving their order.
pub fn record<I, K, V>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
