/// Selection candidates
///
/// Builds the list a selection widget offers for one column: one row per
/// distinct value, optionally narrowed by a live search box. The live search
/// uses the same matching rule as the engine's search filter.

use crate::engine::contains_query;
use crate::state::ValueKind;
use crate::value::{field, FieldValue, Record};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Distinct-value rows for `column_id`, first occurrence wins.
///
/// Rows without a value for the column are skipped since they can never be
/// selected. `live_search` is trimmed and matched case-insensitively.
pub fn selection_candidates<'a>(
    records: &'a [Record],
    column_id: &str,
    live_search: &str,
) -> Vec<&'a Record> {
    let query = live_search.trim().to_lowercase();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for row in records {
        let Some(value) = field(row, column_id) else {
            continue;
        };
        if !seen.insert(value.key()) {
            continue;
        }
        if contains_query(row, column_id, &query) {
            candidates.push(row);
        }
    }

    candidates
}

/// The distinct values themselves, in the same order as [`selection_candidates`].
pub fn candidate_values(records: &[Record], column_id: &str, live_search: &str) -> Vec<FieldValue> {
    selection_candidates(records, column_id, live_search)
        .into_iter()
        .filter_map(|row| field(row, column_id).cloned())
        .collect()
}

/// Orders candidates ascending for display, stable.
///
/// `Number` columns compare numerically with non-numeric values last;
/// `String` columns compare the stringified values.
pub fn sort_candidates(candidates: &mut [&Record], column_id: &str, kind: ValueKind) {
    candidates.sort_by(|a, b| {
        let va = field(a, column_id);
        let vb = field(b, column_id);
        match kind {
            ValueKind::Number => {
                let na = va.filter(|v| v.is_numeric());
                let nb = vb.filter(|v| v.is_numeric());
                match (na, nb) {
                    (Some(x), Some(y)) => x.numeric_cmp(y).unwrap_or(Ordering::Equal),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
            ValueKind::String => {
                let ta = va.map(|v| v.to_text()).unwrap_or_default();
                let tb = vb.map(|v| v.to_text()).unwrap_or_default();
                ta.cmp(&tb)
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::record;

    fn rows() -> Vec<Record> {
        vec![
            record([("id", FieldValue::Int(0)), ("gender", FieldValue::from("Female")), ("age", FieldValue::Int(40))]),
            record([("id", FieldValue::Int(1)), ("gender", FieldValue::from("Male")), ("age", FieldValue::Int(9))]),
            record([("id", FieldValue::Int(2)), ("gender", FieldValue::from("Female")), ("age", FieldValue::Int(10))]),
            record([("id", FieldValue::Int(3)), ("gender", FieldValue::from("Male")), ("age", FieldValue::Int(9))]),
            record([("id", FieldValue::Int(4))]),
        ]
    }

    fn ids(rows: &[&Record]) -> Vec<i64> {
        rows.iter().filter_map(|r| r["id"].as_i64()).collect()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let records = rows();
        let candidates = selection_candidates(&records, "gender", "");
        assert_eq!(ids(&candidates), vec![0, 1]);
        assert_eq!(
            candidate_values(&records, "gender", ""),
            vec![FieldValue::from("Female"), FieldValue::from("Male")]
        );
    }

    #[test]
    fn test_live_search_uses_substring_rule() {
        let records = rows();
        // "male" is contained in both values
        assert_eq!(ids(&selection_candidates(&records, "gender", " MALE ")), vec![0, 1]);
        assert_eq!(ids(&selection_candidates(&records, "gender", "fem")), vec![0]);
        assert!(selection_candidates(&records, "gender", "x").is_empty());
    }

    #[test]
    fn test_dedup_happens_before_search() {
        let records = rows();
        // Row 3 duplicates row 1, so it is never a candidate even when searching
        assert_eq!(ids(&selection_candidates(&records, "age", "9")), vec![1]);
    }

    #[test]
    fn test_dedup_keeps_distinct_large_integers() {
        let big = 1_i64 << 53;
        let records = vec![
            record([("id", FieldValue::Int(0)), ("n", FieldValue::Int(big + 1))]),
            record([("id", FieldValue::Int(1)), ("n", FieldValue::Float(big as f64))]),
            record([("id", FieldValue::Int(2)), ("n", FieldValue::Int(big))]),
            record([("id", FieldValue::Int(3)), ("n", FieldValue::Float(2.5))]),
            record([("id", FieldValue::Int(4)), ("n", FieldValue::Float(2.5))]),
        ];
        let mut candidates = selection_candidates(&records, "n", "");
        assert_eq!(ids(&candidates), vec![0, 1, 3]);

        sort_candidates(&mut candidates, "n", ValueKind::Number);
        assert_eq!(ids(&candidates), vec![3, 1, 0]);
    }

    #[test]
    fn test_sort_candidates_by_kind() {
        let records = rows();
        let mut numeric = selection_candidates(&records, "age", "");
        sort_candidates(&mut numeric, "age", ValueKind::Number);
        assert_eq!(ids(&numeric), vec![1, 2, 0]);

        let mut text = selection_candidates(&records, "age", "");
        sort_candidates(&mut text, "age", ValueKind::String);
        assert_eq!(ids(&text), vec![2, 0, 1]);
    }
}
