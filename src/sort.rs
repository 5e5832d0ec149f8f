use std::cmp::Ordering;

use tracing::trace;

use crate::record::{Record, Value};
use crate::schema::FieldType;

/// Current sort column and direction. `key == None` keeps the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    pub key: Option<String>,
    pub field_type: Option<FieldType>,
    pub reverse: bool,
}

impl SortState {
    /// Same key flips the direction, a new key starts ascending.
    pub fn toggle(&mut self, key: &str, field_type: FieldType) {
        if self.is_sorted_by(key) {
            self.reverse = !self.reverse;
        } else {
            self.key = Some(key.to_string());
            self.field_type = Some(field_type);
            self.reverse = false;
        }
        trace!(
            "Sort state: key {:?}, type {:?}, reverse {}",
            self.key, self.field_type, self.reverse
        );
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    // Values that cannot be read as numbers go after all numbers and are
    // compared as strings among themselves.
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

fn compare_strings(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Ascending order of two (possibly missing) values. A missing value is the
/// weakest and sorts before every present one.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, field_type: FieldType) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match field_type {
            FieldType::Number => compare_numbers(a, b),
            FieldType::String => compare_strings(a, b),
        },
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `records` by the field `key`.
///
/// `reverse` inverts the comparator rather than the result, so records with
/// equal keys keep their input order in both directions.
pub fn sort_items_by_field<'a>(
    mut records: Vec<&'a Record>,
    key: Option<&str>,
    field_type: FieldType,
    reverse: bool,
) -> Vec<&'a Record> {
    let Some(key) = key else {
        return records;
    };
    records.sort_by(|a, b| {
        let ord = compare_values(a.get(key), b.get(key), field_type);
        if reverse { ord.reverse() } else { ord }
    });
    records
}

/// Applies a [`SortState`] to `records`.
pub fn sort_by_state<'a>(records: Vec<&'a Record>, state: &SortState) -> Vec<&'a Record> {
    sort_items_by_field(
        records,
        state.key.as_deref(),
        state.field_type.unwrap_or(FieldType::String),
        state.reverse,
    )
}
