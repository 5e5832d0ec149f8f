use rayon::prelude::*;

use crate::record::Record;

/// True if any field's string form contains `term` (case-sensitive).
pub fn record_matches(record: &Record, term: &str) -> bool {
    record
        .iter()
        .any(|(_, value)| value.to_string().contains(term))
}

/// Keeps the records where any field contains `term`, in input order.
///
/// An empty term keeps everything. Records are checked in parallel; the result
/// order is the input order.
pub fn filter_items_by_search<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }
    records
        .par_iter()
        .filter(|record| record_matches(record, term))
        .collect()
}
