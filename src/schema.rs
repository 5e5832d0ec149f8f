use std::fmt;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => f.write_str("string"),
            FieldType::Number => f.write_str("number"),
        }
    }
}

/// One column of the table: field name and its sniffed type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: String,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
        }
    }
}

/// Derives the columns from the first record, in its key order.
///
/// All records are expected to share the first record's fields. Later records
/// are never inspected, so a field missing from the first record is not shown.
pub fn infer_fields(records: &[Record]) -> Vec<FieldDescriptor> {
    match records.first() {
        Some(first) => first
            .iter()
            .map(|(name, value)| FieldDescriptor::new(name, value.field_type()))
            .collect(),
        None => Vec::new(),
    }
}
