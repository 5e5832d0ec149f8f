use std::collections::HashSet;

use tracing::trace;

use crate::schema::FieldDescriptor;

/// Names of the fields hidden from display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    hidden: HashSet<String>,
}

impl VisibilitySet {
    /// Hides a shown field and shows a hidden one. Returns whether the field
    /// is hidden afterwards.
    pub fn toggle(&mut self, field: &str) -> bool {
        let hidden = if self.hidden.remove(field) {
            false
        } else {
            self.hidden.insert(field.to_string());
            true
        };
        trace!("Field {field} hidden: {hidden}");
        hidden
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden.contains(field)
    }

    pub fn visible<'a>(&self, fields: &'a [FieldDescriptor]) -> Vec<&'a FieldDescriptor> {
        fields
            .iter()
            .filter(|f| !self.is_hidden(&f.field))
            .collect()
    }
}
