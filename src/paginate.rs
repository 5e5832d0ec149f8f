use tracing::trace;

use crate::domain::{DEFAULT_PER_PAGE, DTError};
use crate::record::Record;

/// Page geometry. `per_page` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    per_page: usize,
    current_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            current_page: 0,
        }
    }
}

impl PageState {
    pub fn new(per_page: usize) -> Result<Self, DTError> {
        let mut state = Self::default();
        state.set_per_page(per_page)?;
        Ok(state)
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Changes the page size. The current page is left as it is, even if it
    /// now points past the last page.
    pub fn set_per_page(&mut self, per_page: usize) -> Result<(), DTError> {
        if per_page == 0 {
            return Err(DTError::InvalidPageSize);
        }
        trace!("Items per page {} -> {}", self.per_page, per_page);
        self.per_page = per_page;
        Ok(())
    }

    pub fn set_current_page(&mut self, page: usize) {
        trace!("Current page {} -> {}", self.current_page, page);
        self.current_page = page;
    }
}

/// Number of pages needed for `len` records.
pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Splits `records` into pages of at most `per_page` records. No records
/// means no pages.
pub fn paginate_items<'a>(records: &[&'a Record], per_page: usize) -> Vec<Vec<&'a Record>> {
    records
        .chunks(per_page.max(1))
        .map(|page| page.to_vec())
        .collect()
}

/// The page at `current_page`, or nothing when it is out of range.
pub fn page_items<'a>(pages: &[Vec<&'a Record>], current_page: usize) -> Vec<&'a Record> {
    pages.get(current_page).cloned().unwrap_or_default()
}
