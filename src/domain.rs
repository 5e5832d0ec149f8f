use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use derive_setters::Setters;
use polars::error::PolarsError;

use crate::record::Record;

pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Debug)]
pub enum DTError {
    IoError(Error),
    PolarsError(PolarsError),
    LoadingFailed(String),
    FileNotFound,
    PermissionDenied,
    UnknownFileType,
    InvalidPageSize,
}

impl fmt::Display for DTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DTError::IoError(e) => write!(f, "io error: {e}"),
            DTError::PolarsError(e) => write!(f, "polars error: {e}"),
            DTError::LoadingFailed(reason) => write!(f, "loading failed: {reason}"),
            DTError::FileNotFound => write!(f, "file not found"),
            DTError::PermissionDenied => write!(f, "permission denied"),
            DTError::UnknownFileType => write!(f, "unknown file type"),
            DTError::InvalidPageSize => write!(f, "items per page must be greater than zero"),
        }
    }
}

impl std::error::Error for DTError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DTError::IoError(e) => Some(e),
            DTError::PolarsError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Error> for DTError {
    fn from(err: Error) -> Self {
        DTError::IoError(err)
    }
}

impl From<PolarsError> for DTError {
    fn from(err: PolarsError) -> Self {
        DTError::PolarsError(err)
    }
}

/// User intents a front-end forwards to [`crate::DataTable::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Search(String),
    SortBy(String),
    SetPage(usize),
    NextPage,
    PrevPage,
    SetPerPage(usize),
    ToggleSelect(String),
    ToggleSelectAll,
    ToggleField(String),
    ToggleQuickEdit,
}

/// Input boundary of a [`crate::DataTable`].
#[derive(Debug, Clone, Setters)]
pub struct DataTableConfig {
    pub items: Vec<Record>,
    pub per_page: usize,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Settings of the terminal front-end.
#[derive(Debug, Clone, Setters)]
pub struct AppConfig {
    pub event_poll_time: u64,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            log_file: PathBuf::from("datatable.log"),
        }
    }
}

pub const HELP_TEXT: &str = concat!(
    "q quit | / search | 1-9 sort | h<n> hide | \u{2190}/\u{2192} page | ",
    "+/- per page | space select | a all | e quick edit | y copy"
);
