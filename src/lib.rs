//! A searchable, sortable, paginated table view-model.
//!
//! [`DataTable`] owns a collection of [`Record`]s and the table controls. The
//! records to render are derived on every read: search filter, then sort,
//! then pagination.

pub mod domain;
pub mod export;
pub mod loader;
pub mod model;
pub mod paginate;
pub mod record;
pub mod schema;
pub mod search;
pub mod selection;
pub mod sort;
pub mod visibility;

pub use domain::{DEFAULT_PER_PAGE, DTError, DataTableConfig, Message};
pub use model::DataTable;
pub use paginate::paginate_items;
pub use record::{Record, Value};
pub use schema::{FieldDescriptor, FieldType, infer_fields};
pub use search::filter_items_by_search;
pub use sort::{SortState, sort_items_by_field};
