use tracing::{debug, trace};

use crate::domain::{DTError, DataTableConfig, Message};
use crate::paginate::{self, PageState};
use crate::record::{Record, Value};
use crate::schema::{self, FieldDescriptor, FieldType};
use crate::search;
use crate::selection::SelectionSet;
use crate::sort::{self, SortState};
use crate::visibility::VisibilitySet;

/// View-model of one table.
///
/// Owns the records and every control (search text, sort, page geometry,
/// selection, hidden fields, quick edit). All record sequences it hands out
/// are derived on each call from the current controls:
/// `filter -> sort -> paginate -> current page`.
#[derive(Debug, Clone)]
pub struct DataTable {
    items: Vec<Record>,
    fields: Vec<FieldDescriptor>,
    search_text: String,
    sort: SortState,
    page: PageState,
    selection: SelectionSet,
    hidden: VisibilitySet,
    in_quick_edit: bool,
}

impl DataTable {
    pub fn new(config: DataTableConfig) -> Result<Self, DTError> {
        let page = PageState::new(config.per_page)?;
        Ok(Self::with_page(config.items, page))
    }

    /// A table over `items` with the default page size.
    pub fn from_items(items: Vec<Record>) -> Self {
        Self::with_page(items, PageState::default())
    }

    fn with_page(items: Vec<Record>, page: PageState) -> Self {
        let fields = schema::infer_fields(&items);
        debug!(
            "New table with {} items, {} fields, {} per page",
            items.len(),
            fields.len(),
            page.per_page()
        );
        Self {
            items,
            fields,
            search_text: String::new(),
            sort: SortState::default(),
            page,
            selection: SelectionSet::new(),
            hidden: VisibilitySet::default(),
            in_quick_edit: false,
        }
    }

    /// Replaces the records and infers the fields again. Controls are kept.
    pub fn set_items(&mut self, items: Vec<Record>) {
        self.fields = schema::infer_fields(&items);
        self.items = items;
        debug!(
            "Replaced items: {} items, {} fields",
            self.items.len(),
            self.fields.len()
        );
    }

    // -------------------- Derived values ---------------------- //

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn data_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn visible_fields(&self) -> Vec<&FieldDescriptor> {
        self.hidden.visible(&self.fields)
    }

    /// Cells of `record` for the visible fields, in field order. A field the
    /// record lacks yields `None`.
    pub fn visible_cells<'a>(&'a self, record: &'a Record) -> Vec<(&'a str, Option<&'a Value>)> {
        self.visible_fields()
            .into_iter()
            .map(|f| (f.field.as_str(), record.get(&f.field)))
            .collect()
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.field_type)
    }

    /// Records matching the search text, in sort order.
    pub fn sorted_items(&self) -> Vec<&Record> {
        let filtered = search::filter_items_by_search(&self.items, &self.search_text);
        sort::sort_by_state(filtered, &self.sort)
    }

    pub fn pages(&self) -> Vec<Vec<&Record>> {
        paginate::paginate_items(&self.sorted_items(), self.page.per_page())
    }

    pub fn page_count(&self) -> usize {
        paginate::page_count(self.sorted_items().len(), self.page.per_page())
    }

    pub fn current_page_items(&self) -> Vec<&Record> {
        paginate::page_items(&self.pages(), self.page.current_page())
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn per_page(&self) -> usize {
        self.page.per_page()
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page()
    }

    pub fn selected_item_ids(&self) -> &[String] {
        self.selection.ids()
    }

    pub fn is_selected(&self, record: &Record) -> bool {
        record.id().is_some_and(|id| self.selection.contains(&id))
    }

    pub fn is_field_hidden(&self, field: &str) -> bool {
        self.hidden.is_hidden(field)
    }

    pub fn in_quick_edit(&self) -> bool {
        self.in_quick_edit
    }

    // -------------------- Actions ---------------------- //

    pub fn filter_items_by_search<'a>(&self, records: &'a [Record], term: &str) -> Vec<&'a Record> {
        search::filter_items_by_search(records, term)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        trace!("Search text: {:?}", self.search_text);
    }

    pub fn toggle_sort(&mut self, field: &str, field_type: FieldType) {
        self.sort.toggle(field, field_type);
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.page.set_current_page(page);
    }

    /// Does not move the current page back into range.
    pub fn set_items_per_page(&mut self, per_page: usize) -> Result<(), DTError> {
        self.page.set_per_page(per_page)
    }

    pub fn toggle_select_item(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Works on all items, ignoring search and pages.
    pub fn toggle_select_all_items(&mut self) {
        let ids = self.items.iter().filter_map(Record::id);
        self.selection.toggle_all(ids);
    }

    pub fn toggle_display_field(&mut self, field: &str) -> bool {
        self.hidden.toggle(field)
    }

    pub fn toggle_quick_edit_mode(&mut self) {
        self.in_quick_edit = !self.in_quick_edit;
        trace!("Quick edit: {}", self.in_quick_edit);
    }

    pub fn update(&mut self, message: Message) -> Result<(), DTError> {
        trace!("Update: {:?}", message);
        match message {
            Message::Search(text) => self.set_search_text(text),
            Message::SortBy(field) => match self.field_type(&field) {
                Some(field_type) => self.toggle_sort(&field, field_type),
                None => trace!("Ignoring sort by unknown field {field}"),
            },
            Message::SetPage(page) => self.set_current_page(page),
            Message::NextPage => {
                let last = self.page_count().saturating_sub(1);
                if self.current_page() < last {
                    self.set_current_page(self.current_page() + 1);
                }
            }
            Message::PrevPage => self.set_current_page(self.current_page().saturating_sub(1)),
            Message::SetPerPage(per_page) => self.set_items_per_page(per_page)?,
            Message::ToggleSelect(id) => {
                self.toggle_select_item(&id);
            }
            Message::ToggleSelectAll => self.toggle_select_all_items(),
            Message::ToggleField(field) => {
                self.toggle_display_field(&field);
            }
            Message::ToggleQuickEdit => self.toggle_quick_edit_mode(),
        }
        Ok(())
    }
}
