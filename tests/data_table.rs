use std::time::{Duration, Instant};

use datatable::export::selected_as_csv;
use datatable::{
    DTError, DataTable, DataTableConfig, FieldDescriptor, FieldType, Message, Record, Value,
    filter_items_by_search, paginate_items, sort_items_by_field,
};

fn items() -> Vec<Record> {
    vec![
        Record::new()
            .with("id", "3471DA17-401F-9633-BF81-4CADA6FD5C79")
            .with("name", "Kyra Lester")
            .with("description", "Curabitur dictum. Phasellus in")
            .with("date", "2017-07-23T04:24:49-07:00")
            .with("amount", 345.54),
        Record::new()
            .with("id", "9F5C9912-936A-FB85-1EDB-9DA87BE7FF1E")
            .with("name", "Buckminster Alvarado")
            .with(
                "description",
                "dui, in sodales elit erat vitae risus. Duis a mi",
            )
            .with("date", "2018-11-08T05:44:15-08:00")
            .with("amount", 677.08),
        Record::new()
            .with("id", "B743AC82-3613-13A2-2E42-E0C1F5CBF8A6")
            .with("name", "Athena Smith")
            .with("description", "massa lobortis ultrices. Vivamus rhoncus.")
            .with("date", "2018-11-11T06:19:57-08:00")
            .with("amount", 73.67),
    ]
}

fn same_names(n: usize) -> Vec<Record> {
    (0..n)
        .map(|_| Record::new().with("name", "Kyra Lester"))
        .collect()
}

fn table(items: Vec<Record>) -> DataTable {
    DataTable::new(DataTableConfig::default().items(items)).unwrap()
}

fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().filter_map(|r| r.id()).collect()
}

#[test]
fn generates_pages_of_default_size() {
    let table = table(same_names(100));
    assert_eq!(table.pages().len(), 5);
    assert_eq!(table.items().len(), 100);
    assert_eq!(table.per_page(), 20);
    assert_eq!(table.current_page_items().len(), table.per_page());
}

#[test]
fn data_fields_have_types() {
    let items = vec![items().remove(0)];
    let keys: Vec<String> = items[0].keys().map(String::from).collect();
    let table = table(items);

    let fields = table.data_fields();
    assert_eq!(fields.len(), 5);
    for (idx, field) in fields.iter().enumerate().take(4) {
        let expected = FieldDescriptor::new(keys[idx].clone(), FieldType::String);
        assert_eq!(*field, expected);
    }
    let amount = FieldDescriptor::new(keys[4].clone(), FieldType::Number);
    assert_eq!(fields[4], amount);
}

#[test]
fn current_page_items_is_a_page() {
    let mut table = table(same_names(300));
    assert_eq!(table.current_page(), 0);
    assert_eq!(table.pages().len(), 15);
    assert_eq!(table.current_page_items(), table.pages()[0]);

    table.set_current_page(5);
    assert_eq!(table.current_page_items(), table.pages()[5]);
}

#[test]
fn defaults_are_unsorted() {
    let items = items();
    let table = table(items.clone());
    let page = table.current_page_items();
    assert_eq!(page.len(), 3);
    assert_eq!(page, vec![&items[0], &items[1], &items[2]]);
    assert_eq!(table.sort_state().key, None);
    assert_eq!(table.sort_state().field_type, None);
    assert!(!table.sort_state().reverse);
}

#[test]
fn filter_items_by_search_primitive() {
    let items = items();
    let table = table(items.clone());
    assert_eq!(table.filter_items_by_search(&items, "").len(), 3);
    assert_eq!(filter_items_by_search(&items, "Athena"), vec![&items[2]]);
}

#[test]
fn sort_items_by_field_primitive() {
    let items = items();
    let all = || items.iter().collect::<Vec<_>>();
    let expect = |order: [usize; 3]| order.map(|i| &items[i]).to_vec();

    let cases = [
        ("id", FieldType::String, false, [0, 1, 2]),
        ("id", FieldType::String, true, [2, 1, 0]),
        ("name", FieldType::String, false, [2, 1, 0]),
        ("name", FieldType::String, true, [0, 1, 2]),
        ("description", FieldType::String, false, [0, 1, 2]),
        ("description", FieldType::String, true, [2, 1, 0]),
        ("date", FieldType::String, false, [0, 1, 2]),
        ("date", FieldType::String, true, [2, 1, 0]),
        ("amount", FieldType::Number, false, [2, 0, 1]),
        ("amount", FieldType::Number, true, [1, 0, 2]),
    ];
    for (key, field_type, reverse, order) in cases {
        assert_eq!(
            sort_items_by_field(all(), Some(key), field_type, reverse),
            expect(order),
            "sort by {key} reverse={reverse}"
        );
    }
}

#[test]
fn paginate_follows_per_page() {
    let items = same_names(300);
    let mut table = table(items.clone());
    let refs: Vec<&Record> = items.iter().collect();

    assert_eq!(table.current_page_items().len(), 20);
    assert_eq!(paginate_items(&refs, table.per_page()).len(), 15);

    table.set_items_per_page(10).unwrap();
    assert_eq!(paginate_items(&refs, table.per_page()).len(), 30);
    assert_eq!(table.items().len(), 300);
    assert_eq!(table.current_page_items().len(), 10);

    table.set_items_per_page(5).unwrap();
    assert_eq!(paginate_items(&refs, table.per_page()).len(), 60);
    assert!(table.pages().iter().all(|p| p.len() == 5));
    assert_eq!(table.current_page_items().len(), 5);
}

#[test]
fn tracks_selected_items() {
    let items = items();
    let mut table = table(items.clone());
    assert!(table.selected_item_ids().is_empty());

    let first = items[0].id().unwrap();
    let third = items[2].id().unwrap();

    table.toggle_select_item(&first);
    assert_eq!(table.selected_item_ids(), [first.as_str()]);

    table.toggle_select_item(&third);
    assert_eq!(table.selected_item_ids().len(), 2);

    table.toggle_select_item(&first);
    assert_eq!(table.selected_item_ids(), [third.as_str()]);
    assert_eq!(third, "B743AC82-3613-13A2-2E42-E0C1F5CBF8A6");
}

#[test]
fn selection_survives_sort_and_paging() {
    let items = items();
    let config = DataTableConfig::default().items(items.clone()).per_page(1);
    let mut table = DataTable::new(config).unwrap();
    table.toggle_select_item(&items[1].id().unwrap());
    table.toggle_sort("amount", FieldType::Number);
    table.set_current_page(2);
    assert!(table.is_selected(&items[1]));
    assert_eq!(table.current_page_items(), vec![&items[1]]);
}

#[test]
fn toggles_selection_of_all_items() {
    let items = items();
    let mut table = table(items.clone());
    table.toggle_select_all_items();
    assert_eq!(table.selected_item_ids().len(), 3);
    table.toggle_select_all_items();
    assert!(table.selected_item_ids().is_empty());

    // Any selection clears, even a partial one.
    table.toggle_select_item(&items[1].id().unwrap());
    table.toggle_select_all_items();
    assert!(table.selected_item_ids().is_empty());
}

#[test]
fn selects_and_exports_a_large_table() {
    let records = (0..50_000)
        .map(|i| Record::new().with("id", i as i64).with("n", "x"))
        .collect();
    let mut table = table(records);

    let start = Instant::now();
    table.toggle_select_all_items();
    let csv = selected_as_csv(&table);
    assert!(start.elapsed() < Duration::from_secs(5));

    assert_eq!(table.selected_item_ids().len(), 50_000);
    assert!(table.is_selected(&table.items()[12_345]));
    assert_eq!(csv.lines().count(), 50_001);

    table.toggle_select_all_items();
    assert!(table.selected_item_ids().is_empty());
    assert!(!table.is_selected(&table.items()[12_345]));
}

#[test]
fn toggle_all_ignores_search() {
    let mut table = table(items());
    table.set_search_text("Athena");
    table.toggle_select_all_items();
    assert_eq!(table.selected_item_ids().len(), 3);
}

#[test]
fn filters_by_search() {
    let mut table = table(items());
    assert_eq!(table.current_page_items().len(), 3);

    table.set_search_text("Buckminster");
    assert_eq!(table.current_page_items().len(), 1);

    table.set_search_text("xxxxxxxxxxx");
    assert!(table.current_page_items().is_empty());
    assert!(table.pages().is_empty());
}

#[test]
fn hides_selected_fields() {
    let mut table = table(vec![items().remove(0)]);
    let record = table.items()[0].clone();
    let cells = table.visible_cells(&record);
    assert_eq!(cells.len(), 5);
    let id = Value::from("3471DA17-401F-9633-BF81-4CADA6FD5C79");
    assert_eq!(cells[0].1, Some(&id));

    table.toggle_display_field("id");
    let cells = table.visible_cells(&record);
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[0].0, "name");
    assert_eq!(table.data_fields().len(), 5);
    assert_eq!(table.data_fields()[0].field, "id");
}

#[test]
fn sets_items_per_page() {
    let mut table = table(same_names(100));
    assert_eq!(table.current_page_items().len(), 20);
    assert_eq!(table.pages().len(), 5);

    table.set_items_per_page(5).unwrap();
    assert_eq!(table.current_page_items().len(), 5);
    assert_eq!(table.pages().len(), 20);

    table.set_items_per_page(10).unwrap();
    assert_eq!(table.current_page_items().len(), 10);
    assert_eq!(table.pages().len(), 10);

    assert!(matches!(table.set_items_per_page(0), Err(DTError::InvalidPageSize)));
}

#[test]
fn stale_current_page_is_kept() {
    let mut table = table(same_names(100));
    table.set_items_per_page(5).unwrap();
    table.set_current_page(19);
    assert_eq!(table.current_page_items().len(), 5);

    table.set_items_per_page(50).unwrap();
    assert_eq!(table.current_page(), 19);
    assert!(table.current_page_items().is_empty());
}

#[test]
fn sets_current_page() {
    let mut table = table(same_names(100));
    assert_eq!(table.current_page(), 0);
    assert_eq!(table.current_page_items(), table.pages()[0]);

    table.set_current_page(4);
    assert_eq!(table.current_page_items(), table.pages()[4]);
}

#[test]
fn toggles_quick_edit_mode() {
    let mut table = table(vec![Record::new().with("name", "Kyra Lester")]);
    assert!(!table.in_quick_edit());
    table.toggle_quick_edit_mode();
    assert!(table.in_quick_edit());
}

#[test]
fn sorts_table_by_toggling() {
    let mut table = table(items());
    // Keys are distinct, so descending is ascending reversed.
    let cases = [
        ("amount", FieldType::Number, ["B743", "3471", "9F5C"]),
        ("id", FieldType::String, ["3471", "9F5C", "B743"]),
        ("name", FieldType::String, ["B743", "9F5C", "3471"]),
        ("description", FieldType::String, ["3471", "9F5C", "B743"]),
        ("date", FieldType::String, ["3471", "9F5C", "B743"]),
    ];
    let prefixes = |table: &DataTable| -> Vec<String> {
        ids(&table.current_page_items())
            .iter()
            .map(|id| id[..4].to_string())
            .collect()
    };

    for (field, field_type, asc) in cases {
        table.toggle_sort(field, field_type);
        assert_eq!(prefixes(&table), asc, "{field} ascending");
        table.toggle_sort(field, field_type);
        let desc: Vec<&str> = asc.iter().rev().copied().collect();
        assert_eq!(prefixes(&table), desc, "{field} descending");
    }
}

#[test]
fn update_dispatches_messages() {
    let mut table = table(items());
    table.update(Message::Search("a".into())).unwrap();
    table.update(Message::SortBy("amount".into())).unwrap();
    table.update(Message::ToggleField("description".into())).unwrap();
    table.update(Message::ToggleQuickEdit).unwrap();
    table.update(Message::ToggleSelectAll).unwrap();

    assert_eq!(table.search_text(), "a");
    assert_eq!(table.sort_state().key.as_deref(), Some("amount"));
    assert!(table.is_field_hidden("description"));
    assert!(table.in_quick_edit());
    assert_eq!(table.selected_item_ids().len(), 3);
    assert!(table.update(Message::SetPerPage(0)).is_err());
}

#[test]
fn records_missing_fields_sort_first() {
    let records = vec![
        Record::new().with("id", "full").with("amount", 1.0),
        Record::new().with("id", "partial"),
    ];
    let mut table = table(records);
    table.toggle_sort("amount", FieldType::Number);
    assert_eq!(ids(&table.current_page_items()), vec!["partial", "full"]);
    table.set_search_text("1");
    assert_eq!(ids(&table.current_page_items()), vec!["full"]);
}
