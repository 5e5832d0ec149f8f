use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table, TableState},
};

use datatable::domain::HELP_TEXT;
use datatable::{DataTable, Record, Value};

use crate::app::{App, CMDMode};

pub const COLUMN_WIDTH_MARGIN: usize = 2;
pub const MAX_COLUMN_WIDTH: usize = 40;
pub const SELECT_COLUMN_WIDTH: u16 = 3;
pub const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(8);
const NEWLINE_MARK: &str = " \u{21b5} ";

fn cell_text(value: Option<&Value>) -> String {
    value
        .map(|v| v.to_string().replace("\r\n", NEWLINE_MARK))
        .map(|s| s.replace('\n', NEWLINE_MARK))
        .unwrap_or_default()
}

fn sort_marker(table: &DataTable, field: &str) -> &'static str {
    let sort = table.sort_state();
    match (sort.is_sorted_by(field), sort.reverse) {
        (true, true) => " \u{25bc}",
        (true, false) => " \u{25b2}",
        (false, _) => "",
    }
}

fn select_mark(table: &DataTable, record: &Record) -> &'static str {
    if table.is_selected(record) {
        "[x]"
    } else {
        "[ ]"
    }
}

fn calculate_column_width(header: &str, rows: &[&Record], field: &str) -> u16 {
    let widest = rows
        .iter()
        .map(|r| cell_text(r.get(field)).chars().count())
        .max()
        .unwrap_or(0);
    let width = std::cmp::max(header.chars().count(), widest) + COLUMN_WIDTH_MARGIN;
    std::cmp::min(width, MAX_COLUMN_WIDTH) as u16
}

/// Header label: field number (as used by the sort and hide keys), name and
/// sort direction.
fn header_label(table: &DataTable, field: &str) -> String {
    let number = table
        .data_fields()
        .iter()
        .position(|f| f.field == field)
        .map(|idx| idx + 1)
        .unwrap_or(0);
    format!("{number}:{field}{}", sort_marker(table, field))
}

fn draw_table(app: &App, frame: &mut Frame, area: Rect) {
    let table = &app.table;
    let rows = table.current_page_items();
    let fields = table.visible_fields();

    let headers: Vec<String> = fields
        .iter()
        .map(|f| header_label(table, &f.field))
        .collect();
    let mut widths = vec![Constraint::Length(SELECT_COLUMN_WIDTH)];
    for (field, header) in fields.iter().zip(&headers) {
        let width = calculate_column_width(header, &rows, &field.field);
        widths.push(Constraint::Length(width));
    }

    let header_style = Style::new().bold().underlined();
    let header_cells = std::iter::once(String::new()).chain(headers);
    let header = Row::new(header_cells.map(Cell::from)).style(header_style);

    let body = rows.iter().map(|record| {
        let cells = table
            .visible_cells(record)
            .into_iter()
            .map(|(_, value)| Cell::from(cell_text(value)));
        let mark = Cell::from(select_mark(table, record));
        Row::new(std::iter::once(mark).chain(cells))
    });

    let title = Line::from(app.name.as_str()).bold();
    let widget = Table::new(body, widths)
        .header(header)
        .block(Block::bordered().title(title))
        .row_highlight_style(Style::new().reversed());

    let mut state = TableState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(widget, area, &mut state);
}

// Quick edit lists every record as `field: value` lines.
fn draw_list(app: &App, frame: &mut Frame, area: Rect) {
    let table = &app.table;
    let mut lines = Vec::new();
    for (idx, record) in table.current_page_items().into_iter().enumerate() {
        let mark = select_mark(table, record);
        let style = if idx == app.cursor {
            Style::new().reversed()
        } else {
            Style::new()
        };
        lines.push(Line::from(mark).style(style));
        for (field, value) in table.visible_cells(record) {
            lines.push(Line::from(vec![
                Span::from(format!("  {field}: ")).bold(),
                Span::from(cell_text(value)),
            ]));
        }
        lines.push(Line::default());
    }

    // Keep the cursor's record in view.
    let per_record = table.visible_fields().len() + 2;
    let half_height = area.height.saturating_sub(2) as usize / 2;
    let scroll = (app.cursor * per_record).saturating_sub(half_height);

    let title = Line::from(format!("{} (quick edit)", app.name)).bold();
    let widget = Paragraph::new(lines)
        .block(Block::bordered().title(title))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn draw_statusline(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(mode) = app.cmd_mode {
        let prompt = match mode {
            CMDMode::Search => "/",
            CMDMode::HideField => "hide field #: ",
        };
        let (text, curser_pos) = app.prompt();
        let line = Line::from(vec![Span::from(prompt).bold(), Span::from(text.to_string())]);
        frame.render_widget(Paragraph::new(line), area);
        let x = area.x + (prompt.chars().count() + curser_pos) as u16;
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        return;
    }

    let table = &app.table;
    let page_count = table.page_count();
    let page = if page_count == 0 {
        0
    } else {
        table.current_page() + 1
    };
    let message = if app.last_status_message_update.elapsed() < STATUS_MESSAGE_TIMEOUT {
        app.status_message.as_str()
    } else {
        HELP_TEXT
    };
    let counts = format!(
        " {} rows | {} per page | {} selected | ",
        table.sorted_items().len(),
        table.per_page(),
        table.selected_item_ids().len()
    );
    let line = Line::from(vec![
        Span::from(format!(" page {page}/{page_count} ")).reversed(),
        Span::from(counts),
        Span::from(message.to_string()).italic(),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn draw(app: &App, frame: &mut Frame) {
    let [body_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    if app.table.in_quick_edit() {
        draw_list(app, frame, body_area);
    } else {
        draw_table(app, frame, body_area);
    }
    draw_statusline(app, frame, status_area);
}
