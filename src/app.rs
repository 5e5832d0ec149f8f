use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use std::time::Instant;
use tracing::{error, trace};

use datatable::domain::HELP_TEXT;
use datatable::export::selected_as_csv;
use datatable::{DTError, DataTable, Message, Record};

use crate::inputter::{InputEvent, Inputter};

/// What the command line is currently used for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CMDMode {
    Search,
    HideField,
}

/// Front-end intents. Table changes are wrapped [`Message`]s, the rest only
/// touch the front-end's own state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Table(Message),
    Quit,
    Help,
    CursorUp,
    CursorDown,
    SelectCursorRow,
    /// Index into the table's fields, hidden ones included.
    SortColumn(usize),
    CopySelection,
    EnterCmd(CMDMode),
    RawKey(KeyEvent),
}

pub struct App {
    pub name: String,
    pub table: DataTable,
    pub cursor: usize,
    pub quitting: bool,
    pub cmd_mode: Option<CMDMode>,
    pub status_message: String,
    pub last_status_message_update: Instant,
    input: Inputter,
    clipboard: Option<Clipboard>,
}

impl App {
    pub fn new(name: impl Into<String>, table: DataTable) -> Self {
        Self {
            name: name.into(),
            table,
            cursor: 0,
            quitting: false,
            cmd_mode: None,
            status_message: HELP_TEXT.to_string(),
            last_status_message_update: Instant::now(),
            input: Inputter::default(),
            clipboard: None,
        }
    }

    pub fn raw_keyevents(&self) -> bool {
        self.cmd_mode.is_some()
    }

    /// Prompt text and curser position.
    pub fn prompt(&self) -> (&str, usize) {
        (self.input.text(), self.input.curser_pos())
    }

    /// Record under the cursor on the current page.
    pub fn cursor_record(&self) -> Option<&Record> {
        self.table.current_page_items().get(self.cursor).copied()
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    pub fn update(&mut self, command: Command) -> Result<(), DTError> {
        trace!("Command: {:?}", command);
        match command {
            Command::Table(message) => {
                if let Err(e) = self.table.update(message) {
                    self.set_status_message(e.to_string());
                }
            }
            Command::Quit => self.quitting = true,
            Command::Help => self.set_status_message(HELP_TEXT),
            Command::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Command::CursorDown => self.cursor += 1,
            Command::SelectCursorRow => {
                if let Some(id) = self.cursor_record().and_then(Record::id) {
                    self.table.toggle_select_item(&id);
                }
            }
            Command::SortColumn(idx) => {
                let field = self.table.data_fields().get(idx).map(|f| f.field.clone());
                if let Some(field) = field {
                    self.table.update(Message::SortBy(field))?;
                }
            }
            Command::CopySelection => self.copy_selection(),
            Command::EnterCmd(mode) => self.enter_cmd_mode(mode),
            Command::RawKey(key) => self.raw_input(key),
        }
        self.clamp_cursor();
        Ok(())
    }

    fn clamp_cursor(&mut self) {
        let rows = self.table.current_page_items().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    fn enter_cmd_mode(&mut self, mode: CMDMode) {
        self.input.clear();
        if mode == CMDMode::Search {
            self.input.set(self.table.search_text());
        }
        self.cmd_mode = Some(mode);
    }

    fn raw_input(&mut self, key: KeyEvent) {
        let Some(mode) = self.cmd_mode else {
            return;
        };
        let event = self.input.read(key);

        // Search follows every edit, the field number only counts once it
        // is submitted.
        match (mode, event) {
            (CMDMode::Search, InputEvent::Edited | InputEvent::Canceled) => {
                self.table.set_search_text(self.input.text());
                self.table.set_current_page(0);
            }
            (CMDMode::Search, InputEvent::Submitted) => {
                let matches = self.table.sorted_items().len();
                self.set_status_message(format!("Found {matches} results"));
            }
            (CMDMode::HideField, InputEvent::Submitted) => {
                let input = self.input.text().to_string();
                self.toggle_field_by_number(&input);
            }
            _ => {}
        }

        if matches!(event, InputEvent::Submitted | InputEvent::Canceled) {
            self.cmd_mode = None;
        }
    }

    // Fields are numbered from 1 in schema order, hidden ones included.
    fn toggle_field_by_number(&mut self, input: &str) {
        let field = input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.table.data_fields().get(idx))
            .map(|f| f.field.clone());
        match field {
            Some(field) => {
                let hidden = self.table.toggle_display_field(&field);
                let state = if hidden { "hidden" } else { "shown" };
                self.set_status_message(format!("Field {field} {state}"));
            }
            None => self.set_status_message(format!("No field {input:?}")),
        }
    }

    fn copy_selection(&mut self) {
        if self.table.selected_item_ids().is_empty() {
            self.set_status_message("Nothing selected");
            return;
        }
        let content = selected_as_csv(&self.table);
        if self.clipboard.is_none() {
            match Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    error!("Clipboard unavailable: {:?}", e);
                    self.set_status_message("Clipboard unavailable");
                    return;
                }
            }
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(content) {
                Ok(_) => {
                    let n = self.table.selected_item_ids().len();
                    trace!("Copied {n} records to clipboard.");
                    self.set_status_message(format!("Copied {n} records"));
                }
                Err(e) => {
                    error!("Error copying to clipboard: {:?}", e);
                    self.set_status_message("Copy failed");
                }
            }
        }
    }
}
