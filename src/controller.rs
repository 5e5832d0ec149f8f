use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use datatable::domain::AppConfig;
use datatable::{DTError, Message};

use crate::app::{App, CMDMode, Command};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, app: &App) -> Result<Option<Command>, DTError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(app, key));
        }
        Ok(None)
    }

    fn handle_key(&self, app: &App, key: KeyEvent) -> Option<Command> {
        if app.raw_keyevents() {
            return Some(Command::RawKey(key));
        }
        let per_page = app.table.per_page();
        let command = match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('?') => Some(Command::Help),
            KeyCode::Char('/') => Some(Command::EnterCmd(CMDMode::Search)),
            KeyCode::Char('h') => Some(Command::EnterCmd(CMDMode::HideField)),
            KeyCode::Char('y') => Some(Command::CopySelection),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
            KeyCode::Char(' ') => Some(Command::SelectCursorRow),
            KeyCode::Char(c @ '1'..='9') => {
                c.to_digit(10).map(|d| Command::SortColumn(d as usize - 1))
            }
            KeyCode::Left => Some(Command::Table(Message::PrevPage)),
            KeyCode::Right => Some(Command::Table(Message::NextPage)),
            KeyCode::Home => Some(Command::Table(Message::SetPage(0))),
            KeyCode::Char('+') => Some(Command::Table(Message::SetPerPage(per_page + 5))),
            KeyCode::Char('-') if per_page > 5 => {
                Some(Command::Table(Message::SetPerPage(per_page - 5)))
            }
            KeyCode::Char('a') => Some(Command::Table(Message::ToggleSelectAll)),
            KeyCode::Char('e') => Some(Command::Table(Message::ToggleQuickEdit)),
            _ => None,
        };
        trace!("Mapped: {key:?} => {command:?}");
        command
    }
}
