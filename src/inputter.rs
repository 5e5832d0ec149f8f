use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

/// What a key press did to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Edited,
    Moved,
    Submitted,
    Canceled,
    Ignored,
}

/// Single line editor for the prompt at the bottom of the screen.
#[derive(Default, Debug)]
pub struct Inputter {
    text: String,
    curser_pos: usize, // In chars, not bytes
}

impl Inputter {
    pub fn read(&mut self, key: KeyEvent) -> InputEvent {
        let event = match key.code {
            KeyCode::Enter => InputEvent::Submitted,
            KeyCode::Esc => {
                self.clear();
                InputEvent::Canceled
            }
            KeyCode::Backspace if self.curser_pos > 0 => {
                self.curser_pos -= 1;
                self.text.remove(self.byte_pos());
                InputEvent::Edited
            }
            KeyCode::Delete if self.curser_pos < self.len() => {
                self.text.remove(self.byte_pos());
                InputEvent::Edited
            }
            KeyCode::Left => self.move_to(self.curser_pos.saturating_sub(1)),
            KeyCode::Right => self.move_to(self.curser_pos + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.len()),
            KeyCode::Char(chr) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.insert(self.byte_pos(), chr);
                self.curser_pos += 1;
                InputEvent::Edited
            }
            _ => InputEvent::Ignored,
        };
        trace!("Prompt {:?}: {:?}", event, self.text);
        event
    }

    /// Replaces the text and puts the curser at its end.
    pub fn set(&mut self, s: &str) {
        self.text = s.to_string();
        self.curser_pos = self.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.curser_pos = 0;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn curser_pos(&self) -> usize {
        self.curser_pos
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn move_to(&mut self, pos: usize) -> InputEvent {
        self.curser_pos = pos.min(self.len());
        InputEvent::Moved
    }

    fn byte_pos(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.curser_pos)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.text.len())
    }
}
