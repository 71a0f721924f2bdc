//! Line editing on raw key events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// The buffer changed; redraw the prompt.
    Edited,
    /// Enter was pressed with this line.
    Submit(String),
    Quit,
}

/// The prompt's edit buffer.
#[derive(Debug, Default)]
pub struct LineInput {
    buffer: String,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<InputAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => Some(InputAction::Quit),
            KeyCode::Char('d') if ctrl && self.buffer.is_empty() => Some(InputAction::Quit),
            KeyCode::Char('u') if ctrl => {
                self.buffer.clear();
                Some(InputAction::Edited)
            }
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => {
                self.buffer.push(c);
                Some(InputAction::Edited)
            }
            KeyCode::Backspace => self.buffer.pop().map(|_| InputAction::Edited),
            KeyCode::Esc => {
                self.buffer.clear();
                Some(InputAction::Edited)
            }
            KeyCode::Enter => Some(InputAction::Submit(std::mem::take(&mut self.buffer))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(input: &mut LineInput, code: KeyCode) -> Option<InputAction> {
        input.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(input: &mut LineInput, c: char) -> Option<InputAction> {
        input.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn typing_then_enter_submits_the_line() {
        let mut input = LineInput::default();
        for c in "open 2".chars() {
            assert_eq!(press(&mut input, KeyCode::Char(c)), Some(InputAction::Edited));
        }
        assert_eq!(input.text(), "open 2");
        assert_eq!(
            press(&mut input, KeyCode::Enter),
            Some(InputAction::Submit("open 2".to_string()))
        );
        assert_eq!(input.text(), "");
    }

    #[test]
    fn backspace_and_escape_edit_the_buffer() {
        let mut input = LineInput::default();
        assert_eq!(press(&mut input, KeyCode::Backspace), None);
        press(&mut input, KeyCode::Char('ñ'));
        press(&mut input, KeyCode::Char('o'));
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text(), "ñ");
        press(&mut input, KeyCode::Esc);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn control_keys() {
        let mut input = LineInput::default();
        press(&mut input, KeyCode::Char('x'));
        assert_eq!(ctrl(&mut input, 'd'), None);
        assert_eq!(ctrl(&mut input, 'u'), Some(InputAction::Edited));
        assert_eq!(ctrl(&mut input, 'd'), Some(InputAction::Quit));
        assert_eq!(ctrl(&mut input, 'c'), Some(InputAction::Quit));
    }
}
