//! Single-line text editing.

use crate::input::{Key, TextInput};
use crate::interaction::Event;
use sigil_shared::HashedId;

/// State of an edit box after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditStatus {
    /// Not being edited.
    #[default]
    None,
    /// Being edited, text unchanged this frame.
    InEdit,
    /// Being edited, text changed this frame.
    Updated,
    /// Editing finished; the text holds the result.
    Finished,
    /// Editing canceled; the text was restored.
    Canceled,
}

/// Result of `Frame::edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditResponse {
    /// Pointer and keyboard events of the edit box.
    pub event: Event,
    /// Editing status.
    pub status: EditStatus,
}

/// Active edit session. At most one exists per `Ui`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditSession {
    id: HashedId,
    original: String,
    /// Caret position in chars.
    caret: usize,
}

fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(b, _)| b)
}

impl EditSession {
    /// Starts editing `text`, caret at the end.
    pub fn start(id: HashedId, text: &str) -> Self {
        tracing::debug!("Edit session started on {id}");
        Self {
            id,
            original: text.to_owned(),
            caret: text.chars().count(),
        }
    }

    pub fn id(&self) -> HashedId {
        self.id
    }

    #[cfg(test)]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Applies this frame's input in arrival order.
    pub fn apply(&mut self, text: &mut String, inputs: &[TextInput]) -> EditStatus {
        let mut status = EditStatus::InEdit;
        let len = text.chars().count();
        self.caret = self.caret.min(len);

        for input in inputs {
            match *input {
                TextInput::Char(c) if !c.is_control() => {
                    text.insert(byte_index(text, self.caret), c);
                    self.caret += 1;
                    status = EditStatus::Updated;
                }
                TextInput::Char(_) => {}
                TextInput::Key(Key::Backspace) => {
                    if self.caret > 0 {
                        self.caret -= 1;
                        text.remove(byte_index(text, self.caret));
                        status = EditStatus::Updated;
                    }
                }
                TextInput::Key(Key::Delete) => {
                    if self.caret < text.chars().count() {
                        text.remove(byte_index(text, self.caret));
                        status = EditStatus::Updated;
                    }
                }
                TextInput::Key(Key::Left) => self.caret = self.caret.saturating_sub(1),
                TextInput::Key(Key::Right) => {
                    self.caret = (self.caret + 1).min(text.chars().count());
                }
                TextInput::Key(Key::Home) => self.caret = 0,
                TextInput::Key(Key::End) => self.caret = text.chars().count(),
                TextInput::Key(Key::Enter) => return EditStatus::Finished,
                TextInput::Key(Key::Escape) => {
                    text.clone_from(&self.original);
                    return EditStatus::Canceled;
                }
                TextInput::Key(_) => {}
            }
        }
        status
    }

    /// Text before the caret, for placing it.
    pub fn before_caret<'t>(&self, text: &'t str) -> &'t str {
        &text[..byte_index(text, self.caret)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<TextInput> {
        s.chars().map(TextInput::Char).collect()
    }

    #[test]
    fn test_typing_appends_at_caret() {
        let mut text = String::from("ab");
        let mut session = EditSession::start(HashedId::of("e"), &text);
        assert_eq!(session.apply(&mut text, &chars("cd")), EditStatus::Updated);
        assert_eq!(text, "abcd");

        let inputs = [TextInput::Key(Key::Home), TextInput::Char('>')];
        session.apply(&mut text, &inputs);
        assert_eq!(text, ">abcd");
        assert_eq!(session.caret(), 1);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut text = String::from("héllo");
        let mut session = EditSession::start(HashedId::of("e"), &text);
        let inputs = [
            TextInput::Key(Key::Backspace),
            TextInput::Key(Key::Left),
            TextInput::Key(Key::Left),
            TextInput::Key(Key::Left),
            TextInput::Key(Key::Delete),
        ];
        assert_eq!(session.apply(&mut text, &inputs), EditStatus::Updated);
        assert_eq!(text, "hll");
        assert_eq!(session.before_caret(&text), "h");
    }

    #[test]
    fn test_escape_restores() {
        let mut text = String::from("keep");
        let mut session = EditSession::start(HashedId::of("e"), &text);
        let mut inputs = chars("xyz");
        inputs.push(TextInput::Key(Key::Escape));
        assert_eq!(session.apply(&mut text, &inputs), EditStatus::Canceled);
        assert_eq!(text, "keep");
    }

    #[test]
    fn test_enter_finishes() {
        let mut text = String::new();
        let mut session = EditSession::start(HashedId::of("e"), &text);
        let mut inputs = chars("ok");
        inputs.push(TextInput::Key(Key::Enter));
        inputs.extend(chars("ignored"));
        assert_eq!(session.apply(&mut text, &inputs), EditStatus::Finished);
        assert_eq!(text, "ok");
        assert_eq!(session.apply(&mut text, &[]), EditStatus::InEdit);
    }
}
