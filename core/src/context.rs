//! Host-side collaborators: text field, audio, and action application.
//!
//! The core never touches a text field directly. After `handle_key()` the
//! host applies the returned `KeyAction` to its text field, either by hand
//! or through `apply_action()` with a `TextSink` implementation.

use crate::feedback::FeedbackCategory;
use crate::router::KeyAction;
use std::ops::Range;
use tracing::warn;

/// Selection state of the text field, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// The field reports no selection at all.
    #[default]
    None,
    /// A selection exists but is empty (a plain cursor).
    Empty,
    /// A non-empty range is selected.
    NonEmpty,
}

impl SelectionState {
    /// Build from the `has_selection` / `selection_empty` pair.
    pub fn from_flags(has_selection: bool, selection_empty: bool) -> Self {
        match (has_selection, selection_empty) {
            (false, _) => Self::None,
            (true, true) => Self::Empty,
            (true, false) => Self::NonEmpty,
        }
    }
}

/// The text field the keyboard is typing into.
pub trait TextSink {
    /// Insert `text` as one edit, replacing any selection.
    fn commit_text(&mut self, text: &str);

    /// Remove `count` units before the cursor.
    fn delete_before_cursor(&mut self, count: usize);

    /// Remove the current selection.
    fn delete_selection(&mut self) {
        self.commit_text("");
    }

    /// Send a hardware-equivalent Enter key.
    fn send_enter(&mut self);

    fn selection(&self) -> SelectionState;

    fn show_input_method_picker(&mut self);
}

/// Plays key click sounds.
pub trait AudioSink {
    fn play(&mut self, category: FeedbackCategory);
}

/// Apply a routed action to the text field.
///
/// Page changes and language switches are session state and leave the
/// field untouched.
pub fn apply_action(action: &KeyAction, sink: &mut dyn TextSink) {
    match action {
        KeyAction::Delete => match sink.selection() {
            SelectionState::NonEmpty => sink.delete_selection(),
            SelectionState::Empty | SelectionState::None => sink.delete_before_cursor(1),
        },
        KeyAction::SendEnter => sink.send_enter(),
        KeyAction::InvokeSystemPicker => sink.show_input_method_picker(),
        KeyAction::CommitLiteral(_) | KeyAction::CommitCompound(_, _) => {
            match action.commit_text() {
                Some(text) => sink.commit_text(&text),
                None => warn!(?action, "not a valid codepoint, nothing committed"),
            }
        }
        KeyAction::ChangePage(_) | KeyAction::SwitchLanguage(_) => {}
    }
}

/// In-memory text field.
///
/// Positions are char offsets. A selection is a char range; an empty range
/// is a cursor reported as a selection.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    selection: Option<Range<usize>>,
    edits: usize,
    pickers_shown: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of edits applied (one per commit or deletion).
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    pub fn pickers_shown(&self) -> usize {
        self.pickers_shown
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.char_len());
        self.selection = None;
    }

    /// Select `range` (clamped); the cursor moves to its end.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.char_len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.selection = Some(start..end);
        self.cursor = end;
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn replace(&mut self, range: Range<usize>, with: &str) {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        self.text.replace_range(start..end, with);
        self.cursor = range.start + with.chars().count();
        self.selection = None;
        self.edits += 1;
    }
}

impl TextSink for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        let range = self
            .selection
            .clone()
            .unwrap_or(self.cursor..self.cursor);
        self.replace(range, text);
    }

    fn delete_before_cursor(&mut self, count: usize) {
        let end = self.selection.as_ref().map_or(self.cursor, |r| r.start);
        let start = end.saturating_sub(count);
        if start == end {
            self.selection = None;
            return;
        }
        self.replace(start..end, "");
    }

    fn send_enter(&mut self) {
        self.commit_text("\n");
    }

    fn selection(&self) -> SelectionState {
        match &self.selection {
            None => SelectionState::None,
            Some(range) if range.is_empty() => SelectionState::Empty,
            Some(_) => SelectionState::NonEmpty,
        }
    }

    fn show_input_method_picker(&mut self) {
        self.pickers_shown += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::KeyboardPage;
    use crate::router::Direction;

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(SelectionState::from_flags(false, false), SelectionState::None);
        assert_eq!(SelectionState::from_flags(false, true), SelectionState::None);
        assert_eq!(SelectionState::from_flags(true, true), SelectionState::Empty);
        assert_eq!(SelectionState::from_flags(true, false), SelectionState::NonEmpty);
    }

    #[test]
    fn test_delete_without_selection_removes_one_unit() {
        let mut buffer = TextBuffer::from_text("ꓡꓲ");
        apply_action(&KeyAction::Delete, &mut buffer);
        assert_eq!(buffer.text(), "ꓡ");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_delete_with_empty_selection_removes_one_unit() {
        let mut buffer = TextBuffer::from_text("abc");
        buffer.select(2..2);
        assert_eq!(buffer.selection(), SelectionState::Empty);
        apply_action(&KeyAction::Delete, &mut buffer);
        assert_eq!(buffer.text(), "ac");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_delete_with_selection_removes_selection_only() {
        let mut buffer = TextBuffer::from_text("hello world");
        buffer.select(5..11);
        apply_action(&KeyAction::Delete, &mut buffer);
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.selection(), SelectionState::None);
    }

    #[test]
    fn test_delete_at_start_is_noop() {
        let mut buffer = TextBuffer::new();
        apply_action(&KeyAction::Delete, &mut buffer);
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.edit_count(), 0);
    }

    #[test]
    fn test_compound_is_one_edit_of_length_two() {
        let mut buffer = TextBuffer::from_text("ꓠ");
        apply_action(&KeyAction::CommitCompound(0xA4F8, 0xA4FC), &mut buffer);
        assert_eq!(buffer.text(), "ꓠ\u{A4F8}\u{A4FC}");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.edit_count(), 1);
    }

    #[test]
    fn test_commit_replaces_selection() {
        let mut buffer = TextBuffer::from_text("abc");
        buffer.select(0..2);
        apply_action(&KeyAction::CommitLiteral('x' as i32), &mut buffer);
        assert_eq!(buffer.text(), "xc");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_invalid_codepoint_commits_nothing() {
        let mut buffer = TextBuffer::from_text("a");
        apply_action(&KeyAction::CommitLiteral(-777), &mut buffer);
        assert_eq!(buffer.text(), "a");
        assert_eq!(buffer.edit_count(), 0);
    }

    #[test]
    fn test_enter_picker_and_state_actions() {
        let mut buffer = TextBuffer::from_text("a");
        apply_action(&KeyAction::SendEnter, &mut buffer);
        apply_action(&KeyAction::InvokeSystemPicker, &mut buffer);
        apply_action(&KeyAction::ChangePage(KeyboardPage::Shift), &mut buffer);
        apply_action(&KeyAction::SwitchLanguage(Direction::Forward), &mut buffer);
        assert_eq!(buffer.text(), "a\n");
        assert_eq!(buffer.pickers_shown(), 1);
        assert_eq!(buffer.edit_count(), 1);
    }
}
