//! The plain text widget of Jot
//!
//! A [`Text`] holds UTF-8 [`Bytes`] in a gap buffer, a caret with an
//! optional selection anchor, and the undo [`History`] of every edit.
//! The modified flag is derived from the [`History`], so undoing back
//! to the last saved state makes the [`Text`] unmodified again.
//!
//! The caret and anchor are byte indices, always on `char`
//! boundaries.
use std::ops::Range;

pub use self::{
    bytes::{Bytes, Point},
    history::{Change, History},
};

mod bytes;
mod history;

/// The text of the document, with its caret and [`History`]
#[derive(Default, Clone, Debug)]
pub struct Text {
    bytes: Bytes,
    history: History,
    caret: usize,
    anchor: Option<usize>,
    /// The column to return to when moving vertically
    desired_col: Option<usize>,
}

impl Text {
    /// Returns a new, empty, [`Text`]
    pub fn new() -> Self {
        Self::default()
    }

    ////////// Whole text functions

    /// Replaces the whole [`Text`], clearing its [`History`]
    ///
    /// The caret is placed at the start and the [`Text`] is left
    /// unmodified.
    pub fn set_plain_text(&mut self, text: &str) {
        *self = Self {
            bytes: Bytes::new(text),
            ..Self::default()
        };
    }

    /// Removes all text and history
    pub fn clear(&mut self) {
        self.set_plain_text("");
    }

    /// The [`Bytes`] of this [`Text`]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// The length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the [`Text`] is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// An [`Iterator`] over the lines, starting from `line`
    ///
    /// The lines don't include their `'\n'`.
    pub fn lines_from(&self, line: usize) -> impl Iterator<Item = String> + '_ {
        (line..self.bytes.line_count()).map(|line| {
            let [s0, s1] = self.bytes.strs(self.bytes.line_range(line));
            format!("{s0}{s1}")
        })
    }

    ////////// Modification functions

    /// Inserts a string at the caret, replacing the selection, if
    /// there is one
    pub fn insert_str(&mut self, str: &str) {
        let range = match self.selection() {
            Some(range) => {
                self.history.seal();
                range
            }
            None => self.caret..self.caret,
        };
        self.edit(range, str);
    }

    /// Removes the selection, or the `char` before the caret
    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }

        if let Some(char) = self.bytes.char_before(self.caret) {
            let start = self.caret - char.len_utf8();
            self.edit(start..self.caret, "");
        }
    }

    /// Removes the selection, or the `char` after the caret
    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }

        if let Some(char) = self.bytes.char_after(self.caret) {
            self.edit(self.caret..self.caret + char.len_utf8(), "");
        }
    }

    /// Removes the selection, returning `true` if there was one
    pub fn delete_selection(&mut self) -> bool {
        match self.selection() {
            Some(range) => {
                self.history.seal();
                self.edit(range, "");
                self.history.seal();
                true
            }
            None => false,
        }
    }

    /// Undoes the last [`Change`], returning `true` if there was one
    ///
    /// The caret is placed at the end of the restored text.
    pub fn undo(&mut self) -> bool {
        let Some(change) = self.history.undo().map(Change::reverse) else {
            return false;
        };

        self.bytes.apply(&change);
        self.caret = change.added_end();
        self.anchor = None;
        self.desired_col = None;
        true
    }

    /// Whether there is anything to undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether the [`Text`] has changed since it was last marked as
    /// unmodified
    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    /// Sets the modified flag
    ///
    /// Setting it to `false` makes the current state the clean one.
    pub fn set_modified(&mut self, modified: bool) {
        if modified {
            self.history.set_dirty();
        } else {
            self.history.set_clean();
        }
    }

    fn edit(&mut self, range: Range<usize>, added: &str) {
        let [s0, s1] = self.bytes.strs(range.clone());
        if s0.is_empty() && s1.is_empty() && added.is_empty() {
            return;
        }

        let change = Change::new(range.start, format!("{s0}{s1}"), added);
        self.bytes.apply(&change);
        self.caret = change.added_end();
        self.history.add_change(change);
        self.anchor = None;
        self.desired_col = None;
    }

    ////////// Selection functions

    /// The selected byte range, if it isn't empty
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.caret) {
            std::cmp::Ordering::Less => Some(anchor..self.caret),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(self.caret..anchor),
        }
    }

    /// Whether there is a non empty selection
    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// The selected text, if there is any
    pub fn selected_text(&self) -> Option<String> {
        let [s0, s1] = self.bytes.strs(self.selection()?);
        Some(format!("{s0}{s1}"))
    }

    /// Selects the whole [`Text`], with the caret at the end
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.move_caret_to(self.len(), true);
    }

    ////////// Movement functions

    /// The caret's byte
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The caret's [`Point`]
    pub fn caret_point(&self) -> Point {
        self.bytes.point_at(self.caret)
    }

    /// Moves the caret by `by` `char`s, crossing lines
    pub fn move_hor(&mut self, by: isize, select: bool) {
        let mut caret = self.caret;
        if by < 0 {
            for _ in 0..by.unsigned_abs() {
                let Some(char) = self.bytes.char_before(caret) else {
                    break;
                };
                caret -= char.len_utf8();
            }
        } else {
            for _ in 0..by {
                let Some(char) = self.bytes.char_after(caret) else {
                    break;
                };
                caret += char.len_utf8();
            }
        }

        self.move_caret_to(caret, select);
    }

    /// Moves the caret by `by` lines, keeping the column if possible
    pub fn move_ver(&mut self, by: isize, select: bool) {
        let point = self.caret_point();
        let col = self.desired_col.unwrap_or(point.col);
        let line = point.line.saturating_add_signed(by);

        let caret = if by < 0 && point.line < by.unsigned_abs() {
            0
        } else if line >= self.bytes.line_count() {
            self.len()
        } else {
            self.bytes.byte_at(line, col)
        };

        self.move_caret_to(caret, select);
        self.desired_col = Some(col);
    }

    /// Moves the caret to the start of its line
    pub fn move_to_line_start(&mut self, select: bool) {
        let line = self.caret_point().line;
        self.move_caret_to(self.bytes.line_range(line).start, select);
    }

    /// Moves the caret to the end of its line
    pub fn move_to_line_end(&mut self, select: bool) {
        let line = self.caret_point().line;
        self.move_caret_to(self.bytes.line_range(line).end, select);
    }

    /// Moves the caret to the start of the [`Text`]
    pub fn move_to_start(&mut self, select: bool) {
        self.move_caret_to(0, select);
    }

    /// Moves the caret to the end of the [`Text`]
    pub fn move_to_end(&mut self, select: bool) {
        self.move_caret_to(self.len(), select);
    }

    fn move_caret_to(&mut self, caret: usize, select: bool) {
        if select {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }

        if caret != self.caret {
            self.history.seal();
        }
        self.caret = caret;
        self.desired_col = None;
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        let mut text = Self::new();
        text.set_plain_text(value);
        text
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.bytes, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(text: &mut Text, str: &str) {
        for char in str.chars() {
            text.insert_str(char.encode_utf8(&mut [0; 4]));
        }
    }

    #[test]
    fn typing_marks_as_modified_and_undo_restores() {
        let mut text = Text::from("hello");
        assert!(!text.is_modified());

        text.move_to_end(false);
        type_str(&mut text, " world");
        assert_eq!(text.to_string(), "hello world");
        assert!(text.is_modified());
        assert!(text.can_undo());

        assert!(text.undo());
        assert_eq!(text.to_string(), "hello");
        assert_eq!(text.caret(), 5);
        assert!(!text.is_modified());
        assert!(!text.undo());
    }

    #[test]
    fn selection_is_replaced_by_insertion() {
        let mut text = Text::from("one two three");
        text.move_hor(4, false);
        text.move_hor(3, true);

        assert_eq!(text.selected_text().as_deref(), Some("two"));
        text.insert_str("2");
        assert_eq!(text.to_string(), "one 2 three");
        assert!(!text.has_selection());

        text.undo();
        assert_eq!(text.to_string(), "one two three");
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_chars() {
        let mut text = Text::from("aé€b");
        text.move_hor(3, false);
        assert_eq!(text.caret(), 6);

        text.backspace();
        assert_eq!(text.to_string(), "aéb");
        text.delete();
        assert_eq!(text.to_string(), "aé");
        text.delete();
        assert_eq!(text.to_string(), "aé");

        text.undo();
        assert_eq!(text.to_string(), "aé€b");
    }

    #[test]
    fn vertical_movement_keeps_desired_column() {
        let mut text = Text::from("long line\nab\nanother line");
        text.move_hor(6, false);

        text.move_ver(1, false);
        assert_eq!(text.caret_point(), Point::new(1, 2));
        text.move_ver(1, false);
        assert_eq!(text.caret_point(), Point::new(2, 6));

        text.move_ver(5, false);
        assert_eq!(text.caret(), text.len());
        text.move_ver(-9, false);
        assert_eq!(text.caret(), 0);
    }

    #[test]
    fn select_all_and_delete() {
        let mut text = Text::from("a\nb\nc");
        text.select_all();
        assert_eq!(text.selected_text().as_deref(), Some("a\nb\nc"));

        assert!(text.delete_selection());
        assert!(text.is_empty());
        assert!(!text.delete_selection());
    }

    #[test]
    fn lines_from_skips_earlier_lines() {
        let text = Text::from("a\nbc\n\nd");
        let lines: Vec<String> = text.lines_from(1).collect();
        assert_eq!(lines, ["bc", "", "d"]);
    }
}
