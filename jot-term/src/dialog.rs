//! Modal dialogs for the terminal
//!
//! File dialogs are a prompt on the last row, with Tab completion of
//! paths. The save confirmation and warnings are boxes in the middle
//! of the screen.
use std::{
    fs,
    io::{self, Write},
    path::MAIN_SEPARATOR,
};

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use jot_core::ui::SaveChoice;
use unicode_width::UnicodeWidthStr;

/// What a key did to a [`LineInput`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The input was edited, or its cursor moved
    Edited,
    /// The input should be accepted
    Accept,
    /// The input should be thrown away
    Cancel,
    /// The input should be completed
    Complete,
    /// The key does nothing here
    Ignored,
}

/// A single line of editable text
#[derive(Default, Debug, Clone)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    /// Returns a new [`LineInput`], with the cursor at the end
    pub fn new(text: impl ToString) -> Self {
        let text = text.to_string();
        Self { cursor: text.len(), text }
    }

    /// The text that was typed
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Replaces the text, moving the cursor to the end
    pub fn set(&mut self, text: impl ToString) {
        *self = Self::new(text);
    }

    /// The `char` column of the cursor
    pub fn cursor_col(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Inserts a string at the cursor
    ///
    /// New lines are not allowed, and are left out.
    pub fn insert_str(&mut self, str: &str) {
        let str: String = str.chars().filter(|char| !char.is_control()).collect();
        self.text.insert_str(self.cursor, &str);
        self.cursor += str.len();
    }

    /// Handles a key
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        let prev_char = self.text[..self.cursor].chars().next_back();
        let next_char = self.text[self.cursor..].chars().next();

        match key.code {
            KeyCode::Enter => return InputOutcome::Accept,
            KeyCode::Esc => return InputOutcome::Cancel,
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return InputOutcome::Cancel;
            }
            KeyCode::Tab => return InputOutcome::Complete,
            KeyCode::Char(char)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_str(char.encode_utf8(&mut [0; 4]))
            }
            KeyCode::Backspace => {
                if let Some(char) = prev_char {
                    self.cursor -= char.len_utf8();
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if next_char.is_some() {
                    self.text.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor -= prev_char.map_or(0, char::len_utf8),
            KeyCode::Right => self.cursor += next_char.map_or(0, char::len_utf8),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.len(),
            _ => return InputOutcome::Ignored,
        }

        InputOutcome::Edited
    }
}

/// Completes a path as far as it is unambiguous
///
/// Directories are completed with a trailing separator. Returns
/// [`None`] if there is nothing to add.
pub fn complete_path(input: &str) -> Option<String> {
    let split = input.rfind(['/', MAIN_SEPARATOR]).map_or(0, |i| i + 1);
    let (dir, prefix) = input.split_at(split);

    let entries = fs::read_dir(if dir.is_empty() { "." } else { dir }).ok()?;
    let names: Vec<String> = entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let mut name = entry.file_name().into_string().ok()?;
            if !name.starts_with(prefix) {
                return None;
            }
            if entry.file_type().is_ok_and(|ty| ty.is_dir()) {
                name.push(MAIN_SEPARATOR);
            }
            Some(name)
        })
        .collect();

    let (first, rest) = names.split_first()?;
    let common = rest.iter().fold(first.as_str(), |common, name| {
        let len = common
            .char_indices()
            .zip(name.chars())
            .find(|((_, a), b)| a != b)
            .map_or(common.len().min(name.len()), |((i, _), _)| i);
        &common[..len]
    });

    (common.len() > prefix.len()).then(|| format!("{dir}{common}"))
}

/// The buttons of the save confirmation box
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveButtons {
    selected: usize,
}

impl SaveButtons {
    const CHOICES: [(SaveChoice, &'static str); 3] = [
        (SaveChoice::Save, "[S]ave"),
        (SaveChoice::Discard, "[D]iscard"),
        (SaveChoice::Cancel, "[C]ancel"),
    ];

    /// Returns new [`SaveButtons`], with Save selected
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Handles a key, returning a [`SaveChoice`] if one was made
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<SaveChoice> {
        match key.code {
            KeyCode::Char('s' | 'S') => Some(SaveChoice::Save),
            KeyCode::Char('d' | 'D') => Some(SaveChoice::Discard),
            KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(SaveChoice::Cancel),
            KeyCode::Enter => Some(Self::CHOICES[self.selected].0),
            KeyCode::Left | KeyCode::BackTab => {
                self.selected = (self.selected + 2) % 3;
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.selected = (self.selected + 1) % 3;
                None
            }
            _ => None,
        }
    }

    /// The labels, with the selected one
    pub fn labels(&self) -> ([&'static str; 3], usize) {
        (Self::CHOICES.map(|(_, label)| label), self.selected)
    }
}

impl Default for SaveButtons {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a key dismisses a warning
pub fn dismisses_warning(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
}

/// Prints a prompt on the last row
pub fn print_prompt(
    out: &mut impl Write,
    (width, height): (u16, u16),
    label: &str,
    input: &LineInput,
) -> io::Result<()> {
    let row = height.saturating_sub(1);
    let width = width as usize;
    let label_w = label.chars().count();

    // Scroll the input so that the cursor stays visible.
    let visible = width.saturating_sub(label_w + 1).max(1);
    let skip = (input.cursor_col() + 1).saturating_sub(visible);
    let shown: String = input.value().chars().skip(skip).take(visible).collect();

    queue!(
        out,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine),
        SetAttribute(Attribute::Bold),
        Print(label),
        SetAttribute(Attribute::Reset),
        Print(shown),
        cursor::MoveTo((label_w + input.cursor_col() - skip) as u16, row),
        cursor::Show,
    )?;
    out.flush()
}

/// Prints a box in the middle of the screen, with buttons at the
/// bottom
pub fn print_box(
    out: &mut impl Write,
    (width, height): (u16, u16),
    title: &str,
    msg: &str,
    (buttons, selected): (&[&str], Option<usize>),
) -> io::Result<()> {
    let buttons_w: usize = buttons.iter().map(|b| b.width() + 2).sum();
    let inner_w = msg
        .lines()
        .map(UnicodeWidthStr::width)
        .chain([title.width(), buttons_w])
        .max()
        .unwrap_or(0)
        .min((width as usize).saturating_sub(4));

    let lines: Vec<&str> = msg.lines().collect();
    let box_h = lines.len() + 4;
    let x = ((width as usize).saturating_sub(inner_w + 4) / 2) as u16;
    let mut y = ((height as usize).saturating_sub(box_h) / 2) as u16;

    let border = "─".repeat(inner_w + 2);
    let pad = |str: &str| {
        let str: String = str.chars().take(inner_w).collect();
        let fill = inner_w.saturating_sub(str.width());
        format!("│ {str}{} │", " ".repeat(fill))
    };

    queue!(out, cursor::Hide, cursor::MoveTo(x, y), Print(format!("┌{border}┐")))?;
    y += 1;
    queue!(out, cursor::MoveTo(x, y), SetAttribute(Attribute::Bold), Print(pad(title)))?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    for line in lines {
        y += 1;
        queue!(out, cursor::MoveTo(x, y), Print(pad(line)))?;
    }

    y += 1;
    queue!(out, cursor::MoveTo(x, y), Print("│ "))?;
    let fill = inner_w.saturating_sub(buttons_w);
    queue!(out, Print(" ".repeat(fill)))?;
    for (i, button) in buttons.iter().enumerate() {
        let attr = if selected == Some(i) { Attribute::Reverse } else { Attribute::Reset };
        queue!(
            out,
            Print(' '),
            SetAttribute(attr),
            Print(button),
            SetAttribute(Attribute::Reset),
            Print(' ')
        )?;
    }
    queue!(out, Print(" │"))?;

    y += 1;
    queue!(out, cursor::MoveTo(x, y), Print(format!("└{border}┘")))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn line_input_editing() {
        let mut input = LineInput::new("fle.txt");
        input.handle_key(&key(KeyCode::Home));
        input.handle_key(&key(KeyCode::Right));
        input.handle_key(&key(KeyCode::Char('i')));
        assert_eq!(input.value(), "file.txt");
        assert_eq!(input.cursor_col(), 2);

        input.handle_key(&key(KeyCode::End));
        input.handle_key(&key(KeyCode::Backspace));
        input.handle_key(&key(KeyCode::Char('é')));
        input.handle_key(&key(KeyCode::Left));
        input.handle_key(&key(KeyCode::Delete));
        assert_eq!(input.value(), "file.tx");

        assert_eq!(input.handle_key(&key(KeyCode::Enter)), InputOutcome::Accept);
        assert_eq!(input.handle_key(&key(KeyCode::Esc)), InputOutcome::Cancel);
        assert_eq!(input.handle_key(&key(KeyCode::Tab)), InputOutcome::Complete);
        assert_eq!(input.handle_key(&key(KeyCode::F(1))), InputOutcome::Ignored);
    }

    #[test]
    fn pasted_new_lines_are_left_out() {
        let mut input = LineInput::default();
        input.insert_str("some\npath");
        assert_eq!(input.value(), "somepath");
    }

    #[test]
    fn paths_complete_to_the_common_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("alpha.txt"), "").unwrap();
        fs::write(dir.path().join("alps.txt"), "").unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        let base = format!("{}{MAIN_SEPARATOR}", dir.path().display());

        assert_eq!(complete_path(&format!("{base}al")), Some(format!("{base}alp")));
        assert_eq!(complete_path(&format!("{base}alph")), Some(format!("{base}alpha.txt")));
        assert_eq!(complete_path(&format!("{base}b")), Some(format!("{base}beta{MAIN_SEPARATOR}")));
        assert_eq!(complete_path(&format!("{base}alp")), None);
        assert_eq!(complete_path(&format!("{base}zzz")), None);
    }

    #[test]
    fn save_buttons() {
        let mut buttons = SaveButtons::new();
        assert_eq!(buttons.handle_key(&key(KeyCode::Char('d'))), Some(SaveChoice::Discard));
        assert_eq!(buttons.handle_key(&key(KeyCode::Esc)), Some(SaveChoice::Cancel));

        assert_eq!(buttons.handle_key(&key(KeyCode::Left)), None);
        assert_eq!(buttons.labels().1, 2);
        assert_eq!(buttons.handle_key(&key(KeyCode::Enter)), Some(SaveChoice::Cancel));
        buttons.handle_key(&key(KeyCode::Right));
        assert_eq!(buttons.handle_key(&key(KeyCode::Enter)), Some(SaveChoice::Save));
    }

    #[test]
    fn boxes_and_prompts_print_without_errors() {
        let mut out = Vec::new();
        let (labels, selected) = SaveButtons::new().labels();
        print_box(&mut out, (40, 12), "Jot", "The document\nhas changed", (&labels, Some(selected)))
            .unwrap();
        let input = LineInput::new("a/very/long/path/name");
        print_prompt(&mut out, (20, 5), "Open: ", &input).unwrap();

        let out = String::from_utf8_lossy(&out);
        assert!(out.contains("has changed"));
        assert!(out.contains("[D]iscard"));
        assert!(out.contains("path/name"));
    }
}
