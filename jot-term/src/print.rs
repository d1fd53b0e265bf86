use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use jot_core::{
    context::{self, Level},
    opts::Opts,
    ui::View,
};
use unicode_width::UnicodeWidthChar;

use crate::menu::{self, MenuBar};

/// A `char` on screen, with the byte it came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// The `char` to print, tabs and control `char`s already replaced
    pub char: char,
    /// The byte of the `char` in its line
    pub byte: usize,
    /// The first column that this [`Cell`] occupies
    pub col: usize,
    /// How many columns this [`Cell`] occupies
    pub width: usize,
}

/// Splits a line into [`Cell`]s, expanding tabs
pub fn cells(line: &str, tabstop: u8) -> Vec<Cell> {
    let tabstop = tabstop.max(1) as usize;
    let mut cells = Vec::new();
    let mut col = 0;

    for (byte, char) in line.char_indices() {
        if char == '\t' {
            let width = tabstop - col % tabstop;
            for i in 0..width {
                cells.push(Cell { char: ' ', byte, col: col + i, width: 1 });
            }
            col += width;
        } else if char.is_control() {
            cells.push(Cell { char: '?', byte, col, width: 1 });
            col += 1;
        } else {
            let width = char.width().unwrap_or(1);
            cells.push(Cell { char, byte, col, width });
            col += width;
        }
    }

    cells
}

/// The column where a byte in a line would be printed
pub fn col_of(line: &str, byte: usize, tabstop: u8) -> usize {
    let prefix = line.get(..byte).unwrap_or(line);
    cells(prefix, tabstop)
        .last()
        .map(|cell| cell.col + cell.width)
        .unwrap_or(0)
}

/// Where to start showing things, so that `target` is at least
/// `off` away from the edges of a `len` long space
pub fn scroll_to(start: usize, target: usize, len: usize, off: usize) -> usize {
    if len == 0 {
        return target;
    }
    let off = off.min(len.saturating_sub(1) / 2);

    if target < start + off {
        target.saturating_sub(off)
    } else if target + off >= start + len {
        target + off + 1 - len
    } else {
        start
    }
}

/// Prints a [`View`] to the terminal
///
/// The first row holds the menu bar, the last one holds the status
/// line, and the [`Text`] is printed in between.
///
/// [`Text`]: jot_core::text::Text
pub struct Printer {
    width: u16,
    height: u16,
    top: usize,
    left: usize,
    opts: Opts,
}

impl Printer {
    /// Returns a new [`Printer`]
    pub fn new(opts: Opts) -> Self {
        Self { width: 80, height: 24, top: 0, left: 0, opts }
    }

    /// Changes the size of the screen
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// The size of the screen
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// How many lines of text fit on screen
    pub fn text_height(&self) -> usize {
        self.height.saturating_sub(2) as usize
    }

    /// The first line and column shown, after scrolling to the
    /// caret
    pub fn scroll(&mut self, view: &View) -> (usize, usize) {
        let caret = view.text.caret_point();
        let line = view.text.lines_from(caret.line).next().unwrap_or_default();
        let caret_byte = view.text.caret() - view.text.bytes().line_range(caret.line).start;
        let caret_col = col_of(&line, caret_byte, self.opts.tabstop);

        let off = self.opts.scrolloff;
        self.top = scroll_to(self.top, caret.line, self.text_height(), off.y as usize);
        self.left = scroll_to(self.left, caret_col, self.width as usize, off.x as usize);

        (self.top, self.left)
    }

    /// Prints the whole [`View`], along with the [`MenuBar`]
    pub fn print(
        &mut self,
        out: &mut impl Write,
        view: View,
        menu_bar: &MenuBar,
    ) -> io::Result<()> {
        let (top, left) = self.scroll(&view);
        queue!(out, terminal::BeginSynchronizedUpdate, cursor::Hide)?;

        menu::print_bar(out, view, menu_bar, self.width)?;
        self.print_text(out, &view, top, left)?;
        self.print_status(out, &view)?;

        if menu_bar.is_open() {
            menu::print_dropdown(out, view, menu_bar)?;
        } else {
            let caret = view.text.caret_point();
            let line = view.text.lines_from(caret.line).next().unwrap_or_default();
            let caret_byte = view.text.caret() - view.text.bytes().line_range(caret.line).start;
            let col = col_of(&line, caret_byte, self.opts.tabstop) - left;
            let row = caret.line - top + 1;
            queue!(out, cursor::MoveTo(col as u16, row as u16), cursor::Show)?;
        }

        queue!(out, terminal::EndSynchronizedUpdate)?;
        out.flush()
    }

    fn print_text(
        &self,
        out: &mut impl Write,
        view: &View,
        top: usize,
        left: usize,
    ) -> io::Result<()> {
        let selection = view.text.selection();
        let width = self.width as usize;
        let mut line_start = view.text.bytes().line_range(top).start;
        let mut lines = view.text.lines_from(top);

        for row in 1..=self.text_height() {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            let Some(line) = lines.next() else {
                queue!(out, terminal::Clear(ClearType::UntilNewLine))?;
                continue;
            };

            let mut selected = false;
            for cell in cells(&line, self.opts.tabstop) {
                if cell.col < left || cell.col + cell.width > left + width {
                    continue;
                }

                let byte = line_start + cell.byte;
                let is_selected = selection.as_ref().is_some_and(|sel| sel.contains(&byte));
                if is_selected != selected {
                    let attr = if is_selected { Attribute::Reverse } else { Attribute::NoReverse };
                    queue!(out, SetAttribute(attr))?;
                    selected = is_selected;
                }
                queue!(out, Print(cell.char))?;
            }

            // The new line is shown as selected as well.
            let nl = line_start + line.len();
            if selection.as_ref().is_some_and(|sel| sel.contains(&nl)) && !selected {
                queue!(out, SetAttribute(Attribute::Reverse), Print(' '))?;
                selected = true;
            }
            if selected {
                queue!(out, SetAttribute(Attribute::NoReverse))?;
            }

            queue!(out, terminal::Clear(ClearType::UntilNewLine))?;
            line_start = nl + 1;
        }

        Ok(())
    }

    fn print_status(&self, out: &mut impl Write, view: &View) -> io::Result<()> {
        let caret = view.text.caret_point();
        let left = format!(" {}  Ln {}, Col {} ", view.title, caret.line + 1, caret.col + 1);

        queue!(
            out,
            cursor::MoveTo(0, self.height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(truncate(&left, self.width as usize)),
            SetAttribute(Attribute::NoReverse),
        )?;

        let remaining = (self.width as usize).saturating_sub(left.chars().count());
        if let Some(rec) = context::logs().last() {
            let color = match rec.level() {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                _ => Color::Reset,
            };
            let msg = format!(" {}", rec.msg().replace('\n', " "));
            queue!(out, SetForegroundColor(color), Print(truncate(&msg, remaining)), ResetColor)?;
        }

        queue!(out, terminal::Clear(ClearType::UntilNewLine))
    }
}

/// Cuts a string down to `width` `char`s
pub fn truncate(str: &str, width: usize) -> String {
    str.chars().take(width).collect()
}
