//! The menu bar, on the first row of the screen
//!
//! F10, or Alt plus the mnemonic of a [`Menu`], opens it. While open,
//! it takes every key: Left and Right switch [`Menu`]s, Up and Down
//! move between enabled [`Action`]s, Enter or an [`Action`]'s
//! mnemonic triggers it, and Esc closes the [`MenuBar`].
//!
//! [`Action`]: jot_core::action::Action
use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use jot_core::{
    action::{ActionId, Actions, Menu},
    ui::View,
};

/// What the [`MenuBar`] did with a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The key has nothing to do with the [`MenuBar`]
    Ignored,
    /// The [`MenuBar`] used the key
    Consumed,
    /// An [`Action`] was chosen
    ///
    /// [`Action`]: jot_core::action::Action
    Trigger(ActionId),
}

/// The state of the menu bar
#[derive(Default, Debug)]
pub struct MenuBar {
    /// The open [`Menu`], and the selected item in it
    open: Option<(usize, Option<usize>)>,
}

impl MenuBar {
    /// Whether a [`Menu`] is open
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The open [`Menu`] and its selected item
    pub fn selected(&self) -> Option<(usize, Option<usize>)> {
        self.open
    }

    /// Opens a [`Menu`], selecting its first enabled item
    pub fn open(&mut self, menu: usize, actions: &Actions, menus: &[Menu]) {
        let item = menus
            .get(menu)
            .and_then(|menu| next_enabled(menu, actions, None, 1));
        self.open = Some((menu, item));
    }

    /// Closes the open [`Menu`]
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Handles a key, possibly opening, moving through or closing
    /// [`Menu`]s
    pub fn handle_key(&mut self, key: &KeyEvent, actions: &Actions, menus: &[Menu]) -> MenuOutcome {
        let Some((menu_i, item)) = self.open else {
            return match key.code {
                KeyCode::F(10) if !menus.is_empty() => {
                    self.open(0, actions, menus);
                    MenuOutcome::Consumed
                }
                KeyCode::Char(char) if key.modifiers == KeyModifiers::ALT => {
                    let char = char.to_ascii_lowercase();
                    match menus.iter().position(|menu| menu.mnemonic() == Some(char)) {
                        Some(menu_i) => {
                            self.open(menu_i, actions, menus);
                            MenuOutcome::Consumed
                        }
                        None => MenuOutcome::Ignored,
                    }
                }
                _ => MenuOutcome::Ignored,
            };
        };

        let menu = &menus[menu_i];
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => self.close(),
            KeyCode::Left => {
                let menu_i = (menu_i + menus.len() - 1) % menus.len();
                self.open(menu_i, actions, menus)
            }
            KeyCode::Right => self.open((menu_i + 1) % menus.len(), actions, menus),
            KeyCode::Up => self.open = Some((menu_i, next_enabled(menu, actions, item, -1))),
            KeyCode::Down => self.open = Some((menu_i, next_enabled(menu, actions, item, 1))),
            KeyCode::Enter => {
                if let Some(item) = item {
                    self.close();
                    return MenuOutcome::Trigger(menu.actions()[item]);
                }
            }
            KeyCode::Char(char) => {
                let char = char.to_ascii_lowercase();
                let chosen = menu.actions().iter().find(|id| {
                    let action = actions.get(**id);
                    action.is_enabled() && action.mnemonic() == Some(char)
                });
                if let Some(id) = chosen {
                    self.close();
                    return MenuOutcome::Trigger(*id);
                }
            }
            _ => {}
        }

        MenuOutcome::Consumed
    }
}

/// The next enabled item after `from`, going in direction `dir`
///
/// Wraps around, returning [`None`] only if there are no enabled
/// items.
fn next_enabled(menu: &Menu, actions: &Actions, from: Option<usize>, dir: isize) -> Option<usize> {
    let len = menu.actions().len() as isize;
    let start = match from {
        Some(from) => from as isize,
        None if dir > 0 => -1,
        None => len,
    };

    (1..=len)
        .map(|step| (start + step * dir).rem_euclid(len) as usize)
        .find(|i| actions.is_enabled(menu.actions()[*i]))
}

/// The column where each [`Menu`]'s title is printed
pub fn title_cols(menus: &[Menu]) -> Vec<usize> {
    let mut col = 1;
    menus
        .iter()
        .map(|menu| {
            let title_col = col;
            col += menu.title().chars().count() + 2;
            title_col
        })
        .collect()
}

/// Prints the bar with all [`Menu`] titles
pub fn print_bar(
    out: &mut impl Write,
    view: View,
    menu_bar: &MenuBar,
    width: u16,
) -> io::Result<()> {
    let open = menu_bar.selected().map(|(menu, _)| menu);
    queue!(out, cursor::MoveTo(0, 0), SetAttribute(Attribute::Reverse))?;

    let mut printed = 0;
    for (i, menu) in view.menus.iter().enumerate() {
        let title = format!(" {} ", menu.title());
        printed += title.chars().count();
        if open == Some(i) {
            queue!(
                out,
                SetAttribute(Attribute::NoReverse),
                Print(title),
                SetAttribute(Attribute::Reverse)
            )?;
        } else {
            queue!(out, Print(title))?;
        }
    }

    let padding = " ".repeat((width as usize).saturating_sub(printed));
    queue!(out, Print(padding), SetAttribute(Attribute::NoReverse))
}

/// Prints the open [`Menu`], below its title
pub fn print_dropdown(out: &mut impl Write, view: View, menu_bar: &MenuBar) -> io::Result<()> {
    let Some((menu_i, item)) = menu_bar.selected() else {
        return Ok(());
    };
    let Some(menu) = view.menus.get(menu_i) else {
        return Ok(());
    };
    let col = title_cols(view.menus)[menu_i].saturating_sub(1) as u16;

    let entries: Vec<(String, String, bool)> = menu
        .actions()
        .iter()
        .map(|id| {
            let action = view.actions.get(*id);
            (action.text(), action.shortcut_text(), action.is_enabled())
        })
        .collect();
    let text_w = entries.iter().map(|(text, ..)| text.chars().count()).max().unwrap_or(0);
    let short_w = entries.iter().map(|(_, short, _)| short.chars().count()).max().unwrap_or(0);

    for (i, (text, short, enabled)) in entries.iter().enumerate() {
        let line = format!(" {text:<text_w$}  {short:>short_w$} ");
        let attr = if item == Some(i) {
            Attribute::Reverse
        } else if !enabled {
            Attribute::Dim
        } else {
            Attribute::Reset
        };

        queue!(
            out,
            cursor::MoveTo(col, i as u16 + 1),
            SetAttribute(attr),
            Print(line),
            SetAttribute(Attribute::Reset),
        )?;
    }

    queue!(
        out,
        cursor::MoveTo(0, entries.len() as u16 + 1),
        terminal::Clear(ClearType::CurrentLine)
    )
}

#[cfg(test)]
mod tests {
    use jot_core::action::default_menus;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opens_with_f10_and_alt_mnemonics() {
        let (actions, menus) = (Actions::new(), default_menus());
        let mut bar = MenuBar::default();

        let plain_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE);
        assert_eq!(bar.handle_key(&plain_e, &actions, &menus), MenuOutcome::Ignored);

        let alt_e = KeyEvent::new(KeyCode::Char('e'), KeyModifiers::ALT);
        assert_eq!(bar.handle_key(&alt_e, &actions, &menus), MenuOutcome::Consumed);
        // Cut and Copy are disabled, so Paste is the first selection.
        assert_eq!(bar.selected(), Some((1, Some(2))));

        bar.handle_key(&key(KeyCode::Esc), &actions, &menus);
        assert!(!bar.is_open());

        bar.handle_key(&key(KeyCode::F(10)), &actions, &menus);
        assert_eq!(bar.selected(), Some((0, Some(0))));
    }

    #[test]
    fn navigation_skips_disabled_items_and_wraps() {
        let (actions, menus) = (Actions::new(), default_menus());
        let mut bar = MenuBar::default();
        bar.open(1, &actions, &menus);

        // Paste -> Undo is disabled -> Cut and Copy are disabled -> Paste.
        bar.handle_key(&key(KeyCode::Down), &actions, &menus);
        assert_eq!(bar.selected(), Some((1, Some(2))));

        bar.handle_key(&key(KeyCode::Right), &actions, &menus);
        assert_eq!(bar.selected(), Some((0, Some(0))));
        bar.handle_key(&key(KeyCode::Up), &actions, &menus);
        assert_eq!(bar.selected(), Some((0, Some(4))));
        bar.handle_key(&key(KeyCode::Left), &actions, &menus);
        assert_eq!(bar.selected(), Some((1, Some(2))));
    }

    #[test]
    fn enter_and_mnemonics_trigger_enabled_actions() {
        let (mut actions, menus) = (Actions::new(), default_menus());
        let mut bar = MenuBar::default();

        bar.open(0, &actions, &menus);
        bar.handle_key(&key(KeyCode::Down), &actions, &menus);
        let outcome = bar.handle_key(&key(KeyCode::Enter), &actions, &menus);
        assert_eq!(outcome, MenuOutcome::Trigger(ActionId::Open));
        assert!(!bar.is_open());

        bar.open(1, &actions, &menus);
        let cut = key(KeyCode::Char('t'));
        assert_eq!(bar.handle_key(&cut, &actions, &menus), MenuOutcome::Consumed);
        assert!(bar.is_open());

        actions.set_enabled(ActionId::Cut, true);
        assert_eq!(
            bar.handle_key(&cut, &actions, &menus),
            MenuOutcome::Trigger(ActionId::Cut)
        );
    }

    #[test]
    fn titles_are_spaced_out() {
        assert_eq!(title_cols(&default_menus()), [1, 7]);
    }
}
