//! A terminal [`Ui`] for Jot
//!
//! The window takes the whole terminal: a menu bar on the first row,
//! the text in the middle, and a status line at the bottom, showing
//! the title, the caret's position, and the last logged message.
//! Dialogs are modal, and take over input until they are answered.
//!
//! [`Ui`]: jot_core::ui::Ui
use std::{
    io::{self, Stdout, Write},
    panic,
    path::{MAIN_SEPARATOR, Path, PathBuf},
    sync::{
        Once,
        atomic::{AtomicBool, Ordering},
    },
};

use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, KeyEvent, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, ClearType},
};
use jot_core::{
    opts::Opts,
    ui::{self, SaveChoice, View},
};
use log::error;

pub use self::{
    dialog::{LineInput, SaveButtons},
    menu::{MenuBar, MenuOutcome},
    print::Printer,
};

mod dialog;
mod menu;
mod print;

/// The terminal [`Ui`]
///
/// [`Ui`]: jot_core::ui::Ui
pub struct Ui {
    out: Stdout,
    printer: Printer,
    menu_bar: MenuBar,
}

impl Ui {
    /// Returns a new [`Ui`]
    pub fn new(opts: Opts) -> Self {
        Self {
            out: io::stdout(),
            printer: Printer::new(opts),
            menu_bar: MenuBar::default(),
        }
    }

    /// Waits for the next pressed key, handling resizes and pastes
    /// in between
    fn read_key(&mut self, mut on_paste: impl FnMut(String)) -> io::Result<KeyEvent> {
        loop {
            match event::read()? {
                event::Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(key),
                event::Event::Resize(width, height) => self.printer.resize(width, height),
                event::Event::Paste(str) => on_paste(str),
                _ => {}
            }
        }
    }

    fn prompt_path(&mut self, label: &str, dir: Option<&Path>) -> io::Result<Option<PathBuf>> {
        let initial = match dir {
            Some(dir) => format!("{}{MAIN_SEPARATOR}", dir.display()),
            None => String::new(),
        };
        let mut input = LineInput::new(initial);

        loop {
            dialog::print_prompt(&mut self.out, self.printer.size(), label, &input)?;

            let mut pasted = Vec::new();
            let key = self.read_key(|str| pasted.push(str))?;
            for str in pasted {
                input.insert_str(&str);
            }

            match input.handle_key(&key) {
                dialog::InputOutcome::Accept => {
                    let path = input.value().trim();
                    return Ok((!path.is_empty()).then(|| PathBuf::from(path)));
                }
                dialog::InputOutcome::Cancel => return Ok(None),
                dialog::InputOutcome::Complete => {
                    if let Some(completed) = dialog::complete_path(input.value()) {
                        input.set(completed);
                    }
                }
                dialog::InputOutcome::Edited | dialog::InputOutcome::Ignored => {}
            }
        }
    }

    fn confirm(&mut self, title: &str, msg: &str) -> io::Result<SaveChoice> {
        let mut buttons = SaveButtons::new();
        loop {
            let (labels, selected) = buttons.labels();
            let buttons_to_print = (&labels[..], Some(selected));
            dialog::print_box(&mut self.out, self.printer.size(), title, msg, buttons_to_print)?;

            let key = self.read_key(|_| {})?;
            if let Some(choice) = buttons.handle_key(&key) {
                return Ok(choice);
            }
        }
    }

    fn warning(&mut self, title: &str, msg: &str) -> io::Result<()> {
        let buttons = (&["[ OK ]"][..], Some(0));
        loop {
            dialog::print_box(&mut self.out, self.printer.size(), title, msg, buttons)?;
            if dialog::dismisses_warning(&self.read_key(|_| {})?) {
                return Ok(());
            }
        }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(Opts::default())
    }
}

impl ui::Ui for Ui {
    fn open(&mut self) -> io::Result<()> {
        restore_on_panic();
        terminal::enable_raw_mode()?;
        execute!(self.out, terminal::EnterAlternateScreen, EnableBracketedPaste)?;

        // Needed to tell Ctrl+Shift+S apart from Ctrl+S.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;
            execute!(self.out, PushKeyboardEnhancementFlags(flags))?;
            KEYS_ENHANCED.store(true, Ordering::Relaxed);
        }

        let (width, height) = terminal::size()?;
        self.printer.resize(width, height);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        let popped = pop_keyboard_flags(&mut self.out);
        let restored = restore_terminal(&mut self.out);
        let raw = terminal::disable_raw_mode();

        popped.and(restored).and(raw)
    }

    fn set_title(&mut self, title: &str) {
        if let Err(err) = execute!(self.out, terminal::SetTitle(title)) {
            error!("Failed to set the terminal's title: {err}");
        }
    }

    fn next_event(&mut self, view: View<'_>) -> io::Result<ui::Event> {
        loop {
            self.printer.print(&mut self.out, view, &self.menu_bar)?;

            match event::read()? {
                event::Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match self.menu_bar.handle_key(&key, view.actions, view.menus) {
                        MenuOutcome::Ignored => return Ok(ui::Event::Key(key)),
                        MenuOutcome::Consumed => {}
                        MenuOutcome::Trigger(id) => return Ok(ui::Event::Trigger(id)),
                    }
                }
                event::Event::Resize(width, height) => {
                    self.printer.resize(width, height);
                    return Ok(ui::Event::Resize);
                }
                event::Event::Paste(str) => return Ok(ui::Event::Paste(str)),
                _ => {}
            }
        }
    }

    fn page_height(&self) -> usize {
        self.printer.text_height()
    }

    fn open_file_name(&mut self, dir: Option<&Path>) -> Option<PathBuf> {
        self.prompt_path("Open file: ", dir).unwrap_or_else(|err| {
            error!("Failed to show the open dialog: {err}");
            None
        })
    }

    fn save_file_name(&mut self, dir: Option<&Path>) -> Option<PathBuf> {
        self.prompt_path("Save as: ", dir).unwrap_or_else(|err| {
            error!("Failed to show the save dialog: {err}");
            None
        })
    }

    fn ask_to_save(&mut self, title: &str, msg: &str) -> SaveChoice {
        self.confirm(title, msg).unwrap_or_else(|err| {
            error!("Failed to ask about unsaved changes: {err}");
            SaveChoice::Cancel
        })
    }

    fn warn(&mut self, title: &str, msg: &str) {
        if let Err(err) = self.warning(title, msg) {
            error!("Failed to show a warning: {err}");
        }
    }
}

/// Whether keyboard enhancement flags were pushed, and not popped
static KEYS_ENHANCED: AtomicBool = AtomicBool::new(false);

fn pop_keyboard_flags(out: &mut impl Write) -> io::Result<()> {
    if KEYS_ENHANCED.swap(false, Ordering::Relaxed) {
        execute!(out, PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    }
}

/// Writes what is needed to leave the terminal the way it was
/// found, except for raw mode
fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableBracketedPaste,
        terminal::Clear(ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    )
}

/// Makes it so that, if Jot panics, the terminal is restored before
/// the panic message is printed
fn restore_on_panic() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let orig_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = pop_keyboard_flags(&mut io::stdout());
            let _ = restore_terminal(&mut io::stdout());
            let _ = terminal::disable_raw_mode();

            orig_hook(panic_info);
        }));
    });
}
