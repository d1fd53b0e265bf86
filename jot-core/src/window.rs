//! The main window of Jot
//!
//! The [`Window`] owns the [`Text`] being edited, keeps track of the
//! file that it belongs to and of its modified state, and dispatches
//! every [`Event`] from the [`Ui`] to its handler. Whenever changes
//! would be lost, the user is asked whether to save them first.
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};

use crate::{
    Error,
    action::{ActionId, Actions, Menu, default_menus},
    clipboard::Clipboard,
    opts::Opts,
    text::Text,
    ui::{Event, SaveChoice, Ui, View},
};

/// The name shown for a [`Window`] with no file
pub const UNTITLED: &str = "untitled.txt";

/// A window holding one [`Text`], shown through a [`Ui`]
pub struct Window<U: Ui> {
    ui: U,
    text: Text,
    cur_file: Option<PathBuf>,
    actions: Actions,
    menus: Vec<Menu>,
    clipboard: Clipboard,
    opts: Opts,
    title: String,
    closed: bool,
}

impl<U: Ui> Window<U> {
    /// Returns a new [`Window`], with an empty, untitled, [`Text`]
    pub fn new(ui: U, opts: Opts) -> Self {
        let clipboard = Clipboard::new(opts.system_clipboard);
        Self::with_clipboard(ui, opts, clipboard)
    }

    /// Returns a new [`Window`] that uses the given [`Clipboard`]
    pub fn with_clipboard(ui: U, opts: Opts, clipboard: Clipboard) -> Self {
        let mut window = Self {
            ui,
            text: Text::new(),
            cur_file: None,
            actions: Actions::new(),
            menus: default_menus(),
            clipboard,
            opts,
            title: String::new(),
            closed: false,
        };

        window.set_current_file(None);
        window
    }

    ////////// File operations

    /// Starts a new, untitled, document
    ///
    /// If there are unsaved changes, the user is asked what to do
    /// with them first.
    pub fn new_file(&mut self) {
        if self.maybe_save() {
            self.text.clear();
            self.set_current_file(None);
        }
    }

    /// Asks for a file, and opens it
    ///
    /// If there are unsaved changes, the user is asked what to do
    /// with them first.
    pub fn open(&mut self) {
        if self.maybe_save() {
            let dir = self.cur_dir();
            if let Some(path) = self.ui.open_file_name(dir.as_deref()) {
                self.load_file(&path);
            }
        }
    }

    /// Saves to the current file, or asks for one if there is none
    ///
    /// Returns `true` if the [`Text`] was saved.
    pub fn save(&mut self) -> bool {
        match self.cur_file.clone() {
            Some(path) => self.save_file(&path),
            None => self.save_as(),
        }
    }

    /// Asks for a file, and saves to it
    ///
    /// Returns `true` if the [`Text`] was saved.
    pub fn save_as(&mut self) -> bool {
        let dir = self.cur_dir();
        match self.ui.save_file_name(dir.as_deref()) {
            Some(path) => self.save_file(&path),
            None => false,
        }
    }

    /// Replaces the [`Text`] with the contents of a file
    ///
    /// On failure, the user is warned, and nothing changes. Returns
    /// `true` if the file was loaded.
    pub fn load_file(&mut self, path: &Path) -> bool {
        match read_file(path) {
            Ok(contents) => {
                self.text.set_plain_text(&contents);
                self.set_current_file(Some(path.to_path_buf()));
                info!("Opened {}", path.display());
                true
            }
            Err(err) => {
                self.warn(&err);
                false
            }
        }
    }

    /// Writes the whole [`Text`] to a file
    ///
    /// On failure, the user is warned, and the current file and
    /// modified state don't change. Returns `true` if the file was
    /// written.
    pub fn save_file(&mut self, path: &Path) -> bool {
        match write_file(path, &self.text) {
            Ok(()) => {
                self.set_current_file(Some(path.to_path_buf()));
                info!("Saved {}", path.display());
                true
            }
            Err(err) => {
                self.warn(&err);
                false
            }
        }
    }

    /// Adopts a file as the current one
    ///
    /// This clears the modified flag and updates the title.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.cur_file = path;
        self.text.set_modified(false);
        self.document_was_modified();
    }

    /// Asks to close the [`Window`]
    ///
    /// If there are unsaved changes, the user is asked what to do
    /// with them first, and may veto the closing. Returns `true` if
    /// the [`Window`] will close.
    pub fn close(&mut self) -> bool {
        self.closed = self.maybe_save();
        self.closed
    }

    /// Asks the user what to do with unsaved changes
    ///
    /// Returns `true` if whatever was going to happen should go on.
    pub fn maybe_save(&mut self) -> bool {
        if !self.text.is_modified() {
            return true;
        }

        let msg = "The document has been modified.\nDo you want to save your changes?";
        match self.ui.ask_to_save(self.opts.app_name, msg) {
            SaveChoice::Save => self.save(),
            SaveChoice::Discard => true,
            SaveChoice::Cancel => false,
        }
    }

    /// Updates the title to reflect the current file and modified
    /// state
    pub fn document_was_modified(&mut self) {
        let shown = match &self.cur_file {
            Some(path) => path.display().to_string(),
            None => UNTITLED.to_string(),
        };
        let modified = if self.text.is_modified() { "*" } else { "" };
        let title = format!("{shown}{modified} - {}", self.opts.app_name);

        if title != self.title {
            self.ui.set_title(&title);
            self.title = title;
        }
    }

    ////////// Actions and events

    /// Triggers an [`Action`], if it is enabled
    ///
    /// [`Action`]: crate::action::Action
    pub fn trigger(&mut self, id: ActionId) {
        if !self.actions.is_enabled(id) {
            debug!("Tried to trigger disabled action {id:?}");
            return;
        }

        match id {
            ActionId::New => self.new_file(),
            ActionId::Open => self.open(),
            ActionId::Save => {
                self.save();
            }
            ActionId::SaveAs => {
                self.save_as();
            }
            ActionId::Close => {
                self.close();
            }
            ActionId::Cut => self.cut(),
            ActionId::Copy => self.copy(),
            ActionId::Paste => self.paste(),
            ActionId::Undo => {
                self.text.undo();
            }
        }
    }

    /// Handles an [`Event`] from the [`Ui`]
    ///
    /// After this, the enabled flags of the [`Actions`] and the title
    /// reflect the new state.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(str) => self.text.insert_str(&str),
            Event::Resize => {}
            Event::Trigger(id) => self.trigger(id),
            Event::CloseRequested => {
                self.close();
            }
        }

        self.update_actions();
        self.document_was_modified();
    }

    /// Opens the [`Ui`], and handles [`Event`]s until the [`Window`]
    /// is closed
    pub fn run(&mut self) -> crate::Result<()> {
        self.run_with(None)
    }

    /// Like [`Window::run`], but loads a file once the [`Ui`] is open
    ///
    /// Failing to load it is shown as a warning within the [`Ui`], and
    /// leaves the [`Window`] untitled.
    pub fn run_with(&mut self, file: Option<&Path>) -> crate::Result<()> {
        let ret = self.ui.open().map_err(Error::from).and_then(|()| {
            if let Some(path) = file {
                self.load_file(path);
            }
            self.update_actions();
            self.event_loop()
        });
        // The Ui may be half open, so it is closed regardless.
        let closed = self.ui.close();

        ret?;
        Ok(closed?)
    }

    fn event_loop(&mut self) -> crate::Result<()> {
        while !self.closed {
            let view = View {
                title: &self.title,
                text: &self.text,
                actions: &self.actions,
                menus: &self.menus,
            };
            let event = self.ui.next_event(view)?;
            self.handle_event(event);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if let Some(id) = self.actions.find_by_shortcut(&key) {
            self.trigger(id);
            return;
        }

        let select = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let page = self.ui.page_height().max(1) as isize;

        let text = &mut self.text;
        match key.code {
            KeyCode::Char('a') if ctrl => text.select_all(),
            KeyCode::Char(char) if !ctrl && !alt => {
                text.insert_str(char.encode_utf8(&mut [0; 4]))
            }
            KeyCode::Enter => text.insert_str("\n"),
            KeyCode::Tab => text.insert_str("\t"),
            KeyCode::Backspace => text.backspace(),
            KeyCode::Delete => text.delete(),
            KeyCode::Left => text.move_hor(-1, select),
            KeyCode::Right => text.move_hor(1, select),
            KeyCode::Up => text.move_ver(-1, select),
            KeyCode::Down => text.move_ver(1, select),
            KeyCode::PageUp => text.move_ver(-page, select),
            KeyCode::PageDown => text.move_ver(page, select),
            KeyCode::Home if ctrl => text.move_to_start(select),
            KeyCode::Home => text.move_to_line_start(select),
            KeyCode::End if ctrl => text.move_to_end(select),
            KeyCode::End => text.move_to_line_end(select),
            _ => {}
        }
    }

    fn cut(&mut self) {
        self.copy();
        self.text.delete_selection();
    }

    fn copy(&mut self) {
        if let Some(selected) = self.text.selected_text() {
            self.clipboard.set_text(selected);
        }
    }

    fn paste(&mut self) {
        if let Some(text) = self.clipboard.get_text() {
            self.text.insert_str(&text);
        }
    }

    fn update_actions(&mut self) {
        let has_selection = self.text.has_selection();
        self.actions.set_enabled(ActionId::Cut, has_selection);
        self.actions.set_enabled(ActionId::Copy, has_selection);
        self.actions
            .set_enabled(ActionId::Undo, self.text.can_undo());
    }

    fn warn(&mut self, err: &Error) {
        warn!("{}", err.to_string().replace('\n', " "));
        self.ui.warn(self.opts.app_name, &err.to_string());
    }

    fn cur_dir(&self) -> Option<PathBuf> {
        self.cur_file
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    ////////// Querying functions

    /// The [`Text`] being edited
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// A mutable reference to the [`Text`]
    ///
    /// Call [`Window::document_was_modified`] after editing through
    /// it, in order to update the title.
    pub fn text_mut(&mut self) -> &mut Text {
        &mut self.text
    }

    /// The current file, if there is one
    pub fn cur_file(&self) -> Option<&Path> {
        self.cur_file.as_deref()
    }

    /// The title of the [`Window`]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether there are unsaved changes
    pub fn is_modified(&self) -> bool {
        self.text.is_modified()
    }

    /// The [`Actions`], with their enabled flags
    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    /// The [`Menu`]s of the menu bar
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// The [`Opts`] of this [`Window`]
    pub fn opts(&self) -> Opts {
        self.opts
    }

    /// Whether a close was requested and accepted
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The [`Ui`] of this [`Window`]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// A mutable reference to the [`Ui`] of this [`Window`]
    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}

/// Reads a whole file as UTF-8 text
fn read_file(path: &Path) -> crate::Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
    String::from_utf8(bytes).map_err(|_| Error::NotUtf8 { path: path.to_path_buf() })
}

/// Writes the whole [`Text`] to a file, replacing its contents
fn write_file(path: &Path, text: &Text) -> crate::Result<()> {
    let to_err = |source| Error::Write { path: path.to_path_buf(), source };

    let mut writer = BufWriter::new(fs::File::create(path).map_err(to_err)?);
    let [s0, s1] = text.bytes().strs(0..text.len());
    writer.write_all(s0.as_bytes()).map_err(to_err)?;
    writer.write_all(s1.as_bytes()).map_err(to_err)?;
    writer.flush().map_err(to_err)
}
