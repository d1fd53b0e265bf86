//! The [`Ui`] trait, which is how a [`Window`] shows itself
//!
//! A [`Ui`] is responsible for printing the [`Window`], for
//! receiving input, and for showing the dialogs of the [`Window`].
//! Every dialog is modal: the functions only return once the user
//! has given an answer.
//!
//! [`Window`]: crate::window::Window
use std::{
    io,
    path::{Path, PathBuf},
};

pub use crossterm::event::KeyEvent;

use crate::{
    action::{ActionId, Actions, Menu},
    text::Text,
};

/// An event sent by the [`Ui`] to the [`Window`]
///
/// [`Window`]: crate::window::Window
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// Text was pasted into the [`Ui`] from the outside
    Paste(String),
    /// The [`Ui`] was resized
    Resize,
    /// An [`Action`] was triggered through a [`Menu`]
    ///
    /// [`Action`]: crate::action::Action
    Trigger(ActionId),
    /// The user wants to close the window
    CloseRequested,
}

/// The choice of the user when asked to save changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveChoice {
    /// Save the changes
    Save,
    /// Throw the changes away
    Discard,
    /// Don't go through with whatever would lose the changes
    Cancel,
}

/// What the [`Ui`] needs in order to print a [`Window`]
///
/// [`Window`]: crate::window::Window
#[derive(Clone, Copy)]
pub struct View<'a> {
    /// The title of the [`Window`]
    ///
    /// [`Window`]: crate::window::Window
    pub title: &'a str,
    /// The [`Text`] being edited
    pub text: &'a Text,
    /// The [`Actions`], with their enabled flags
    pub actions: &'a Actions,
    /// The [`Menu`]s of the menu bar
    pub menus: &'a [Menu],
}

/// All the functions that a [`Ui`] needs to implement
pub trait Ui {
    /// Initiates the [`Ui`], before anything is printed
    fn open(&mut self) -> io::Result<()>;

    /// Tears down the [`Ui`]
    fn close(&mut self) -> io::Result<()>;

    /// Sets the title of the window
    fn set_title(&mut self, title: &str);

    /// Prints the [`View`], then waits for the next [`Event`]
    fn next_event(&mut self, view: View<'_>) -> io::Result<Event>;

    /// How many lines a page up or page down should move by
    fn page_height(&self) -> usize;

    /// Asks for a file to open, starting at `dir`
    ///
    /// Returns [`None`] if the user cancelled.
    fn open_file_name(&mut self, dir: Option<&Path>) -> Option<PathBuf>;

    /// Asks for a file to save to, starting at `dir`
    ///
    /// Returns [`None`] if the user cancelled.
    fn save_file_name(&mut self, dir: Option<&Path>) -> Option<PathBuf>;

    /// Asks whether to save, discard, or keep unsaved changes
    fn ask_to_save(&mut self, title: &str, msg: &str) -> SaveChoice;

    /// Shows a warning, returning once it is dismissed
    fn warn(&mut self, title: &str, msg: &str);
}
