//! The core of Jot, a small plain-text editor window
//!
//! This crate holds everything that is independent from how Jot is
//! shown: the [`Text`] widget with its undo [`History`], the fixed
//! set of [`Actions`] with their [`Menu`]s, the [`Clipboard`], the
//! [`Logs`], and the [`Window`], which ties all of them together and
//! talks to the user through a [`Ui`].
//!
//! [`Text`]: text::Text
//! [`History`]: text::History
//! [`Actions`]: action::Actions
//! [`Menu`]: action::Menu
//! [`Clipboard`]: clipboard::Clipboard
//! [`Logs`]: context::Logs
//! [`Window`]: window::Window
//! [`Ui`]: ui::Ui
use std::path::PathBuf;

pub mod action;
pub mod clipboard;
pub mod context;
pub mod opts;
pub mod text;
pub mod ui;
pub mod window;

pub mod prelude {
    //! The most commonly used items of Jot
    pub use crate::{
        Error,
        action::{ActionId, Actions, Menu},
        opts::Opts,
        text::Text,
        ui::{Event, SaveChoice, Ui, View},
        window::Window,
    };
}

/// An error in Jot
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file couldn't be read
    #[error("Cannot read file {}:\n{source}.", .path.display())]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// What went wrong
        source: std::io::Error,
    },
    /// A file was read, but it wasn't UTF-8 text
    #[error("Cannot read file {}:\nIt is not valid UTF-8 text.", .path.display())]
    NotUtf8 {
        /// The file that was read
        path: PathBuf,
    },
    /// A file couldn't be written to
    #[error("Cannot write file {}:\n{source}.", .path.display())]
    Write {
        /// The file that was being written to
        path: PathBuf,
        /// What went wrong
        source: std::io::Error,
    },
    /// The [`Ui`] failed to print or to receive input
    ///
    /// [`Ui`]: ui::Ui
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A convenience [`Result`] alias for Jot
///
/// [`Result`]: std::result::Result
pub type Result<T> = std::result::Result<T, Error>;
