//! General options for a [`Window`]
//!
//! They are contained in an [`Opts`] struct, which is light and
//! cheap to copy around, and is used by the [`Window`] and by the
//! [`Ui`] when printing.
//!
//! [`Window`]: crate::window::Window
//! [`Ui`]: crate::ui::Ui

/// The distance to keep between the caret and the edges of the
/// screen when scrolling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollOff {
    /// The horizontal scrolloff
    pub x: u8,
    /// The vertical scrolloff
    pub y: u8,
}

/// Configuration options for a [`Window`]
///
/// [`Window`]: crate::window::Window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opts {
    /// How long tabs should be on screen
    ///
    /// The default is `4`
    pub tabstop: u8,
    /// How much space to keep between the caret and edges
    ///
    /// The default is `ScrollOff { x: 3, y: 3 }`
    pub scrolloff: ScrollOff,
    /// Whether to use the system's clipboard
    ///
    /// The default is `true`. If it can't be reached, a clipboard
    /// local to Jot is used instead.
    pub system_clipboard: bool,
    /// The name of the application, shown in titles and dialogs
    ///
    /// The default is `"Jot"`
    pub app_name: &'static str,
}

impl Opts {
    /// The default [`Opts`]
    pub const fn new() -> Self {
        Self {
            tabstop: 4,
            scrolloff: ScrollOff { x: 3, y: 3 },
            system_clipboard: true,
            app_name: "Jot",
        }
    }

    /// Returns a new [`Opts`] with a different `tabstop`
    pub const fn with_tabstop(self, tabstop: u8) -> Self {
        Self { tabstop, ..self }
    }

    /// Returns a new [`Opts`] with a different vertical and
    /// horizontal scrolloff
    pub const fn with_scrolloff(self, x: u8, y: u8) -> Self {
        Self { scrolloff: ScrollOff { x, y }, ..self }
    }

    /// Returns a new [`Opts`] that doesn't use the system clipboard
    pub const fn without_system_clipboard(self) -> Self {
        Self { system_clipboard: false, ..self }
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self::new()
    }
}
