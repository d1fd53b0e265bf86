//! Clipboard interaction for Jot
//!
//! The [`Clipboard`] uses the system's clipboard when one can be
//! reached, and falls back to a clipboard local to Jot otherwise.
use log::error;

/// A clipboard for Jot
pub enum Clipboard {
    /// The system clipboard
    Platform(arboard::Clipboard),
    /// A clipboard that only lives within Jot
    Local(Option<String>),
}

impl Clipboard {
    /// Returns a new [`Clipboard`]
    ///
    /// If `system` is `true`, tries to reach the system's clipboard,
    /// logging an error and using a local one if that fails.
    pub fn new(system: bool) -> Self {
        if !system {
            return Self::local();
        }

        match arboard::Clipboard::new() {
            Ok(clipb) => Self::Platform(clipb),
            Err(err) => {
                error!("Failed to reach the system clipboard: {err}");
                Self::local()
            }
        }
    }

    /// Returns a new, empty, local [`Clipboard`]
    pub fn local() -> Self {
        Self::Local(None)
    }

    /// The text in the [`Clipboard`], if there is any
    pub fn get_text(&mut self) -> Option<String> {
        match self {
            Self::Platform(clipb) => clipb.get_text().ok(),
            Self::Local(text) => text.clone(),
        }
    }

    /// Puts text in the [`Clipboard`]
    pub fn set_text(&mut self, text: String) {
        match self {
            Self::Platform(clipb) => {
                if let Err(err) = clipb.set_text(text.clone()) {
                    error!("Failed to write to the system clipboard: {err}");
                    *self = Self::Local(Some(text));
                }
            }
            Self::Local(old) => *old = Some(text),
        }
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::local()
    }
}
