//! The fixed set of actions of a [`Window`], and its menus
//!
//! Every [`Action`] has a label, with an `&` before its mnemonic, a
//! keyboard shortcut, and an enabled flag. The [`Window`] keeps the
//! flags in sync with the state of the [`Text`], and the [`Ui`] uses
//! them to print the menus.
//!
//! [`Window`]: crate::window::Window
//! [`Text`]: crate::text::Text
//! [`Ui`]: crate::ui::Ui
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The identifier of an [`Action`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// Start a new, untitled, document
    New,
    /// Open a file
    Open,
    /// Save to the current file
    Save,
    /// Save to a chosen file
    SaveAs,
    /// Close the window
    Close,
    /// Cut the selection
    Cut,
    /// Copy the selection
    Copy,
    /// Paste from the clipboard
    Paste,
    /// Undo the last change
    Undo,
}

/// A named action, with a shortcut and an enabled flag
#[derive(Clone, Debug)]
pub struct Action {
    id: ActionId,
    label: &'static str,
    shortcut: KeyEvent,
    enabled: bool,
}

impl Action {
    fn new(id: ActionId, label: &'static str, code: char, modifiers: KeyModifiers) -> Self {
        Self {
            id,
            label,
            shortcut: KeyEvent::new(KeyCode::Char(code), modifiers),
            enabled: true,
        }
    }

    /// The [`ActionId`] of this [`Action`]
    pub fn id(&self) -> ActionId {
        self.id
    }

    /// The label, without the `&` that marks the mnemonic
    pub fn text(&self) -> String {
        self.label.replacen('&', "", 1)
    }

    /// The mnemonic, which is the `char` after the `&` in the label
    pub fn mnemonic(&self) -> Option<char> {
        let (_, after) = self.label.split_once('&')?;
        after.chars().next().map(|char| char.to_ascii_lowercase())
    }

    /// The shortcut of this [`Action`]
    pub fn shortcut(&self) -> KeyEvent {
        self.shortcut
    }

    /// The shortcut as a human readable string, like `Ctrl+S`
    pub fn shortcut_text(&self) -> String {
        let mut text = String::new();
        if self.shortcut.modifiers.contains(KeyModifiers::CONTROL) {
            text.push_str("Ctrl+");
        }
        if self.shortcut.modifiers.contains(KeyModifiers::ALT) {
            text.push_str("Alt+");
        }
        if self.shortcut.modifiers.contains(KeyModifiers::SHIFT) {
            text.push_str("Shift+");
        }
        if let KeyCode::Char(char) = self.shortcut.code {
            text.push(char.to_ascii_uppercase());
        }
        text
    }

    /// Whether this [`Action`] can be triggered
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a key event triggers this [`Action`]
    ///
    /// Terminals report shifted letters differently, so `char`s are
    /// compared case insensitively, with the `SHIFT` modifier
    /// implied by an uppercase letter.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let (KeyCode::Char(expected), KeyCode::Char(got)) = (self.shortcut.code, key.code) else {
            return false;
        };

        let mut modifiers = key.modifiers;
        if got.is_ascii_uppercase() {
            modifiers |= KeyModifiers::SHIFT;
        }

        expected.eq_ignore_ascii_case(&got) && modifiers == self.shortcut.modifiers
    }
}

/// The fixed set of [`Action`]s of a [`Window`]
///
/// [`Window`]: crate::window::Window
#[derive(Clone, Debug)]
pub struct Actions(Vec<Action>);

impl Actions {
    /// Returns the [`Actions`], with their default shortcuts
    ///
    /// Cut, Copy and Undo start out disabled, since there is no
    /// selection nor history yet.
    ///
    /// Terminals without keyboard enhancements send the same byte
    /// for `Ctrl+Shift+S` and `Ctrl+S`, so there Save As is only
    /// reachable through its [`Menu`].
    pub fn new() -> Self {
        use ActionId::*;
        let ctrl = KeyModifiers::CONTROL;
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;

        let mut actions = Self(vec![
            Action::new(New, "&New", 'n', ctrl),
            Action::new(Open, "&Open...", 'o', ctrl),
            Action::new(Save, "&Save", 's', ctrl),
            Action::new(SaveAs, "Save &As...", 's', ctrl_shift),
            Action::new(Close, "&Close", 'q', ctrl),
            Action::new(Cut, "Cu&t", 'x', ctrl),
            Action::new(Copy, "&Copy", 'c', ctrl),
            Action::new(Paste, "&Paste", 'v', ctrl),
            Action::new(Undo, "&Undo", 'z', ctrl),
        ]);

        for id in [Cut, Copy, Undo] {
            actions.set_enabled(id, false);
        }

        actions
    }

    /// The [`Action`] with the given [`ActionId`]
    pub fn get(&self, id: ActionId) -> &Action {
        self.0
            .iter()
            .find(|action| action.id == id)
            .unwrap_or_else(|| unreachable!("Every ActionId has an Action"))
    }

    /// Whether the [`Action`] is enabled
    pub fn is_enabled(&self, id: ActionId) -> bool {
        self.get(id).enabled
    }

    /// Enables or disables an [`Action`]
    pub fn set_enabled(&mut self, id: ActionId, enabled: bool) {
        if let Some(action) = self.0.iter_mut().find(|action| action.id == id) {
            action.enabled = enabled;
        }
    }

    /// The [`ActionId`] whose shortcut is the given key event
    pub fn find_by_shortcut(&self, key: &KeyEvent) -> Option<ActionId> {
        self.0
            .iter()
            .find(|action| action.matches(key))
            .map(Action::id)
    }

    /// An [`Iterator`] over all [`Action`]s
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.0.iter()
    }
}

impl Default for Actions {
    fn default() -> Self {
        Self::new()
    }
}

/// A menu in the menu bar, holding a list of [`ActionId`]s
#[derive(Clone, Debug)]
pub struct Menu {
    title: &'static str,
    actions: Vec<ActionId>,
}

impl Menu {
    /// Returns a new [`Menu`]
    ///
    /// The title marks its mnemonic with an `&`, like the labels of
    /// [`Action`]s.
    pub fn new(title: &'static str, actions: impl IntoIterator<Item = ActionId>) -> Self {
        Self { title, actions: actions.into_iter().collect() }
    }

    /// The title, without the `&`
    pub fn title(&self) -> String {
        self.title.replacen('&', "", 1)
    }

    /// The mnemonic of the title
    pub fn mnemonic(&self) -> Option<char> {
        let (_, after) = self.title.split_once('&')?;
        after.chars().next().map(|char| char.to_ascii_lowercase())
    }

    /// The [`ActionId`]s in this [`Menu`], in order
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }
}

/// The File and Edit menus
pub fn default_menus() -> Vec<Menu> {
    use ActionId::*;
    vec![
        Menu::new("&File", [New, Open, Save, SaveAs, Close]),
        Menu::new("&Edit", [Cut, Copy, Paste, Undo]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(char: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(char), KeyModifiers::CONTROL)
    }

    #[test]
    fn shortcuts_find_their_actions() {
        let actions = Actions::new();

        assert_eq!(actions.find_by_shortcut(&ctrl('n')), Some(ActionId::New));
        assert_eq!(actions.find_by_shortcut(&ctrl('s')), Some(ActionId::Save));
        assert_eq!(actions.find_by_shortcut(&ctrl('S')), Some(ActionId::SaveAs));
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;
        let save_as = KeyEvent::new(KeyCode::Char('s'), ctrl_shift);
        assert_eq!(actions.find_by_shortcut(&save_as), Some(ActionId::SaveAs));
        // Terminals with keyboard enhancements report the shifted char.
        let enhanced = KeyEvent::new(KeyCode::Char('S'), ctrl_shift);
        assert_eq!(actions.find_by_shortcut(&enhanced), Some(ActionId::SaveAs));

        let plain = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(actions.find_by_shortcut(&plain), None);
    }

    #[test]
    fn labels_mnemonics_and_shortcut_texts() {
        let actions = Actions::new();
        let save_as = actions.get(ActionId::SaveAs);

        assert_eq!(save_as.text(), "Save As...");
        assert_eq!(save_as.mnemonic(), Some('a'));
        assert_eq!(save_as.shortcut_text(), "Ctrl+Shift+S");
        assert_eq!(actions.get(ActionId::Cut).mnemonic(), Some('t'));
    }

    #[test]
    fn selection_dependent_actions_start_disabled() {
        let mut actions = Actions::new();

        assert!(!actions.is_enabled(ActionId::Cut));
        assert!(!actions.is_enabled(ActionId::Copy));
        assert!(!actions.is_enabled(ActionId::Undo));
        assert!(actions.is_enabled(ActionId::Paste));

        actions.set_enabled(ActionId::Copy, true);
        assert!(actions.is_enabled(ActionId::Copy));
    }

    #[test]
    fn every_menu_entry_is_an_action() {
        let actions = Actions::new();
        let menus = default_menus();

        assert_eq!(menus[0].title(), "File");
        assert_eq!(menus[1].mnemonic(), Some('e'));
        let count: usize = menus.iter().map(|menu| menu.actions().len()).sum();
        assert_eq!(count, actions.iter().count());
    }
}
