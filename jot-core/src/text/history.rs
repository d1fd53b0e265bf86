//! The undo history of a [`Text`]
//!
//! The [`History`] is a list of [`Change`]s with a cursor into it.
//! Consecutive typing is merged into the last [`Change`], until the
//! [`History`] is sealed, which happens when a new line is typed,
//! when the caret jumps, when undoing, or when the [`Text`] is
//! marked as clean.
//!
//! [`Text`]: super::Text

/// A change in a file, with a start, taken text, and added text
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Change {
    start: usize,
    taken: String,
    added: String,
}

impl Change {
    /// Returns a new [`Change`]
    pub fn new(start: usize, taken: impl ToString, added: impl ToString) -> Self {
        Self {
            start,
            taken: taken.to_string(),
            added: added.to_string(),
        }
    }

    /// Returns a reversed version of this [`Change`]
    pub fn reverse(&self) -> Self {
        Self {
            start: self.start,
            taken: self.added.clone(),
            added: self.taken.clone(),
        }
    }

    /// The byte where this [`Change`] starts
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end of the taken text, before the [`Change`]
    pub fn taken_end(&self) -> usize {
        self.start + self.taken.len()
    }

    /// The end of the added text, after the [`Change`]
    pub fn added_end(&self) -> usize {
        self.start + self.added.len()
    }

    /// The text that was taken
    pub fn taken(&self) -> &str {
        &self.taken
    }

    /// The text that was added
    pub fn added(&self) -> &str {
        &self.added
    }

    /// Tries to merge another [`Change`] that happened right after
    /// this one into it
    ///
    /// Only continuous typing, continuous backspacing and
    /// continuous deleting are merged.
    fn try_merge(&mut self, other: &Change) -> bool {
        let is_insertion = |c: &Change| c.taken.is_empty() && !c.added.is_empty();
        let is_deletion = |c: &Change| c.added.is_empty() && !c.taken.is_empty();

        if is_insertion(self) && is_insertion(other) && other.start == self.added_end() {
            self.added.push_str(&other.added);
            true
        } else if is_deletion(self) && is_deletion(other) && other.taken_end() == self.start {
            self.start = other.start;
            self.taken.insert_str(0, &other.taken);
            true
        } else if is_deletion(self) && is_deletion(other) && other.start == self.start {
            self.taken.push_str(&other.taken);
            true
        } else {
            false
        }
    }
}

/// The history of edits
#[derive(Debug, Clone)]
pub struct History {
    /// The list of changes in this file's editing history
    changes: Vec<Change>,
    /// How many changes are currently applied
    current: usize,
    /// The value of `current` when the file was last saved or loaded
    clean: Option<usize>,
    /// Whether the last change can still be merged into
    sealed: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Returns a new, clean, [`History`]
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
            current: 0,
            clean: Some(0),
            sealed: true,
        }
    }

    /// Adds a [`Change`], merging it into the last one if the
    /// [`History`] isn't sealed and they are continuous
    ///
    /// Any undone [`Change`]s are dropped.
    pub fn add_change(&mut self, change: Change) {
        if self.current < self.changes.len() {
            self.changes.truncate(self.current);
            self.sealed = true;
        }
        // The clean state was undone and then overwritten.
        if self.clean.is_some_and(|clean| clean > self.current) {
            self.clean = None;
        }

        let ends_line = change.added.ends_with('\n');

        let merged = !self.sealed
            && self
                .changes
                .last_mut()
                .is_some_and(|last| last.try_merge(&change));

        if !merged {
            self.changes.push(change);
            self.current += 1;
        }

        self.sealed = ends_line;
    }

    /// Declares that the last [`Change`] is complete
    ///
    /// The next [`Change`] won't be merged into it.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Moves backwards in the [`History`], returning the undone
    /// [`Change`]
    ///
    /// If the [`History`] is already at the start, returns [`None`].
    pub fn undo(&mut self) -> Option<&Change> {
        self.sealed = true;
        self.current = self.current.checked_sub(1)?;
        self.changes.get(self.current)
    }

    /// Whether there is anything to undo
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Marks the current position as the clean state
    pub fn set_clean(&mut self) {
        self.clean = Some(self.current);
        self.sealed = true;
    }

    /// Marks the [`History`] as modified, with no clean state
    pub fn set_dirty(&mut self) {
        self.clean = None;
    }

    /// Whether the current position differs from the clean state
    pub fn is_modified(&self) -> bool {
        self.clean != Some(self.current)
    }

    /// Removes every [`Change`] and marks the [`History`] as clean
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(at: usize, s: &str) -> Change {
        Change::new(at, "", s)
    }

    #[test]
    fn typing_merges_into_one_change() {
        let mut history = History::new();
        history.add_change(insert(0, "h"));
        history.add_change(insert(1, "e"));
        history.add_change(insert(2, "y"));

        assert!(history.is_modified());
        assert_eq!(history.undo(), Some(&insert(0, "hey")));
        assert!(!history.can_undo());
        assert!(!history.is_modified());
    }

    #[test]
    fn newlines_seals_and_other_edits_split_changes() {
        let mut history = History::new();
        history.add_change(insert(0, "a"));
        history.add_change(insert(1, "\n"));
        history.add_change(insert(2, "b"));
        history.seal();
        history.add_change(insert(3, "c"));
        history.add_change(Change::new(3, "c", ""));

        assert_eq!(history.undo(), Some(&Change::new(3, "c", "")));
        assert_eq!(history.undo(), Some(&insert(3, "c")));
        assert_eq!(history.undo(), Some(&insert(2, "b")));
        assert_eq!(history.undo(), Some(&insert(0, "a\n")));
        assert!(history.undo().is_none());
    }

    #[test]
    fn backspacing_merges_backwards() {
        let mut history = History::new();
        history.add_change(Change::new(4, "d", ""));
        history.add_change(Change::new(3, "c", ""));
        history.add_change(Change::new(2, "b", ""));

        assert_eq!(history.undo(), Some(&Change::new(2, "bcd", "")));
    }

    #[test]
    fn clean_state_follows_undo() {
        let mut history = History::new();
        history.add_change(insert(0, "a"));
        history.set_clean();
        assert!(!history.is_modified());

        history.add_change(insert(1, "b"));
        assert!(history.is_modified());

        history.undo();
        assert!(!history.is_modified());

        history.undo();
        assert!(history.is_modified());
    }

    #[test]
    fn overwriting_undone_clean_state_loses_it() {
        let mut history = History::new();
        history.add_change(insert(0, "a"));
        history.set_clean();
        history.undo();
        history.add_change(insert(0, "b"));

        assert!(history.is_modified());
        history.undo();
        assert!(history.is_modified());
    }
}
