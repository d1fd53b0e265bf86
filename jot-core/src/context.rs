//! Access to the [`Logs`] of Jot
//!
//! The [`Logs`] implement [`log::Log`], so anything logged through the
//! [`log`] crate, by Jot or by its dependencies, ends up in them. The
//! [`Ui`] can show the last [`Record`], and the binary writes all of
//! them to a file when exiting.
//!
//! [`Ui`]: crate::ui::Ui
use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

pub use log::Level;
use parking_lot::Mutex;

static LOGS: OnceLock<Logs> = OnceLock::new();

/// The global [`Logs`]
///
/// If [`set_logs`] wasn't called, a new [`Logs`] is created the
/// first time that this function is called.
pub fn logs() -> Logs {
    LOGS.get_or_init(|| Logs::new(Level::Info)).clone()
}

/// Sets the global [`Logs`], returning `false` if they were already
/// set
pub fn set_logs(logs: Logs) -> bool {
    LOGS.set(logs).is_ok()
}

/// A logged message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    level: Level,
    target: String,
    msg: String,
}

impl Record {
    /// Returns a new [`Record`]
    pub fn new(level: Level, target: impl ToString, msg: impl ToString) -> Self {
        Self {
            level,
            target: target.to_string(),
            msg: msg.to_string(),
        }
    }

    /// The [`Level`] of this [`Record`]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Where this [`Record`] came from, usually a module path
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The message
    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.target, self.msg)
    }
}

/// The list of [`Record`]s logged in Jot
///
/// Cloning this struct gives another handle to the same list, with
/// its own reading state for [`Logs::has_changed`].
#[derive(Debug)]
pub struct Logs {
    list: Arc<Mutex<Vec<Record>>>,
    cur_state: Arc<AtomicUsize>,
    read_state: AtomicUsize,
    max_level: Level,
}

impl Clone for Logs {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            cur_state: self.cur_state.clone(),
            read_state: AtomicUsize::new(self.read_state.load(Ordering::Relaxed)),
            max_level: self.max_level,
        }
    }
}

impl Logs {
    /// Creates new [`Logs`], which keep [`Record`]s up to `max_level`
    pub fn new(max_level: Level) -> Self {
        Self {
            list: Arc::default(),
            cur_state: Arc::new(AtomicUsize::new(0)),
            read_state: AtomicUsize::new(0),
            max_level,
        }
    }

    /// Pushes a new [`Record`]
    pub fn push(&self, rec: Record) {
        self.cur_state.fetch_add(1, Ordering::Relaxed);
        self.list.lock().push(rec)
    }

    /// The last [`Record`], if there is one
    pub fn last(&self) -> Option<Record> {
        self.read_state
            .store(self.cur_state.load(Ordering::Relaxed), Ordering::Relaxed);
        self.list.lock().last().cloned()
    }

    /// All [`Record`]s, in the order they were pushed
    pub fn records(&self) -> Vec<Record> {
        self.read_state
            .store(self.cur_state.load(Ordering::Relaxed), Ordering::Relaxed);
        self.list.lock().clone()
    }

    /// Whether there are new [`Record`]s since the last read
    pub fn has_changed(&self) -> bool {
        self.cur_state.load(Ordering::Relaxed) > self.read_state.load(Ordering::Relaxed)
    }

    /// The most verbose [`Level`] that is kept
    pub fn max_level(&self) -> Level {
        self.max_level
    }
}

impl log::Log for Logs {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, rec: &log::Record) {
        if self.enabled(rec.metadata()) {
            self.push(Record::new(rec.level(), rec.target(), rec.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;

    #[test]
    fn clones_share_records_but_not_reading_state() {
        let logs = Logs::new(Level::Info);
        let other = logs.clone();

        logs.push(Record::new(Level::Warn, "jot", "first"));
        assert!(other.has_changed());
        assert_eq!(other.last().map(|rec| rec.msg().to_string()).as_deref(), Some("first"));
        assert!(!other.has_changed());
        assert!(logs.has_changed());
    }

    #[test]
    fn levels_past_the_maximum_are_dropped() {
        let logs = Logs::new(Level::Info);

        logs.log(
            &log::Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        logs.log(
            &log::Record::builder()
                .level(Level::Error)
                .target("jot_core::window")
                .args(format_args!("shown {}", 1))
                .build(),
        );

        let records = logs.records();
        assert_eq!(records, [Record::new(Level::Error, "jot_core::window", "shown 1")]);
        assert_eq!(records[0].to_string(), "[ERROR] jot_core::window: shown 1");
    }
}
