//! Jot, a small plain-text editor window
//!
//! This crate holds the runner: it parses the command line, sets up
//! the [`Logs`], builds a [`Window`] over the terminal [`Ui`] and, once
//! the [`Window`] is closed, writes every logged [`Record`] to the log
//! file.
//!
//! [`Logs`]: jot_core::context::Logs
//! [`Window`]: jot_core::window::Window
//! [`Ui`]: jot_term::Ui
//! [`Record`]: jot_core::context::Record
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
pub use jot_core::prelude::*;
use jot_core::context::{self, Level, Logs, Record};

/// A small plain-text editor window
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "jot", version, about)]
pub struct Args {
    /// The file to open at startup
    pub file: Option<PathBuf>,
    /// How many columns a tab takes
    #[arg(long, value_name = "N")]
    pub tabstop: Option<u8>,
    /// How many lines and columns to keep around the caret
    #[arg(long, value_name = "N")]
    pub scrolloff: Option<u8>,
    /// Use a clipboard local to Jot instead of the system's
    #[arg(long)]
    pub no_system_clipboard: bool,
    /// Where to write the logs on exit
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The [`Opts`] given by these [`Args`]
    pub fn opts(&self) -> Opts {
        let mut opts = Opts::new();
        if let Some(tabstop) = self.tabstop {
            opts = opts.with_tabstop(tabstop);
        }
        if let Some(scrolloff) = self.scrolloff {
            opts = opts.with_scrolloff(scrolloff, scrolloff);
        }
        if self.no_system_clipboard {
            opts = opts.without_system_clipboard();
        }
        opts
    }

    /// The file where logs should be written
    ///
    /// Returns [`None`] if no file was given and there is no cache
    /// directory on this system.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(default_log_path)
    }
}

/// The default log file, `jot/jot.log` in the cache directory
pub fn default_log_path() -> Option<PathBuf> {
    dirs_next::cache_dir().map(|dir| dir.join("jot").join("jot.log"))
}

/// Writes [`Record`]s to a file, one per line, creating its parent
/// directory if needed
pub fn write_logs(path: &Path, records: &[Record]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    for rec in records {
        writeln!(writer, "{rec}")?;
    }
    writer.flush()
}

/// Sets up the global [`Logs`], returning a handle to them
///
/// If a logger was already set, the [`Logs`] will still collect
/// [`Record`]s pushed directly to them, but not those from the `log`
/// macros.
pub fn setup_logs(max_level: Level) -> Logs {
    let logs = Logs::new(max_level);
    if log::set_logger(Box::leak(Box::new(logs.clone()))).is_ok() {
        log::set_max_level(max_level.to_level_filter());
    }
    context::set_logs(logs.clone());
    logs
}

/// Runs Jot in the terminal until its [`Window`] is closed
///
/// [`Window`]: jot_core::window::Window
#[cfg(feature = "term-ui")]
pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let logs = setup_logs(Level::Info);
    let opts = args.opts();

    let mut window = Window::new(jot_term::Ui::new(opts), opts);
    let result = window.run_with(args.file.as_deref());

    if let Some(path) = args.log_path() {
        if let Err(err) = write_logs(&path, &logs.records()) {
            eprintln!("Failed to write logs to {}: {err}", path.display());
        }
    }

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_argument() {
        let args = Args::try_parse_from([
            "jot",
            "notes.txt",
            "--tabstop",
            "8",
            "--scrolloff",
            "2",
            "--no-system-clipboard",
            "--log-file",
            "/tmp/jot.log",
        ])
        .unwrap();

        assert_eq!(args.file.as_deref(), Some(Path::new("notes.txt")));
        assert_eq!(args.log_path().as_deref(), Some(Path::new("/tmp/jot.log")));

        let opts = args.opts();
        assert_eq!(opts.tabstop, 8);
        assert_eq!((opts.scrolloff.x, opts.scrolloff.y), (2, 2));
        assert!(!opts.system_clipboard);
    }

    #[test]
    fn no_arguments_give_the_default_opts() {
        let args = Args::try_parse_from(["jot"]).unwrap();

        assert_eq!(args.file, None);
        assert_eq!(args.opts(), Opts::default());
    }

    #[test]
    fn bad_arguments_are_refused() {
        assert!(Args::try_parse_from(["jot", "--tabstop", "many"]).is_err());
        assert!(Args::try_parse_from(["jot", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn log_macros_reach_the_global_logs() {
        let logs = setup_logs(Level::Info);

        log::info!(target: "jot::tests", "collected");
        log::debug!(target: "jot::tests", "too verbose");

        let records: Vec<Record> = logs
            .records()
            .into_iter()
            .filter(|rec| rec.target() == "jot::tests")
            .collect();
        assert_eq!(records, [Record::new(Level::Info, "jot::tests", "collected")]);
        assert!(context::logs().records().contains(&records[0]));
    }

    #[test]
    fn logs_are_written_one_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jot.log");
        let records = [
            Record::new(Level::Info, "jot_core::window", "Opened notes.txt"),
            Record::new(Level::Warn, "jot_core::window", "Cannot read file"),
        ];

        write_logs(&path, &records).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[INFO] jot_core::window: Opened notes.txt\n\
             [WARN] jot_core::window: Cannot read file\n"
        );
    }
}
