//! Log writer module
//!
//! Thread-safe log output to stdout/stderr or configured files.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Log writer with separate access and error targets
pub struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            access: open_target(access_log_file, LogTarget::Stdout)?,
            error: open_target(error_log_file, LogTarget::Stderr)?,
        })
    }

    /// Write to the access/info log
    pub fn write_access(&self, message: &str) {
        self.access.write_line(message);
    }

    /// Write to the error log
    pub fn write_error(&self, message: &str) {
        self.error.write_line(message);
    }
}

/// Open a log file target for appending, or fall back to a console stream
fn open_target(path: Option<&str>, fallback: LogTarget) -> io::Result<LogTarget> {
    match path {
        Some(p) => {
            if let Some(parent) = Path::new(p).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(p)?;
            Ok(LogTarget::File(Mutex::new(file)))
        }
        None => Ok(fallback),
    }
}

/// Initialize the global log writer.
///
/// Called once at application startup, before any request is served.
/// Returns an error if a configured log file cannot be opened.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file, error_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
