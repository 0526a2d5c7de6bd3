// In-app logger: keeps a bounded buffer for the Logs window, optionally mirrors
// to stderr, appends warn+ lines to a log file and installs a panic hook.

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::backtrace::Backtrace;
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub msg: String,
}

impl LogEntry {
    pub fn line(&self) -> String {
        format!("[{:>5}] {}: {}", self.level, self.target, self.msg)
    }
}

const MAX_LOG_LINES: usize = 5000;

/// Ring buffer of the most recent entries.
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl LogBuffer {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in `start..end`, clamped to what is stored.
    pub fn range(&self, start: usize, end: usize) -> impl Iterator<Item = &LogEntry> {
        let s = start.min(self.entries.len());
        let e = end.min(self.entries.len()).max(s);
        self.entries.range(s..e)
    }
}

lazy_static! {
    static ref LOGS: Mutex<LogBuffer> = Mutex::new(LogBuffer::with_capacity(MAX_LOG_LINES));
    static ref MIRROR_STDERR: bool = {
        let v = std::env::var("GUI_LOG_STDERR").unwrap_or_else(|_| "0".to_string());
        matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    };
    static ref LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);
}

static NEW_LOGS: AtomicBool = AtomicBool::new(false);

struct GuiLogger;

impl Log for GuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "[{}] [{:>5}] {}: {}",
            timestamp_millis(),
            record.level(),
            record.target(),
            record.args()
        );

        if *MIRROR_STDERR {
            eprintln!("{}", line);
        }

        if matches!(record.level(), Level::Warn | Level::Error) {
            write_file_line(&line);
        }

        if let Ok(mut buf) = LOGS.lock() {
            buf.push(LogEntry {
                level: record.level(),
                target: record.target().to_string(),
                msg: record.args().to_string(),
            });
        }
        NEW_LOGS.store(true, Ordering::Relaxed);
    }

    fn flush(&self) {
        if let Ok(mut lf) = LOG_FILE.lock() {
            if let Some(f) = lf.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

/// Most verbose level named by a RUST_LOG value such as "info,hyper=warn".
/// Each directive's last `=` token must be a level name exactly.
fn parse_level(val: &str) -> Option<LevelFilter> {
    val.split(',')
        .filter_map(|directive| directive.rsplit('=').next())
        .filter_map(|token| match token.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LevelFilter::Trace),
            "debug" => Some(LevelFilter::Debug),
            "info" => Some(LevelFilter::Info),
            "warn" => Some(LevelFilter::Warn),
            "error" => Some(LevelFilter::Error),
            "off" => Some(LevelFilter::Off),
            _ => None,
        })
        .max()
}

/// Install the logger and the panic hook. The log file is opened later by
/// `open_log_file`, once settings are loaded.
/// Level comes from RUST_LOG, everything is captured by default.
pub fn init() {
    if log::set_boxed_logger(Box::new(GuiLogger)).is_err() {
        return;
    }

    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Trace);
    log::set_max_level(level);

    install_panic_hook();

    log::info!("GUI logger initialized at level {}", level);
}

/// Append warn+ lines to `path` from now on. Replaces any previously opened file.
pub fn open_log_file(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    if let Ok(mut lf) = LOG_FILE.lock() {
        *lf = Some(file);
    }
    log::info!("Persisting warn+ log lines to {}", path.to_string_lossy());
    Ok(())
}

pub fn for_each_range<F: FnMut(&LogEntry)>(start: usize, end: usize, mut f: F) {
    if let Ok(buf) = LOGS.lock() {
        buf.range(start, end).for_each(|e| f(e));
    }
}

pub fn get_all() -> Vec<String> {
    let mut out = Vec::new();
    for_each_range(0, usize::MAX, |e| out.push(e.line()));
    out
}

pub fn len() -> usize {
    LOGS.lock().map(|buf| buf.len()).unwrap_or(0)
}

pub fn clear() {
    if let Ok(mut buf) = LOGS.lock() {
        buf.clear();
    }
    NEW_LOGS.store(true, Ordering::Relaxed);
}

/// Returns true if new logs arrived since the last call.
pub fn take_new_flag() -> bool {
    NEW_LOGS.swap(false, Ordering::Relaxed)
}

fn timestamp_millis() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

fn write_file_line(line: &str) {
    if let Ok(mut lf) = LOG_FILE.lock() {
        if let Some(f) = lf.as_mut() {
            let _ = writeln!(f, "{}", line);
            let _ = f.flush();
        }
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Box<Any>"
        };

        let loc = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let bt = Backtrace::force_capture();
        write_file_line(&format!("[{}] [ERROR] panic at {loc}: {msg}", timestamp_millis()));
        for line in format!("{bt:?}").lines() {
            write_file_line(line);
        }

        log::error!("panic at {loc}: {msg}\n{bt:?}");
    }));
}
