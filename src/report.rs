use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Written to the log file at the start of every run
pub const RUN_SEPARATOR: &str = "========================================";

/// Title used for desktop notifications
pub const NOTIFICATION_TITLE: &str = "Display layout";

/// Delivers the one notification a run emits
pub trait Notifier {
    /// Best effort; failures are swallowed
    fn notify(&self, title: &str, message: &str);
}

/// Sends notifications through `notify-send`
#[derive(Debug, Clone, Default)]
pub struct NotifySend;

impl Notifier for NotifySend {
    fn notify(&self, title: &str, message: &str) {
        let result = Command::new("notify-send")
            .args(["--app-name", "autolayout", title, message])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if let Err(e) = result {
            log::debug!("Notification not delivered: {}", e);
        }
    }
}

/// Drops every notification
#[derive(Debug, Clone, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _title: &str, _message: &str) {}
}

/// Log target that copies every record to stderr and appends it to a file
#[derive(Debug)]
pub struct LogFile {
    file: Option<File>,
}

impl LogFile {
    /// Opens `path` for appending, creating parent directories, and writes the run separator
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file)?;
        writeln!(file, "{}", RUN_SEPARATOR)?;
        writeln!(file, "autolayout run, pid {}", std::process::id())?;
        writeln!(file, "{}", RUN_SEPARATOR)?;
        Ok(Self { file: Some(file) })
    }

    /// A target that only writes to stderr
    pub fn stderr_only() -> Self {
        Self { file: None }
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}
