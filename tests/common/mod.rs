//! Fakes for the collaborators of a run
#![allow(dead_code)]

use std::cell::RefCell;

use autolayout::{BackendError, DisplayBackend, LidProbe, Notifier};

/// Builds `xrandr --query` style output.
///
/// `outputs` are `(name, connected, modes)` in query order.
pub fn xrandr_text(outputs: &[(&str, bool, &[&str])]) -> String {
    let mut text =
        String::from("Screen 0: minimum 8 x 8, current 1920 x 1080, maximum 32767 x 32767\n");
    for (name, connected, modes) in outputs {
        let state = if *connected { "connected" } else { "disconnected" };
        text.push_str(&format!(
            "{} {} (normal left inverted right x axis y axis)\n",
            name, state
        ));
        for (i, mode) in modes.iter().enumerate() {
            let rate = if i == 0 { "60.00*+" } else { "59.94  " };
            text.push_str(&format!("   {:<13} {}\n", mode, rate));
        }
    }
    text
}

pub struct FakeBackend {
    query: Option<String>,
    fail_apply: bool,
    pub applied: RefCell<Vec<Vec<String>>>,
}

impl FakeBackend {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            fail_apply: false,
            applied: RefCell::new(Vec::new()),
        }
    }

    /// A backend whose query command cannot be run
    pub fn unavailable() -> Self {
        Self {
            query: None,
            fail_apply: false,
            applied: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }
}

impl DisplayBackend for FakeBackend {
    fn query(&self) -> Result<String, BackendError> {
        self.query.clone().ok_or_else(|| BackendError::Spawn {
            program: "xrandr".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
        })
    }

    fn apply(&self, args: &[String]) -> Result<(), BackendError> {
        self.applied.borrow_mut().push(args.to_vec());
        if self.fail_apply {
            return Err(BackendError::Failed {
                program: "xrandr".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "xrandr: Configure crtc 0 failed".to_string(),
            });
        }
        Ok(())
    }

    fn program(&self) -> &str {
        "xrandr"
    }
}

/// Lid probe returning fixed file contents
pub struct FixedLid(pub Option<&'static str>);

impl FixedLid {
    pub fn open() -> Self {
        Self(Some("state:      open\n"))
    }

    pub fn closed() -> Self {
        Self(Some("state:      closed\n"))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl LidProbe for FixedLid {
    fn read_state(&self) -> Option<String> {
        self.0.map(str::to_string)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, message: &str) {
        self.sent
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
