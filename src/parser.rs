//! Turning `launchctl list <label>` output into a normalized status record.
//!
//! The output is a semi-structured brace-delimited block whose field order
//! and field set are undocumented. Each field is matched independently and
//! treated as optional, so an unexpected shape degrades to absent optionals
//! instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static PID_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""PID"\s*=\s*(\d+|"-")"#).expect("valid PID pattern"));
static LAST_EXIT_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""LastExitStatus"\s*=\s*(\d+)"#).expect("valid LastExitStatus pattern")
});

/// Normalized state of one service at one point in time.
///
/// Invariants: `running` implies `loaded` implies `pid` is present;
/// a record with `error` set is neither running nor loaded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusRecord {
    pub running: bool,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_exit_status: Option<i64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusRecord {
    /// launchd does not know the label.
    pub fn not_loaded() -> Self {
        Self {
            running: false,
            loaded: false,
            pid: None,
            last_exit_status: None,
            status: "not loaded".to_string(),
            error: None,
        }
    }

    /// The probe command exceeded its time bound.
    pub fn timed_out() -> Self {
        Self {
            running: false,
            loaded: false,
            pid: None,
            last_exit_status: None,
            status: "timeout".to_string(),
            error: Some("Command timed out".to_string()),
        }
    }

    /// The probe command could not be started at all.
    pub fn launch_failed(message: String) -> Self {
        Self {
            running: false,
            loaded: false,
            pid: None,
            last_exit_status: None,
            status: "error".to_string(),
            error: Some(message),
        }
    }
}

/// Parse one `launchctl list <label>` invocation into a record.
///
/// Pure and infallible: a nonzero exit code means the label is not
/// registered with launchd, and any output text, however malformed,
/// produces a record with the fields that could be extracted.
pub fn parse(exit_code: i32, stdout: &str) -> StatusRecord {
    if exit_code != 0 {
        return StatusRecord::not_loaded();
    }

    let pid = PID_FIELD.captures(stdout).and_then(|captures| {
        let value = &captures[1];
        // `"PID" = "-"` means loaded but not currently executing.
        if value == "\"-\"" {
            None
        } else {
            value.parse::<i64>().ok()
        }
    });

    let last_exit_status = LAST_EXIT_FIELD
        .captures(stdout)
        .and_then(|captures| captures[1].parse::<i64>().ok());

    let running = pid.is_some();
    StatusRecord {
        running,
        loaded: true,
        pid,
        last_exit_status,
        status: if running {
            "running".to_string()
        } else {
            "loaded but not running".to_string()
        },
        error: None,
    }
}
