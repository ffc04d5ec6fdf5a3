//! Probing launchd for the state of a single service.
//!
//! The prober shells out to `launchctl list <label>` and reports what
//! happened without interpreting the output; exit-code and text semantics
//! belong to the parser. Everything that can go wrong with the subprocess
//! itself is returned as a [`ProbeOutcome`] variant so callers never have
//! to handle a fault from one misbehaving probe.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

/// Upper bound on a single `launchctl list` invocation.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Raw result of one probe.
///
/// A nonzero exit code is not a failure here: `launchctl list` exits
/// nonzero when the label is unknown to launchd, and the parser turns
/// that into a "not loaded" record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Completed { exit_code: i32, stdout: String },
    TimedOut,
    LaunchFailed(String),
}

#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, label: &str) -> ProbeOutcome;
}

/// Production prober backed by the `launchctl` binary.
#[derive(Debug, Clone)]
pub struct LaunchctlProber {
    program: String,
    timeout: Duration,
}

impl LaunchctlProber {
    pub fn new() -> Self {
        Self {
            program: "launchctl".to_string(),
            timeout: PROBE_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for LaunchctlProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for LaunchctlProber {
    async fn probe(&self, label: &str) -> ProbeOutcome {
        let mut command = Command::new(&self.program);
        command.arg("list").arg(label).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Err(_) => ProbeOutcome::TimedOut,
            Ok(Err(err)) => ProbeOutcome::LaunchFailed(err.to_string()),
            Ok(Ok(output)) => ProbeOutcome::Completed {
                // Termination by signal carries no code; treat it like a
                // generic nonzero exit.
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            },
        }
    }
}
