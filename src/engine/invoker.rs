//! External tool invocation: spawn, wait, report. Never retries.

use log::debug;
use std::process::{Command, Stdio};
use std::sync::Arc;

/// Exit result of one external tool run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    /// Ran but exited non-zero. `code` is None when killed by a signal.
    Failed { code: Option<i32> },
    /// Could not be started at all (not found, not executable, ...).
    SpawnFailed(String),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Success)
    }

    /// Human-readable reason for a failed outcome; empty for success.
    pub fn describe(&self, program: &str) -> String {
        match self {
            ToolOutcome::Success => String::new(),
            ToolOutcome::Failed { code: Some(c) } => format!("{program} exited with status {c}"),
            ToolOutcome::Failed { code: None } => format!("{program} was terminated by a signal"),
            ToolOutcome::SpawnFailed(e) => format!("could not start {program}: {e}"),
        }
    }
}

/// Runs an executable with an explicit argument vector and blocks until it exits.
pub trait ToolInvoker: Send + Sync {
    fn invoke(&self, program: &str, args: &[String]) -> ToolOutcome;
}

/// [`ToolInvoker`] backed by real child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessInvoker;

impl ToolInvoker for ProcessInvoker {
    fn invoke(&self, program: &str, args: &[String]) -> ToolOutcome {
        debug!("exec: {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => ToolOutcome::Success,
            Ok(s) => ToolOutcome::Failed { code: s.code() },
            Err(e) => ToolOutcome::SpawnFailed(e.to_string()),
        }
    }
}

/// The resizer and rotator, with their argument conventions.
#[derive(Clone)]
pub struct ImageTools {
    pub resize_program: String,
    pub rotate_program: String,
    pub invoker: Arc<dyn ToolInvoker>,
}

/// A failed tool run: which program and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolFailure {
    pub program: String,
    pub outcome: ToolOutcome,
}

impl ToolFailure {
    pub fn reason(&self) -> String {
        self.outcome.describe(&self.program)
    }
}

impl ImageTools {
    pub fn new(
        resize_program: impl Into<String>,
        rotate_program: impl Into<String>,
        invoker: Arc<dyn ToolInvoker>,
    ) -> Self {
        Self {
            resize_program: resize_program.into(),
            rotate_program: rotate_program.into(),
            invoker,
        }
    }

    /// Resizer argv: `-resize <pct>% <src> <dst>`.
    pub fn resize_args(percent: u32, src: &str, dst: &str) -> Vec<String> {
        vec![
            "-resize".to_string(),
            format!("{percent}%"),
            src.to_string(),
            dst.to_string(),
        ]
    }

    /// Rotator argv: `-rotate <deg> <src> <dst>`. `src == dst` rotates in place.
    pub fn rotate_args(degrees: i32, src: &str, dst: &str) -> Vec<String> {
        vec![
            "-rotate".to_string(),
            degrees.to_string(),
            src.to_string(),
            dst.to_string(),
        ]
    }

    pub fn resize(&self, percent: u32, src: &str, dst: &str) -> Result<(), ToolFailure> {
        self.run(&self.resize_program, Self::resize_args(percent, src, dst))
    }

    pub fn rotate(&self, degrees: i32, src: &str, dst: &str) -> Result<(), ToolFailure> {
        self.run(&self.rotate_program, Self::rotate_args(degrees, src, dst))
    }

    fn run(&self, program: &str, args: Vec<String>) -> Result<(), ToolFailure> {
        match self.invoker.invoke(program, &args) {
            ToolOutcome::Success => Ok(()),
            outcome => Err(ToolFailure {
                program: program.to_string(),
                outcome,
            }),
        }
    }
}
