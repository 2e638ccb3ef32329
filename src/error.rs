//! Error taxonomy for the controller.
//!
//! Every failure is raised synchronously by the call that detects it; nothing
//! is retried internally.
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum HashcatError {
    #[error("{} is not an executable file", .0.display())]
    NotExecutable(PathBuf),

    #[error("{} is not a readable file", .0.display())]
    UnreadableFile(PathBuf),

    #[error("no {kind} has code {code}")]
    InvalidModeCode { kind: &'static str, code: i64 },

    #[error("{kind} must be a catalog entry or an integer code, got {value:?}")]
    InvalidModeType { kind: &'static str, value: String },

    #[error("'{field}' is required for the {strategy} attack")]
    MissingPayload {
        field: &'static str,
        strategy: &'static str,
    },

    #[error("don't pass {flag} as an extra argument, use {setter}")]
    ReservedFlag { flag: String, setter: &'static str },

    #[error("incomplete configuration: {0}")]
    IncompleteConfiguration(&'static str),

    #[error("attack mode {0} is not implemented yet")]
    NotImplemented(&'static str),

    #[error("no hashcat process was started")]
    NoProcessStarted,

    #[error("hashcat process {0} is still running")]
    AlreadyRunning(u32),

    #[error("failed to launch {}: {source}", .program.display())]
    LaunchFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("process {pid} still running after {timeout:?}")]
    WaitTimeout { pid: u32, timeout: Duration },

    #[error("hashcat exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("malformed report output: {0}")]
    MalformedReport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HashcatError>;
