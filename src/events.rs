//! Events the controller reports on state transitions and failures, and the
//! observer interface that receives them.
//!
//! [`LogObserver`] forwards every event to the `log` facade and is installed by
//! default; callers can attach more sinks with
//! [`crate::controller::HashcatController::add_observer`].
use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use log::Level;

use crate::error::HashcatError;
use crate::modes::{AttackStrategy, HashAlgorithm};
use crate::render::ReportMode;

#[derive(Debug)]
pub enum Event<'a> {
    ExecutableSet { binary: &'a Path, version: &'a str },
    TargetListSet { path: &'a Path, entries: Option<usize> },
    HashAlgorithmSet(HashAlgorithm),
    AttackStrategySet(AttackStrategy),
    ArgumentAdded { flag: &'a str, value: Option<&'a str> },
    CommandRendered(&'a [OsString]),
    ProcessStarted { pid: u32 },
    ProcessFinished { pid: u32, code: Option<i32> },
    ReportQueried { mode: ReportMode, entries: usize },
    BenchmarkRecorded { hash: HashAlgorithm, hashes_per_second: u64 },
    Failed(&'a HashcatError),
}

impl Event<'_> {
    pub fn level(&self) -> Level {
        match self {
            Event::Failed(_) => Level::Error,
            Event::ProcessStarted { .. } | Event::ProcessFinished { .. } => Level::Info,
            _ => Level::Debug,
        }
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ExecutableSet { binary, version } => {
                write!(f, "using hashcat {} at {}", version, binary.display())
            }
            Event::TargetListSet { path, entries } => match entries {
                Some(n) => write!(f, "target list set to {} ({} entries)", path.display(), n),
                None => write!(f, "target list set to {}", path.display()),
            },
            Event::HashAlgorithmSet(hash) => write!(f, "hash type set to {hash}"),
            Event::AttackStrategySet(attack) => write!(f, "attack mode set to {attack}"),
            Event::ArgumentAdded { flag, value } => match value {
                Some(v) => write!(f, "argument added: {flag}={v}"),
                None => write!(f, "argument added: {flag}"),
            },
            Event::CommandRendered(argv) => write!(f, "command generated: {:?}", argv),
            Event::ProcessStarted { pid } => write!(f, "hashcat started, pid = {pid}"),
            Event::ProcessFinished { pid, code } => match code {
                Some(c) => write!(f, "hashcat pid {pid} exited with code {c}"),
                None => write!(f, "hashcat pid {pid} terminated by signal"),
            },
            Event::ReportQueried { mode, entries } => {
                write!(f, "{} returned {} entries", mode.flag(), entries)
            }
            Event::BenchmarkRecorded {
                hash,
                hashes_per_second,
            } => write!(f, "benchmark for {hash}: {hashes_per_second} H/s"),
            Event::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Receives controller events. Implementations must not fail.
pub trait Observer {
    fn notify(&self, event: &Event<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, event: &Event<'_>) {
        log::log!(event.level(), "{}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_event_kind() {
        let err = HashcatError::NoProcessStarted;
        assert_eq!(Event::Failed(&err).level(), Level::Error);
        assert_eq!(Event::ProcessStarted { pid: 1 }.level(), Level::Info);
        assert_eq!(Event::HashAlgorithmSet(HashAlgorithm::Md5).level(), Level::Debug);
    }

    #[test]
    fn messages_are_readable() {
        let e = Event::BenchmarkRecorded {
            hash: HashAlgorithm::Sha1,
            hashes_per_second: 42,
        };
        assert_eq!(e.to_string(), "benchmark for sha1: 42 H/s");
        let e = Event::ArgumentAdded {
            flag: "--session",
            value: Some("x"),
        };
        assert_eq!(e.to_string(), "argument added: --session=x");
        let e = Event::ProcessFinished { pid: 7, code: Some(1) };
        assert_eq!(e.to_string(), "hashcat pid 7 exited with code 1");
    }
}
