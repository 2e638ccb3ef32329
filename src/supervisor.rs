//! Spawning and supervising hashcat processes.
//!
//! A long-running job is started with [`Supervisor::start`] and collected with
//! [`Supervisor::wait`]; stdout and stderr are drained by reader threads from
//! the moment the child starts so a chatty process never blocks on a full
//! pipe. One-shot queries go through [`run_to_completion`].
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{HashcatError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl JobOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Turn a non-zero exit into [`HashcatError::ToolFailed`].
    pub fn into_success(self) -> Result<Self> {
        if self.status.success() {
            Ok(self)
        } else {
            Err(HashcatError::ToolFailed {
                status: self.status.to_string(),
                stderr: self.stderr_lossy().trim().to_string(),
            })
        }
    }
}

/// A spawned process together with the threads draining its output.
#[derive(Debug)]
struct Tracked {
    child: Child,
    stdout: Option<JoinHandle<Vec<u8>>>,
    stderr: Option<JoinHandle<Vec<u8>>>,
    finished: Option<ExitStatus>,
}

impl Tracked {
    fn collect(&mut self, status: ExitStatus) -> JobOutput {
        self.finished = Some(status);
        JobOutput {
            status,
            stdout: join_reader(self.stdout.take()),
            stderr: join_reader(self.stderr.take()),
        }
    }
}

/// Tracks at most one process at a time.
#[derive(Debug, Default)]
pub struct Supervisor {
    current: Option<Tracked>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pid of the tracked process, running or finished.
    pub fn pid(&self) -> Option<u32> {
        self.current.as_ref().map(|t| t.child.id())
    }

    /// True while the tracked process has not exited.
    pub fn is_running(&mut self) -> bool {
        match self.current.as_mut() {
            Some(tracked) if tracked.finished.is_none() => {
                matches!(tracked.child.try_wait(), Ok(None))
            }
            _ => false,
        }
    }

    /// Spawn `argv` (program first) without a shell and return its pid.
    /// Refuses while a previously started process is still running.
    pub fn start(&mut self, argv: &[OsString]) -> Result<u32> {
        if self.is_running() {
            if let Some(pid) = self.pid() {
                return Err(HashcatError::AlreadyRunning(pid));
            }
        }
        let mut child = spawn(argv)?;
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);
        let pid = child.id();
        self.current = Some(Tracked {
            child,
            stdout,
            stderr,
            finished: None,
        });
        Ok(pid)
    }

    /// Block until the tracked process exits, or until `timeout` elapses.
    ///
    /// On timeout the process keeps running and stays tracked, so `wait` can be
    /// called again later. Once a process has been collected, further calls
    /// return its exit status with empty output.
    pub fn wait(&mut self, timeout: Option<Duration>) -> Result<JobOutput> {
        let tracked = self.current.as_mut().ok_or(HashcatError::NoProcessStarted)?;
        if let Some(status) = tracked.finished {
            return Ok(JobOutput {
                status,
                stdout: Vec::new(),
                stderr: Vec::new(),
            });
        }

        let Some(timeout) = timeout else {
            let status = tracked.child.wait()?;
            return Ok(tracked.collect(status));
        };

        let start = Instant::now();
        loop {
            if let Some(status) = tracked.child.try_wait()? {
                return Ok(tracked.collect(status));
            }
            if start.elapsed() >= timeout {
                return Err(HashcatError::WaitTimeout {
                    pid: tracked.child.id(),
                    timeout,
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Spawn `argv`, wait for it to exit, and return its captured output.
pub fn run_to_completion(argv: &[OsString]) -> Result<JobOutput> {
    let child = spawn(argv)?;
    let output = child.wait_with_output()?;
    Ok(JobOutput {
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

fn spawn(argv: &[OsString]) -> Result<Child> {
    let (program, args) = argv.split_first().ok_or(HashcatError::IncompleteConfiguration(
        "empty command line",
    ))?;
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    log::debug!("spawning: {:?}", cmd);
    cmd.spawn().map_err(|source| HashcatError::LaunchFailed {
        program: PathBuf::from(program),
        source,
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Err(e) = reader.read_to_end(&mut buf) {
            log::warn!("failed to read process output: {}", e);
        }
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    match handle.map(JoinHandle::join) {
        Some(Ok(buf)) => buf,
        Some(Err(_)) => {
            log::warn!("output reader thread panicked");
            Vec::new()
        }
        None => Vec::new(),
    }
}
