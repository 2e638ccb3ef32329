//! Controller: owns one job configuration and at most one hashcat process.
//! The same controller is reused across jobs; setters overwrite the previous
//! job's fields and a new run is started without rebuilding anything.
//!
//! Typical usage:
//!
//! ```no_run
//! use hashcat_controller::prelude::*;
//! # fn main() -> Result<(), HashcatError> {
//! let mut hc = HashcatController::new("/usr/bin/hashcat")?;
//! hc.set_target_list("data/example.0")?;
//! hc.set_hash_algorithm(HashAlgorithm::Md5)?;
//! hc.set_attack_strategy(AttackStrategy::Straight, AttackPayload::wordlist("data/wordlist.txt"))?;
//! hc.run()?;
//! hc.wait(None)?;
//!
//! hc.set_attack_strategy(AttackStrategy::BruteForce, AttackPayload::mask("Spring?d?d"))?;
//! hc.run()?;
//! hc.wait(None)?;
//!
//! for entry in hc.show()? {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::benchmark::parse_hashes_per_second;
use crate::error::{HashcatError, Result};
use crate::events::{Event, LogObserver, Observer};
use crate::io::{DEFAULT_MMAP_THRESHOLD_BYTES, count_entries, is_executable_file, is_readable_file};
use crate::job::{AttackPayload, JobConfig};
use crate::modes::{AttackStrategy, Catalog, HashAlgorithm, ModeValue};
use crate::pot::{CrackedEntry, parse_records};
use crate::render::{ReportMode, render, render_benchmark, render_report};
use crate::report::parse_report_tokens;
use crate::supervisor::{JobOutput, Supervisor, run_to_completion};

pub const DEFAULT_BINARY: &str = "/usr/bin/hashcat";

pub struct HashcatController {
    job: JobConfig,
    version: String,
    benchmarks: BTreeMap<HashAlgorithm, u64>,
    last_command: Vec<OsString>,
    supervisor: Supervisor,
    observers: Vec<Box<dyn Observer + Send>>,
}

impl std::fmt::Debug for HashcatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashcatController")
            .field("job", &self.job)
            .field("version", &self.version)
            .field("benchmarks", &self.benchmarks)
            .field("last_command", &self.last_command)
            .field("supervisor", &self.supervisor)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl HashcatController {
    /// Create a controller for the hashcat binary at `binary`, logging through
    /// the `log` facade.
    pub fn new(binary: impl AsRef<Path>) -> Result<Self> {
        Self::with_observers(binary, vec![Box::new(LogObserver)])
    }

    /// Create a controller reporting to `observers` only.
    pub fn with_observers(
        binary: impl AsRef<Path>,
        observers: Vec<Box<dyn Observer + Send>>,
    ) -> Result<Self> {
        let mut controller = Self {
            job: JobConfig::new(binary.as_ref()),
            version: String::new(),
            benchmarks: BTreeMap::new(),
            last_command: Vec::new(),
            supervisor: Supervisor::new(),
            observers,
        };
        controller.set_executable(binary)?;
        Ok(controller)
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer + Send>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: Event<'_>) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }

    /// Report `err` to the observers and hand it back for returning.
    fn fail(&self, err: HashcatError) -> HashcatError {
        self.emit(Event::Failed(&err));
        err
    }

    fn check<T>(&self, res: Result<T>) -> Result<T> {
        res.map_err(|e| self.fail(e))
    }

    /// Switch to another hashcat binary. Queries `--version` once.
    pub fn set_executable(&mut self, binary: impl AsRef<Path>) -> Result<()> {
        let binary = binary.as_ref();
        if !is_executable_file(binary) {
            return Err(self.fail(HashcatError::NotExecutable(binary.to_path_buf())));
        }
        let output = self.check(
            run_to_completion(&[binary.as_os_str().to_os_string(), "--version".into()])
                .and_then(JobOutput::into_success),
        )?;
        self.version = output.stdout_lossy().trim().to_string();
        self.job.binary = binary.to_path_buf();
        self.emit(Event::ExecutableSet {
            binary,
            version: &self.version,
        });
        Ok(())
    }

    pub fn set_target_list(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !is_readable_file(path) {
            return Err(self.fail(HashcatError::UnreadableFile(path.to_path_buf())));
        }
        let entries = match count_entries(path, DEFAULT_MMAP_THRESHOLD_BYTES) {
            Ok(n) => Some(n),
            Err(e) => {
                log::warn!("could not count entries in {}: {}", path.display(), e);
                None
            }
        };
        self.job.target_list = Some(path.to_path_buf());
        self.emit(Event::TargetListSet { path, entries });
        Ok(())
    }

    pub fn set_hash_algorithm(&mut self, value: impl Into<ModeValue<HashAlgorithm>>) -> Result<()> {
        let hash = self.check(HashAlgorithm::resolve(value))?;
        self.job.hash = Some(hash);
        self.emit(Event::HashAlgorithmSet(hash));
        Ok(())
    }

    /// Select the attack strategy and its payload. On failure the previously
    /// selected strategy stays in effect.
    pub fn set_attack_strategy(
        &mut self,
        value: impl Into<ModeValue<AttackStrategy>>,
        payload: AttackPayload,
    ) -> Result<()> {
        let strategy = self.check(AttackStrategy::resolve(value))?;
        let res = self.job.apply_attack(strategy, payload);
        self.check(res)?;
        self.emit(Event::AttackStrategySet(strategy));
        Ok(())
    }

    /// Add a passthrough flag, including its leading dashes. A `None` value
    /// renders the bare flag.
    pub fn add_argument(&mut self, flag: &str, value: Option<&str>) -> Result<()> {
        let res = self.job.extra.insert(flag, value);
        self.check(res)?;
        self.emit(Event::ArgumentAdded { flag, value });
        Ok(())
    }

    /// Render the command the next `run` would execute.
    pub fn command(&mut self) -> Result<&[OsString]> {
        let argv = self.check(render(&self.job))?;
        self.last_command = argv;
        self.emit(Event::CommandRendered(&self.last_command));
        Ok(&self.last_command)
    }

    /// Start hashcat with the current configuration and return its pid.
    pub fn run(&mut self) -> Result<u32> {
        self.command()?;
        let res = self.supervisor.start(&self.last_command);
        let pid = self.check(res)?;
        self.emit(Event::ProcessStarted { pid });
        Ok(pid)
    }

    /// Wait for the process started by [`run`](Self::run). With a timeout, a
    /// process still running at the deadline is left alone and
    /// [`HashcatError::WaitTimeout`] is returned.
    pub fn wait(&mut self, timeout: Option<Duration>) -> Result<JobOutput> {
        let res = self.supervisor.wait(timeout);
        let output = self.check(res)?;
        if let Some(pid) = self.supervisor.pid() {
            self.emit(Event::ProcessFinished {
                pid,
                code: output.code(),
            });
        }
        Ok(output)
    }

    /// Cracked entries for the current target list, from hashcat's potfile.
    pub fn show(&mut self) -> Result<Vec<String>> {
        self.report(ReportMode::Show)
    }

    /// Entries of the current target list not cracked yet.
    pub fn left(&mut self) -> Result<Vec<String>> {
        self.report(ReportMode::Left)
    }

    /// [`show`](Self::show) split into `hash:plain` pairs.
    pub fn show_records(&mut self) -> Result<Vec<CrackedEntry>> {
        let tokens = self.show()?;
        Ok(parse_records(&tokens))
    }

    fn report(&mut self, mode: ReportMode) -> Result<Vec<String>> {
        let argv = self.check(render_report(&self.job, mode))?;
        log::debug!("adding '{}' to run report query", mode.flag());
        let output = self.check(run_to_completion(&argv).and_then(JobOutput::into_success))?;
        let tokens = parse_report_tokens(&output.stdout_lossy());
        self.emit(Event::ReportQueried {
            mode,
            entries: tokens.len(),
        });
        Ok(tokens)
    }

    /// Benchmark one hash algorithm, record and return its hashes per second.
    /// Independent of the job configuration.
    pub fn benchmark(&mut self, value: impl Into<ModeValue<HashAlgorithm>>) -> Result<u64> {
        let hash = self.check(HashAlgorithm::resolve(value))?;
        let argv = render_benchmark(&self.job, hash);
        let output = self.check(run_to_completion(&argv).and_then(JobOutput::into_success))?;
        let hashes_per_second = self.check(parse_hashes_per_second(&output.stdout_lossy()))?;
        self.benchmarks.insert(hash, hashes_per_second);
        self.emit(Event::BenchmarkRecorded {
            hash,
            hashes_per_second,
        });
        Ok(hashes_per_second)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn binary(&self) -> &Path {
        self.job.binary()
    }

    pub fn benchmarks(&self) -> &BTreeMap<HashAlgorithm, u64> {
        &self.benchmarks
    }

    /// Most recently rendered command, empty before the first render.
    pub fn last_command(&self) -> &[OsString] {
        &self.last_command
    }

    pub fn job(&self) -> &JobConfig {
        &self.job
    }

    pub fn target_list(&self) -> Option<&PathBuf> {
        self.job.target_list.as_ref()
    }

    pub fn pid(&self) -> Option<u32> {
        self.supervisor.pid()
    }
}
