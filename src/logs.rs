//! Per-session log directories for the CLI.
//!
//! [`create_logs_dir`] never reuses an existing directory: when `name` is
//! taken it tries `name_1`, `name_2`, ... until one can be created.
//! [`FileObserver`] appends controller events to `controller.log` inside it.
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::events::{Event, Observer};

pub const LOG_FILE_NAME: &str = "controller.log";

pub fn create_logs_dir<P: AsRef<Path>>(base: P) -> io::Result<PathBuf> {
    let base = base.as_ref();
    let mut candidate = base.to_path_buf();
    let mut suffix = 0u32;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                suffix += 1;
                let mut name = base.as_os_str().to_os_string();
                name.push(format!("_{suffix}"));
                candidate = PathBuf::from(name);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Writes `timestamp | hashcat_controller | LEVEL | message` lines.
#[derive(Debug)]
pub struct FileObserver {
    file: File,
}

impl FileObserver {
    pub fn create<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.as_ref().join(LOG_FILE_NAME))?;
        Ok(Self { file })
    }
}

impl Observer for FileObserver {
    fn notify(&self, event: &Event<'_>) {
        let ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!("{} | hashcat_controller | {} | {}\n", ts, event.level(), event);
        if let Err(e) = (&self.file).write_all(line.as_bytes()) {
            log::warn!("failed to write controller log: {}", e);
        }
    }
}
