//! Filesystem checks for the paths handed to the controller, plus a streaming
//! line counter used to report the size of a target list. Large files are
//! memory-mapped instead of read through a buffered reader.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memmap2::Mmap;

/// Threshold in bytes above which we attempt to use mmap for reading.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

/// True when `path` is a regular file this process can open for reading.
pub fn is_readable_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.is_file() && File::open(path).is_ok()
}

/// True when `path` is a regular file with an execute bit set.
#[cfg(unix)]
pub fn is_executable_file<P: AsRef<Path>>(path: P) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Decide whether to use mmap based on file size and threshold.
pub fn should_use_mmap(file_size_bytes: u64, threshold_bytes: u64) -> bool {
    file_size_bytes >= threshold_bytes
}

/// Count lines that are not blank after trimming.
pub fn count_entries<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> io::Result<usize> {
    let meta = std::fs::metadata(&path)?;
    let file = File::open(&path)?;
    if meta.is_file() && meta.len() > 0 && should_use_mmap(meta.len(), threshold_bytes) {
        let mmap = unsafe { Mmap::map(&file) }?;
        Ok(count_entries_in(&mmap))
    } else {
        let mut count = 0;
        for line in BufReader::new(file).split(b'\n') {
            if !is_blank(&line?) {
                count += 1;
            }
        }
        Ok(count)
    }
}

fn count_entries_in(data: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;
    while pos < data.len() {
        let end = match memchr::memchr(b'\n', &data[pos..]) {
            Some(off) => pos + off,
            None => data.len(),
        };
        if !is_blank(&data[pos..end]) {
            count += 1;
        }
        pos = end + 1;
    }
    count
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|b| b.is_ascii_whitespace())
}
