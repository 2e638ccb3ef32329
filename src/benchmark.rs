//! Parsing of `--benchmark --machine-readable` output.
//!
//! The report is trimmed and split into lines; the third line is
//! colon-delimited and its sixth field holds the hashes per second.
use crate::error::{HashcatError, Result};

const RESULT_LINE: usize = 2;
const SPEED_FIELD: usize = 5;

pub fn parse_hashes_per_second(output: &str) -> Result<u64> {
    let line = output
        .trim()
        .split('\n')
        .nth(RESULT_LINE)
        .ok_or_else(|| HashcatError::MalformedReport(format!("missing line {}", RESULT_LINE + 1)))?;
    let field = line.trim().split(':').nth(SPEED_FIELD).ok_or_else(|| {
        HashcatError::MalformedReport(format!("missing speed field in {:?}", line))
    })?;
    field
        .trim()
        .parse::<u64>()
        .map_err(|_| HashcatError::MalformedReport(format!("bad speed {:?}", field)))
}
