//! Turns a [`JobConfig`] snapshot into the argument vector passed to hashcat.
//!
//! Layout: `binary --attack-mode=<a> --hash-type=<m> [extra flags...] target
//! [wordlist | mask]`. Extra flags keep their insertion order.
use std::ffi::OsString;

use crate::error::{HashcatError, Result};
use crate::job::JobConfig;
use crate::modes::{Catalog, PayloadKind};

/// Report flags appended to a rendered command for read-only queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Show,
    Left,
}

impl ReportMode {
    pub fn flag(self) -> &'static str {
        match self {
            Self::Show => "--show",
            Self::Left => "--left",
        }
    }
}

/// Render the full argument vector, binary first. Only reads `config`.
pub fn render(config: &JobConfig) -> Result<Vec<OsString>> {
    let attack = config.attack.ok_or(HashcatError::IncompleteConfiguration(
        "attack mode has not been set, use set_attack_strategy",
    ))?;
    let hash = config.hash.ok_or(HashcatError::IncompleteConfiguration(
        "hash type has not been set, use set_hash_algorithm",
    ))?;
    let target_list = config
        .target_list
        .as_ref()
        .ok_or(HashcatError::IncompleteConfiguration(
            "target list has not been set, use set_target_list",
        ))?;
    if !crate::io::is_readable_file(target_list) {
        return Err(HashcatError::UnreadableFile(target_list.clone()));
    }

    let mut argv: Vec<OsString> = Vec::with_capacity(5 + config.extra.len());
    argv.push(config.binary.clone().into_os_string());
    argv.push(format!("--attack-mode={}", attack.code()).into());
    argv.push(format!("--hash-type={}", hash.code()).into());
    argv.extend(config.extra.rendered().map(OsString::from));
    argv.push(target_list.clone().into_os_string());

    match attack.payload() {
        Some(PayloadKind::Wordlist) => {
            let wordlist = config
                .wordlist
                .as_ref()
                .ok_or(HashcatError::IncompleteConfiguration(
                    "wordlist has not been set",
                ))?;
            argv.push(wordlist.clone().into_os_string());
        }
        Some(PayloadKind::Mask) => {
            let mask = config
                .mask
                .as_ref()
                .ok_or(HashcatError::IncompleteConfiguration("mask has not been set"))?;
            argv.push(mask.into());
        }
        None => return Err(HashcatError::NotImplemented(attack.name())),
    }

    log::debug!("command rendered: {:?}", argv);
    Ok(argv)
}

/// Render and append the flag for a `--show`/`--left` query.
pub fn render_report(config: &JobConfig, mode: ReportMode) -> Result<Vec<OsString>> {
    let mut argv = render(config)?;
    argv.push(mode.flag().into());
    Ok(argv)
}

/// Arguments for a single-algorithm machine-readable benchmark.
pub fn render_benchmark(config: &JobConfig, hash: crate::modes::HashAlgorithm) -> Vec<OsString> {
    vec![
        config.binary.clone().into_os_string(),
        format!("-m{}", hash.code()).into(),
        "--benchmark".into(),
        "--machine-readable".into(),
    ]
}
