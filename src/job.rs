//! Mutable job state accumulated by the controller between runs.
//!
//! Attack strategy and hash algorithm live in dedicated typed fields; free-form
//! flags go into [`ExtraArguments`], which refuses the flags those fields own.
use std::path::{Path, PathBuf};

use crate::error::{HashcatError, Result};
use crate::modes::{AttackStrategy, HashAlgorithm, PayloadKind};

/// Flags owned by dedicated setters, paired with the setter to use instead.
pub const RESERVED_FLAGS: &[(&str, &str)] = &[
    ("-a", "set_attack_strategy"),
    ("--attack-mode", "set_attack_strategy"),
    ("-m", "set_hash_algorithm"),
    ("--hash-type", "set_hash_algorithm"),
];

/// Ordered passthrough flags. Setting a flag twice replaces its value but keeps
/// the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraArguments {
    entries: Vec<(String, Option<String>)>,
}

impl ExtraArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, flag: &str, value: Option<&str>) -> Result<()> {
        if let Some(setter) = reserved_setter(flag) {
            return Err(HashcatError::ReservedFlag {
                flag: flag.to_string(),
                setter,
            });
        }
        let value = value.map(str::to_string);
        match self.entries.iter_mut().find(|(f, _)| f == flag) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((flag.to_string(), value)),
        }
        Ok(())
    }

    pub fn get(&self, flag: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(f, _)| f == flag)
            .map(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render each entry as `flag` or `flag=value`, in insertion order.
    pub fn rendered(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|(flag, value)| match value {
            Some(v) => format!("{flag}={v}"),
            None => flag.clone(),
        })
    }
}

fn reserved_setter(flag: &str) -> Option<&'static str> {
    // `--hash-type=0` is as reserved as `--hash-type`
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    RESERVED_FLAGS
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map(|(_, setter)| *setter)
}

/// Payload arguments for [`crate::controller::HashcatController::set_attack_strategy`].
/// Only the field required by the chosen strategy is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackPayload {
    pub wordlist: Option<PathBuf>,
    pub mask: Option<String>,
}

impl AttackPayload {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn wordlist(path: impl Into<PathBuf>) -> Self {
        Self {
            wordlist: Some(path.into()),
            mask: None,
        }
    }

    pub fn mask(mask: impl Into<String>) -> Self {
        Self {
            wordlist: None,
            mask: Some(mask.into()),
        }
    }
}

/// Everything needed to render one hashcat invocation.
///
/// `wordlist` and `mask` are both kept across re-configuration; only the one
/// matching the current attack strategy is rendered.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub binary: PathBuf,
    pub attack: Option<AttackStrategy>,
    pub hash: Option<HashAlgorithm>,
    pub extra: ExtraArguments,
    pub target_list: Option<PathBuf>,
    pub wordlist: Option<PathBuf>,
    pub mask: Option<String>,
}

impl JobConfig {
    /// Create an empty configuration for `binary`. No validation is done here.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            attack: None,
            hash: None,
            extra: ExtraArguments::new(),
            target_list: None,
            wordlist: None,
            mask: None,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// True once every field required for rendering is present.
    pub fn is_renderable(&self) -> bool {
        crate::render::render(self).is_ok()
    }

    /// Validate `payload` for `strategy` and, only if valid, store it together
    /// with the strategy. A failed call leaves the configuration untouched.
    pub fn apply_attack(&mut self, strategy: AttackStrategy, payload: AttackPayload) -> Result<()> {
        match strategy.payload() {
            Some(PayloadKind::Wordlist) => {
                let wordlist = payload.wordlist.ok_or(HashcatError::MissingPayload {
                    field: PayloadKind::Wordlist.field(),
                    strategy: strategy.name(),
                })?;
                if !crate::io::is_readable_file(&wordlist) {
                    return Err(HashcatError::UnreadableFile(wordlist));
                }
                self.wordlist = Some(wordlist);
            }
            Some(PayloadKind::Mask) => {
                let mask = payload
                    .mask
                    .filter(|m| !m.is_empty())
                    .ok_or(HashcatError::MissingPayload {
                        field: PayloadKind::Mask.field(),
                        strategy: strategy.name(),
                    })?;
                self.mask = Some(mask);
            }
            None => return Err(HashcatError::NotImplemented(strategy.name())),
        }
        self.attack = Some(strategy);
        Ok(())
    }
}
