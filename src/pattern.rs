//! Result-path pattern matching
//!
//! Result files embed their experiment configuration in the path:
//! `..._<version>_<scheduler><rb-count>...` with a case-insensitive
//! scheduler token. Extraction is a pure function of the path string so it
//! stays unit-testable without touching disk.

use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;
use std::path::Path;

/// Scheduling policy identifiers recognized in result paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scheduler {
    /// Earliest Deadline First (NR MAC scheduling module)
    Edf,
    /// Proportional Fair
    Pf,
}

impl Scheduler {
    /// Parse a scheduler token from a path match (already known to be
    /// one of the alternation arms, any casing)
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "EDF" => Some(Scheduler::Edf),
            "PF" => Some(Scheduler::Pf),
            _ => None,
        }
    }

    /// Presentation label for this scheduler.
    ///
    /// The EDF token is rewritten to `NR-EDF` to distinguish the NR
    /// MAC-layer scheduling module from the identically-named classic
    /// EDF policy; all other tokens pass through uppercased.
    pub fn label(&self) -> &'static str {
        match self {
            Scheduler::Edf => "NR-EDF",
            Scheduler::Pf => "PF",
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A distinct experimental condition parsed out of a result path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    pub scheduler: Scheduler,
    /// Resource-block count (strictly positive)
    pub rb: u32,
}

/// Compiled matcher for one version's result files
#[derive(Debug, Clone)]
pub struct ResultPattern {
    regex: Regex,
}

impl ResultPattern {
    /// Build the matcher for a version token.
    ///
    /// The version token is taken literally (regex metacharacters
    /// escaped), the scheduler token matches case-insensitively.
    pub fn new(version: &str) -> Result<Self> {
        let pattern = format!(
            r"(?i).*_{}_(?P<sched>edf|pf)(?P<rb>\d+)",
            regex::escape(version)
        );
        let regex = Regex::new(&pattern)
            .with_context(|| format!("invalid pattern for version {:?}", version))?;
        Ok(Self { regex })
    }

    /// Extract the configuration key from a path, or `None` if the path
    /// does not follow the naming convention (not an error - unmatched
    /// files are skipped).
    ///
    /// The full path is tried first so a configuration encoded in a
    /// directory name still matches; the bare file name is the fallback.
    pub fn match_path(&self, path: &Path) -> Option<ConfigKey> {
        let full = path.to_string_lossy();
        if let Some(key) = self.match_str(&full) {
            return Some(key);
        }
        let name = path.file_name()?.to_string_lossy();
        self.match_str(&name)
    }

    fn match_str(&self, s: &str) -> Option<ConfigKey> {
        let caps = self.regex.captures(s)?;
        let scheduler = Scheduler::from_token(caps.name("sched")?.as_str())?;
        // rb is a positive integer by contract: zero or an overflowing
        // digit run is not a recognized configuration
        let rb: u32 = caps.name("rb")?.as_str().parse().ok()?;
        if rb == 0 {
            return None;
        }
        Some(ConfigKey { scheduler, rb })
    }
}
