//! Override lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Immutable mapping from request target to local file.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: BTreeMap<String, PathBuf>,
}

impl OverrideTable {
    /// Freeze a set of overrides.
    pub fn new(entries: BTreeMap<String, PathBuf>) -> Self {
        Self { entries }
    }

    /// Find the local file for a request target.
    ///
    /// The match is exact on the full target, so `/a.txt?x=1` does not hit
    /// an entry for `/a.txt`.
    pub fn lookup(&self, target: &str) -> Option<&Path> {
        self.entries.get(target).map(PathBuf::as_path)
    }
}

impl fmt::Display for OverrideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (target, file)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", target, file)?;
        }
        write!(f, "}}")
    }
}
