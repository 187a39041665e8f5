//! On-disk layout of the progress document.

use std::collections::{BTreeMap, BTreeSet};

use codequest_core::tier::Tier;
use serde::{Deserialize, Serialize};

/// Current layout version written by this crate.
pub const PROGRESS_SCHEMA_VERSION: u32 = 1;

/// The full persisted progress record.
///
/// ```json
/// {
///   "version": 1,
///   "topics": { "Arrays & Hashing": "Medium" },
///   "completed": ["two-sum"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDocument {
    /// Layout version.
    pub version: u32,
    /// Tier per topic name.
    #[serde(default)]
    pub topics: BTreeMap<String, Tier>,
    /// Completed problem identifiers.
    #[serde(default)]
    pub completed: BTreeSet<String>,
}

impl Default for ProgressDocument {
    fn default() -> Self {
        Self {
            version: PROGRESS_SCHEMA_VERSION,
            topics: BTreeMap::new(),
            completed: BTreeSet::new(),
        }
    }
}
