//! Per-call resolution state.

use super::locator::{Located, RawMap, locate};
use super::tracker::{Checkpoint, CollisionTracker};
use super::FieldPath;
use crate::error::Result;

/// State of one top-level `resolve` call: the input map and the collision
/// tracker shared by every nested level. Never reused across calls.
pub(crate) struct ResolutionContext<'a> {
    raw: &'a RawMap,
    tracker: CollisionTracker,
    resolved: usize,
    log_raw_values: bool,
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(raw: &'a RawMap, log_raw_values: bool) -> Self {
        Self {
            raw,
            tracker: CollisionTracker::new(),
            resolved: 0,
            log_raw_values,
        }
    }

    pub(crate) fn locate(&self, keys: &[String]) -> Located<'a> {
        locate(self.raw, keys)
    }

    pub(crate) fn claim(&mut self, key: &str, path: &FieldPath, allow_conflicting: bool) -> Result<()> {
        self.tracker.claim(key, path, allow_conflicting)
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        self.tracker.checkpoint()
    }

    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.tracker.rollback(checkpoint);
    }

    pub(crate) fn claimed(&self) -> usize {
        self.tracker.len()
    }

    /// Count a value located and parsed from the raw map.
    pub(crate) fn record_resolved(&mut self) {
        self.resolved += 1;
    }

    /// Values located so far. Never decreases, rollbacks included.
    pub(crate) fn resolved(&self) -> usize {
        self.resolved
    }

    /// Value as it may appear in logs.
    pub(crate) fn loggable<'v>(&self, value: &'v str) -> &'v str {
        if self.log_raw_values { value } else { "<redacted>" }
    }
}
