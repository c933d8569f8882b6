//! Source-key collision tracking across one resolution tree.

use super::FieldPath;
use crate::error::{ResolveError, Result};
use std::collections::HashMap;

#[derive(Debug)]
struct Claim {
    path: FieldPath,
    allow_conflicting: bool,
}

/// Records which field consumed each source key during one `resolve` call.
///
/// Claims made inside a nested trial that later fails are undone with
/// [`checkpoint`](Self::checkpoint) / [`rollback`](Self::rollback).
#[derive(Debug, Default)]
pub struct CollisionTracker {
    claims: HashMap<String, Claim>,
    journal: Vec<String>,
}

/// Position in the claim journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl CollisionTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` as consumed by `path`.
    ///
    /// Re-claiming from the same path is a no-op. A claim from a different path
    /// succeeds only when both claimants allow conflicting names.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::KeyCollision`] naming both paths.
    pub fn claim(&mut self, key: &str, path: &FieldPath, allow_conflicting: bool) -> Result<()> {
        if let Some(existing) = self.claims.get(key) {
            if existing.path == *path || (existing.allow_conflicting && allow_conflicting) {
                return Ok(());
            }
            return Err(ResolveError::KeyCollision {
                key: key.to_string(),
                first: existing.path.clone(),
                second: path.clone(),
            });
        }
        self.claims.insert(
            key.to_string(),
            Claim {
                path: path.clone(),
                allow_conflicting,
            },
        );
        self.journal.push(key.to_string());
        Ok(())
    }

    /// Current journal position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.journal.len())
    }

    /// Forget every claim made after `checkpoint`.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.0 {
            if let Some(key) = self.journal.pop() {
                self.claims.remove(&key);
            }
        }
    }

    /// Field path that consumed `key`, if any.
    pub fn claimant(&self, key: &str) -> Option<&FieldPath> {
        self.claims.get(key).map(|claim| &claim.path)
    }

    /// Number of distinct keys consumed.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether nothing has been consumed.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
