//! Id generation
//!
//! Provides [`IdGenerator`], which hands out `<prefix>_<token>` ids that never
//! repeat within a process, no matter how fast they are requested.

use crate::id::{RecordId, RecordKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Collisions tolerated from the active strategy before switching to ULIDs
const MAX_ATTEMPTS: usize = 1024;

/// How tokens are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Per-kind counter seeded past the largest numeric token seen
    #[default]
    Sequential,
    /// Monotonic ULID tokens
    Ulid,
}

/// Unique id source for all three collections
pub struct IdGenerator {
    strategy: IdStrategy,
    /// Next sequential token per kind, indexed by [`RecordKind::index`];
    /// `None` once the counter has run past `u64::MAX`
    next: [Option<u64>; 3],
    ulids: ulid::Generator,
}

impl IdGenerator {
    /// Create generator with counters starting at 1
    #[inline]
    #[must_use]
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            next: [Some(1); 3],
            ulids: ulid::Generator::new(),
        }
    }

    /// Active strategy
    #[inline]
    #[must_use]
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Account for an id that already exists
    ///
    /// Numeric tokens push the counter for that kind past them. Ids with
    /// foreign prefixes or non-numeric tokens are ignored. A token of
    /// `u64::MAX` exhausts the counter and later ids for the kind are ULIDs.
    pub fn observe(&mut self, kind: RecordKind, id: &RecordId) {
        if id.kind() != Some(kind) {
            return;
        }
        if let Some(n) = id.numeric_token() {
            let slot = &mut self.next[kind.index()];
            *slot = match (*slot, n.checked_add(1)) {
                (Some(current), Some(past)) => Some(current.max(past)),
                _ => None,
            };
        }
    }

    /// Account for every id in an iterator
    pub fn observe_all<'a>(&mut self, kind: RecordKind, ids: impl IntoIterator<Item = &'a RecordId>) {
        for id in ids {
            self.observe(kind, id);
        }
    }

    /// Produce the next id for a kind
    ///
    /// An exhausted sequential counter falls back to ULID tokens.
    pub fn next_id(&mut self, kind: RecordKind) -> RecordId {
        match self.strategy {
            IdStrategy::Sequential => match self.next[kind.index()] {
                Some(token) => {
                    self.next[kind.index()] = token.checked_add(1);
                    RecordId::new(kind, token)
                }
                None => self.next_ulid(kind),
            },
            IdStrategy::Ulid => self.next_ulid(kind),
        }
    }

    /// Produce an id that `taken` does not already contain
    ///
    /// Gives up on the active strategy after 1024 collisions and
    /// continues with ULID tokens, which are strictly increasing.
    pub fn next_unique(&mut self, kind: RecordKind, taken: impl Fn(&RecordId) -> bool) -> RecordId {
        for _ in 0..MAX_ATTEMPTS {
            let id = self.next_id(kind);
            if !taken(&id) {
                return id;
            }
        }
        loop {
            let id = self.next_ulid(kind);
            if !taken(&id) {
                return id;
            }
        }
    }

    fn next_ulid(&mut self, kind: RecordKind) -> RecordId {
        // Generator only fails when the random part overflows within one millisecond
        let token = self.ulids.generate().unwrap_or_else(|_| Ulid::new());
        RecordId::new(kind, token)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("strategy", &self.strategy)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}
