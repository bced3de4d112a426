//! Memoization of fitness by final board signature.
//!
//! The search consults a [`ResultCache`] before scoring a combination. If the
//! combination's final board signature is already present, the combination is
//! discarded without being scored: an equivalent board was seen earlier, in
//! this search or in a previous one sharing the cache. Caches grow
//! monotonically and are never evicted.
//!
//! Sharing one cache across searches saves evaluations but also means that a
//! later search can discard every combination it finds and report no result.
//! [`CacheScope`] lets the caller choose between the two behaviors.

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use blockfill_engine::BoardSignature;
use serde::{Deserialize, Serialize};

/// Map from final board signature to fitness.
pub trait ResultCache {
    fn contains(&self, signature: &BoardSignature) -> bool;

    fn get(&self, signature: &BoardSignature) -> Option<f32>;

    /// Records the fitness of a board. If the signature is already present,
    /// the first recorded value is kept and `false` is returned.
    fn insert(&mut self, signature: BoardSignature, fitness: f32) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lifetime of the result cache used by a player.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum CacheScope {
    /// One cache for the whole run, shared by every decision.
    #[default]
    Process,
    /// A fresh cache for every decision.
    Decision,
}

#[derive(Debug, Clone, Default)]
pub struct FitnessCache {
    entries: HashMap<BoardSignature, f32>,
}

impl FitnessCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultCache for FitnessCache {
    fn contains(&self, signature: &BoardSignature) -> bool {
        self.entries.contains_key(signature)
    }

    fn get(&self, signature: &BoardSignature) -> Option<f32> {
        self.entries.get(signature).copied()
    }

    fn insert(&mut self, signature: BoardSignature, fitness: f32) -> bool {
        match self.entries.entry(signature) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(fitness);
                true
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle to a [`FitnessCache`] shared between threads.
///
/// Clones refer to the same underlying cache. Each operation takes the lock
/// for its own duration only, so concurrent searches interleave at the
/// granularity of single lookups and inserts.
#[derive(Debug, Clone, Default)]
pub struct SharedFitnessCache {
    inner: Arc<Mutex<FitnessCache>>,
}

impl SharedFitnessCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FitnessCache> {
        // a panicking holder cannot leave a half-inserted entry behind
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultCache for SharedFitnessCache {
    fn contains(&self, signature: &BoardSignature) -> bool {
        self.lock().contains(signature)
    }

    fn get(&self, signature: &BoardSignature) -> Option<f32> {
        self.lock().get(signature)
    }

    fn insert(&mut self, signature: BoardSignature, fitness: f32) -> bool {
        self.lock().insert(signature, fitness)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use blockfill_engine::{Board, Position};

    use super::*;

    fn signature_with(cells: &[(u8, u8)]) -> BoardSignature {
        let mut board = Board::new(4);
        let positions: Vec<_> = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        board.place(&positions, None);
        board.signature()
    }

    #[test]
    fn test_insert_keeps_first_value() {
        let mut cache = FitnessCache::new();
        let signature = signature_with(&[(0, 0)]);
        assert!(cache.is_empty());
        assert!(cache.insert(signature, 1.5));
        assert!(!cache.insert(signature, -3.0));
        assert_eq!(cache.get(&signature), Some(1.5));
        assert!(cache.contains(&signature));
        assert!(!cache.contains(&signature_with(&[(0, 1)])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_cache_clones_share_entries() {
        let mut a = SharedFitnessCache::new();
        let b = a.clone();
        a.insert(signature_with(&[(1, 1)]), 0.0);
        assert_eq!(b.len(), 1);
        assert!(b.contains(&signature_with(&[(1, 1)])));
    }

    #[test]
    fn test_shared_cache_concurrent_inserts() {
        let cache = SharedFitnessCache::new();
        thread::scope(|s| {
            for t in 0..4u8 {
                let mut cache = cache.clone();
                s.spawn(move || {
                    for x in 0..4 {
                        for y in 0..4 {
                            cache.insert(signature_with(&[(x, y)]), f32::from(t));
                        }
                    }
                });
            }
        });
        assert_eq!(cache.len(), 16);
    }

    #[test]
    fn test_cache_scope_from_str() {
        assert_eq!("process".parse::<CacheScope>().unwrap(), CacheScope::Process);
        assert_eq!("Decision".parse::<CacheScope>().unwrap(), CacheScope::Decision);
        assert!("global".parse::<CacheScope>().is_err());
    }
}
