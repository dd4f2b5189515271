//! Thread-safe archive handle.
//!
//! Insertion is a compound read-modify-write (scan, remove, append,
//! truncate), so concurrent producers serialize on a single mutex.

use super::bounded::BoundedArchive;
use super::config::ArchiveConfig;
use super::types::InsertOutcome;
use crate::error::Result;
use crate::objective::Solution;
use crate::truncation::Truncation;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to a [`BoundedArchive`] shared between threads.
///
/// ```
/// use u_moea::{ArchiveConfig, CrowdingDistance, SharedArchive};
/// use std::thread;
///
/// let archive =
///     SharedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(20, 2), CrowdingDistance).unwrap();
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let archive = archive.clone();
///         thread::spawn(move || {
///             for i in 0..10 {
///                 let x = (t * 10 + i) as f64;
///                 archive.insert(vec![x, 100.0 - x]);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(archive.len(), 20);
/// ```
#[derive(Debug)]
pub struct SharedArchive<S, T> {
    inner: Arc<Mutex<BoundedArchive<S, T>>>,
}

impl<S, T> Clone for SharedArchive<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Solution, T: Truncation> SharedArchive<S, T> {
    /// Creates a shared, empty archive.
    pub fn new(config: ArchiveConfig, truncation: T) -> Result<Self> {
        Ok(Self::from_archive(BoundedArchive::new(config, truncation)?))
    }

    /// Wraps an existing archive.
    pub fn from_archive(archive: BoundedArchive<S, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(archive)),
        }
    }

    // Members are only mutated after the insertion scan completes, so a
    // poisoned lock still guards a consistent archive.
    fn lock(&self) -> MutexGuard<'_, BoundedArchive<S, T>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// See [`BoundedArchive::try_insert`].
    pub fn try_insert(&self, candidate: S) -> Result<InsertOutcome> {
        self.lock().try_insert(candidate)
    }

    /// See [`BoundedArchive::insert`].
    pub fn insert(&self, candidate: S) -> bool {
        self.lock().insert(candidate)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the archive.
    pub fn with<R>(&self, f: impl FnOnce(&mut BoundedArchive<S, T>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Returns the archive consumed from this handle if it is the last one,
    /// otherwise hands the handle back.
    pub fn into_inner(self) -> std::result::Result<BoundedArchive<S, T>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex
                .into_inner()
                .unwrap_or_else(|poisoned| poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<S: Solution + Clone, T: Truncation> SharedArchive<S, T> {
    /// Copies the current members.
    pub fn snapshot(&self) -> Vec<S> {
        self.lock().members().to_vec()
    }

    /// Copies a member picked by the truncation policy's selection rule.
    pub fn select(&self) -> Option<S> {
        self.lock().select().cloned()
    }
}
