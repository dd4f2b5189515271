//! Unbounded non-dominated archive.

use super::types::InsertOutcome;
use super::{admit, Admission};
use crate::dominance::EqualityComparator;
use crate::error::{ArchiveError, Result};
use crate::objective::{check_objectives, Solution};
use tracing::{trace, warn};

/// Keeps every non-dominated, non-duplicate solution it is given.
///
/// Uses the same insertion scan as [`BoundedArchive`](super::BoundedArchive)
/// but never truncates. Useful for collecting the final approximation set
/// of a run.
///
/// ```
/// use u_moea::NonDominatedArchive;
///
/// let mut front = NonDominatedArchive::new(2).unwrap();
/// front.insert_all(vec![
///     vec![1.0, 4.0],
///     vec![2.0, 2.0],
///     vec![3.0, 3.0],
///     vec![4.0, 1.0],
/// ]);
/// assert_eq!(front.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NonDominatedArchive<S> {
    num_objectives: usize,
    equality: EqualityComparator,
    members: Vec<S>,
}

impl<S: Solution> NonDominatedArchive<S> {
    /// Creates an empty archive with exact duplicate detection.
    pub fn new(num_objectives: usize) -> Result<Self> {
        if num_objectives == 0 {
            return Err(ArchiveError::invalid_config(
                "num_objectives must be at least 1",
            ));
        }
        Ok(Self {
            num_objectives,
            equality: EqualityComparator::exact(),
            members: Vec::new(),
        })
    }

    /// Sets the per-objective duplicate tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.equality = EqualityComparator::with_tolerance(tolerance);
        self
    }

    /// Attempts to insert a candidate.
    ///
    /// Never returns [`InsertOutcome::Truncated`] and never reports an
    /// eviction.
    pub fn try_insert(&mut self, candidate: S) -> Result<InsertOutcome> {
        check_objectives(candidate.objectives(), self.num_objectives)?;
        match admit(&mut self.members, candidate, &self.equality) {
            Admission::Admitted { removed } => Ok(InsertOutcome::Accepted {
                removed,
                evicted: false,
            }),
            Admission::Dominated => {
                trace!("candidate rejected: dominated by a member");
                Ok(InsertOutcome::Dominated)
            }
            Admission::Duplicate => {
                trace!("candidate rejected: duplicate of a member");
                Ok(InsertOutcome::Duplicate)
            }
        }
    }

    /// Inserts a candidate; returns `true` if it was accepted.
    pub fn insert(&mut self, candidate: S) -> bool {
        match self.try_insert(candidate) {
            Ok(outcome) => outcome.is_resident(),
            Err(e) => {
                warn!(error = %e, "rejected malformed candidate");
                false
            }
        }
    }

    /// Inserts every candidate; returns how many were accepted.
    pub fn insert_all<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = S>,
    {
        candidates
            .into_iter()
            .map(|c| self.insert(c))
            .filter(|&accepted| accepted)
            .count()
    }

    /// Removes and returns the member at `index`.
    pub fn remove(&mut self, index: usize) -> Result<S> {
        if index >= self.members.len() {
            return Err(ArchiveError::IndexOutOfRange {
                index,
                len: self.members.len(),
            });
        }
        Ok(self.members.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn num_objectives(&self) -> usize {
        self.num_objectives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.members.iter()
    }

    pub fn members(&self) -> &[S] {
        &self.members
    }

    pub fn into_members(self) -> Vec<S> {
        self.members
    }
}

impl<'a, S> IntoIterator for &'a NonDominatedArchive<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
