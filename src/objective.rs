//! Objective vectors and the solution contract seen by archives.
//!
//! Archives never inspect decision variables. Anything that can expose a
//! slice of objective values (all **minimized**) implements [`Solution`]
//! and can be stored.

use crate::error::{ArchiveError, Result};

/// A candidate solution as seen by an archive.
///
/// Only the objective values are read. Identity is by value ownership:
/// two solutions with identical objectives are distinct entities unless an
/// archive deduplicates them.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Route {
///     stops: Vec<usize>,
///     objectives: Vec<f64>,
/// }
///
/// impl Solution for Route {
///     fn objectives(&self) -> &[f64] { &self.objectives }
/// }
/// ```
pub trait Solution {
    /// Objective values of this solution (minimization).
    fn objectives(&self) -> &[f64];
}

impl Solution for Vec<f64> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

/// An owned, immutable objective vector.
///
/// # Example
///
/// ```
/// use u_moea::ObjectiveVector;
///
/// let v = ObjectiveVector::new(vec![1.0, 2.0]);
/// assert_eq!(v.len(), 2);
/// assert_eq!(v[1], 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectiveVector(Vec<f64>);

impl ObjectiveVector {
    /// Wraps a vector of objective values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no objectives.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Objective values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the vector, returning the raw values.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ObjectiveVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl std::ops::Index<usize> for ObjectiveVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl Solution for ObjectiveVector {
    fn objectives(&self) -> &[f64] {
        &self.0
    }
}

/// An evaluated solution: an opaque payload plus its objective vector.
///
/// # Example
///
/// ```
/// use u_moea::{Candidate, Solution};
///
/// let c = Candidate::new(vec![0.3, 0.7], vec![1.5, 4.0]);
/// assert_eq!(c.objectives(), &[1.5, 4.0]);
/// assert_eq!(c.payload, vec![0.3, 0.7]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate<P> {
    /// Decision representation, never read by archives.
    pub payload: P,
    objectives: ObjectiveVector,
}

impl<P> Candidate<P> {
    /// Creates a candidate from a payload and its evaluated objectives.
    pub fn new(payload: P, objectives: impl Into<ObjectiveVector>) -> Self {
        Self {
            payload,
            objectives: objectives.into(),
        }
    }

    /// Objective vector of this candidate.
    pub fn objective_vector(&self) -> &ObjectiveVector {
        &self.objectives
    }
}

impl<P> Solution for Candidate<P> {
    fn objectives(&self) -> &[f64] {
        self.objectives.as_slice()
    }
}

/// Checks that `values` has `expected` finite entries.
pub(crate) fn check_objectives(values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(ArchiveError::DimensionMismatch {
            expected,
            actual: values.len(),
        });
    }
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ArchiveError::NonFiniteObjective { index, value });
    }
    Ok(())
}

/// Component-wise minimum of a set of objective vectors.
///
/// Returns `None` for an empty set.
///
/// # Example
///
/// ```
/// use u_moea::objective::ideal_point;
///
/// let rows = vec![vec![1.0, 5.0], vec![3.0, 2.0]];
/// let points: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
/// assert_eq!(ideal_point(&points), Some(vec![1.0, 2.0]));
/// ```
pub fn ideal_point(points: &[&[f64]]) -> Option<Vec<f64>> {
    fold_points(points, f64::min)
}

/// Component-wise maximum of a set of objective vectors.
///
/// Returns `None` for an empty set.
pub fn nadir_point(points: &[&[f64]]) -> Option<Vec<f64>> {
    fold_points(points, f64::max)
}

fn fold_points(points: &[&[f64]], pick: fn(f64, f64) -> f64) -> Option<Vec<f64>> {
    let (first, rest) = points.split_first()?;
    let mut acc = first.to_vec();
    for p in rest {
        for (a, &v) in acc.iter_mut().zip(p.iter()) {
            *a = pick(*a, v);
        }
    }
    Some(acc)
}
