//! Hypervolume-contribution truncation (bi-objective).
//!
//! A member's exclusive contribution is the hypervolume lost when it is
//! removed: `HV(S) - HV(S \ {s})`. The policy normalizes the set, places the
//! reference point beyond the nadir by an offset, and evicts the smallest
//! contributor.

use super::Truncation;
use crate::error::{ArchiveError, Result};
use crate::objective::{ideal_point, nadir_point};
use rand::Rng;
use std::cmp::Ordering;

/// Exclusive hypervolume contributions of 2-objective points (minimization).
///
/// Points not strictly better than `reference` in both objectives, weakly
/// dominated points and exact duplicates contribute `0`.
///
/// # Complexity
///
/// O(n log n)
///
/// # Example
///
/// ```
/// use u_moea::truncation::hypervolume_contributions_2d;
///
/// let rows = vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![3.0, 1.0]];
/// let points: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
///
/// let c = hypervolume_contributions_2d(&points, &[4.0, 4.0]);
/// assert_eq!(c, vec![1.0, 1.0, 1.0]);
/// ```
pub fn hypervolume_contributions_2d(points: &[&[f64]], reference: &[f64]) -> Vec<f64> {
    let mut contributions = vec![0.0f64; points.len()];

    let mut order: Vec<usize> = (0..points.len())
        .filter(|&i| points[i][0] < reference[0] && points[i][1] < reference[1])
        .collect();
    order.sort_by(|&a, &b| {
        let by = |k: usize| points[a][k].partial_cmp(&points[b][k]).unwrap_or(Ordering::Equal);
        by(0).then_with(|| by(1))
    });

    // Staircase of the non-dominated points: f0 ascending, f1 strictly
    // descending. `shared` marks steps that have an exact duplicate.
    let mut staircase: Vec<(usize, bool)> = Vec::with_capacity(order.len());
    for i in order {
        if let Some((last, shared)) = staircase.last_mut() {
            let last_point = points[*last];
            if points[i][1] >= last_point[1] {
                if points[i][0] == last_point[0] && points[i][1] == last_point[1] {
                    *shared = true;
                }
                continue;
            }
        }
        staircase.push((i, false));
    }

    for (k, &(i, shared)) in staircase.iter().enumerate() {
        if shared {
            continue;
        }
        let right = staircase.get(k + 1).map_or(reference[0], |&(j, _)| points[j][0]);
        let above = match k {
            0 => reference[1],
            _ => points[staircase[k - 1].0][1],
        };
        contributions[i] = (right - points[i][0]) * (above - points[i][1]);
    }

    contributions
}

/// Truncation by smallest exclusive hypervolume contribution.
///
/// Objectives are min-max normalized against the current members. The
/// reference point sits at `1 + offset / range` per objective (`1 + offset`
/// for a zero-range objective), so boundary members keep a large
/// contribution. The victim is the smallest contributor, the earliest one
/// on ties. Selection is a binary tournament preferring the larger
/// contribution.
///
/// Only two objectives are supported.
///
/// # Example
///
/// ```
/// use u_moea::{ArchiveConfig, BoundedArchive, HypervolumeContribution};
///
/// let config = ArchiveConfig::new(3, 2);
/// let mut archive = BoundedArchive::new(config, HypervolumeContribution::default()).unwrap();
/// for v in [[0.0, 10.0], [4.0, 6.0], [10.0, 0.0], [5.0, 5.0]] {
///     archive.insert(v.to_vec());
/// }
/// assert_eq!(archive.members(), &[vec![0.0, 10.0], vec![10.0, 0.0], vec![5.0, 5.0]]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HypervolumeContribution {
    offset: f64,
}

impl Default for HypervolumeContribution {
    fn default() -> Self {
        Self { offset: 100.0 }
    }
}

impl HypervolumeContribution {
    /// Creates the policy with the default reference offset of `100`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference-point offset, in original objective units.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Exclusive contributions of the members in normalized space.
    pub fn contributions(&self, objectives: &[&[f64]]) -> Vec<f64> {
        let (min, max) = match (ideal_point(objectives), nadir_point(objectives)) {
            (Some(min), Some(max)) => (min, max),
            _ => return Vec::new(),
        };

        let ranges: Vec<f64> = min.iter().zip(&max).map(|(lo, hi)| hi - lo).collect();
        let normalized: Vec<Vec<f64>> = objectives
            .iter()
            .map(|f| {
                f.iter()
                    .zip(&min)
                    .zip(&ranges)
                    .map(|((v, lo), r)| if *r > 0.0 { (v - lo) / r } else { 0.0 })
                    .collect()
            })
            .collect();
        let reference: Vec<f64> = ranges
            .iter()
            .map(|&r| if r > 0.0 { 1.0 + self.offset / r } else { 1.0 + self.offset })
            .collect();

        let views: Vec<&[f64]> = normalized.iter().map(Vec::as_slice).collect();
        hypervolume_contributions_2d(&views, &reference)
    }
}

impl Truncation for HypervolumeContribution {
    fn name(&self) -> &'static str {
        "hypervolume"
    }

    fn validate(&self, num_objectives: usize) -> Result<()> {
        if num_objectives != 2 {
            return Err(ArchiveError::invalid_config(format!(
                "hypervolume truncation supports 2 objectives, got {num_objectives}"
            )));
        }
        if !self.offset.is_finite() || self.offset <= 0.0 {
            return Err(ArchiveError::invalid_config(format!(
                "hypervolume offset must be finite and positive, got {}",
                self.offset
            )));
        }
        Ok(())
    }

    fn victim(&self, objectives: &[&[f64]]) -> usize {
        let contributions = self.contributions(objectives);
        let mut worst = 0;
        for (i, &c) in contributions.iter().enumerate().skip(1) {
            if c < contributions[worst] {
                worst = i;
            }
        }
        worst
    }

    fn select<R: Rng + ?Sized>(&self, objectives: &[&[f64]], rng: &mut R) -> usize {
        let n = objectives.len();
        let first = rng.random_range(0..n);
        let second = rng.random_range(0..n);
        if first == second {
            return first;
        }

        let contributions = self.contributions(objectives);
        if contributions[second] > contributions[first] {
            second
        } else {
            first
        }
    }
}
