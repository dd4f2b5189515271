//! Crowding-distance truncation (NSGA-II).

use super::Truncation;
use rand::Rng;
use std::cmp::Ordering;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution, measuring how
/// spread out the solutions are in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Order solutions by objective value (ties keep input order)
/// 2. Assign infinity to the first and last sorted solution
/// 3. If the objective has zero range, skip it
/// 4. Otherwise add `(next - prev) / range` to each interior solution
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moea::truncation::crowding_distance;
///
/// let rows = vec![vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]];
/// let objectives: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
///
/// let distances = crowding_distance(&objectives);
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance(objectives: &[&[f64]]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0f64; n];
    let mut order: Vec<usize> = (0..n).collect();

    for k in 0..objectives[0].len() {
        let value = |i: usize| objectives[i][k];

        // Index tiebreak keeps equal values in input order.
        order.sort_unstable_by(|&a, &b| {
            value(a)
                .partial_cmp(&value(b))
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });

        let (lowest, highest) = (order[0], order[n - 1]);
        distances[lowest] = f64::INFINITY;
        distances[highest] = f64::INFINITY;

        let range = value(highest) - value(lowest);
        if range <= 0.0 {
            continue;
        }
        for window in order.windows(3) {
            distances[window[1]] += (value(window[2]) - value(window[0])) / range;
        }
    }

    distances
}

/// Truncation by minimum crowding distance.
///
/// The victim is the member with the strictly smallest crowding distance,
/// the earliest one on ties. Boundary members of every objective carry an
/// infinite distance and are therefore only evicted when every member is a
/// boundary member.
///
/// Selection is a binary tournament preferring the larger crowding distance.
///
/// # Example
///
/// ```
/// use u_moea::{ArchiveConfig, BoundedArchive, CrowdingDistance};
///
/// let config = ArchiveConfig::new(3, 2);
/// let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
/// for v in [[0.0, 10.0], [5.0, 5.0], [10.0, 0.0], [2.0, 7.0]] {
///     archive.insert(v.to_vec());
/// }
/// assert_eq!(archive.len(), 3);
/// assert!(archive.iter().any(|m| m == &vec![0.0, 10.0]));
/// assert!(archive.iter().any(|m| m == &vec![10.0, 0.0]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrowdingDistance;

impl Truncation for CrowdingDistance {
    fn name(&self) -> &'static str {
        "crowding-distance"
    }

    fn min_capacity(&self) -> usize {
        2
    }

    fn victim(&self, objectives: &[&[f64]]) -> usize {
        let distances = crowding_distance(objectives);
        let mut worst = 0;
        for (i, &d) in distances.iter().enumerate().skip(1) {
            if d < distances[worst] {
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

        let distances = crowding_distance(objectives);
        if distances[second] > distances[first] {
            second
        } else {
            first
        }
    }
}
