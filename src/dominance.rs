//! Pareto dominance, objective-space equality and ranking.
//!
//! All objectives are **minimized**: lower values are better.
//!
//! # Algorithms
//!
//! - [`compare`]: Pareto dominance between two objective vectors
//! - [`EqualityComparator`]: exact or epsilon-tolerant duplicate detection
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`pareto_front_indices`]: Indices of the rank-0 front
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Outcome of a Pareto dominance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The first vector dominates the second.
    ADominates,
    /// The second vector dominates the first.
    BDominates,
    /// Neither dominates the other (includes identical vectors).
    NonDominated,
}

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// Identical vectors are [`Dominance::NonDominated`]; equality is a
/// separate relation checked by [`EqualityComparator`].
///
/// # Example
///
/// ```
/// use u_moea::dominance::{compare, Dominance};
///
/// assert_eq!(compare(&[1.0, 1.0], &[2.0, 2.0]), Dominance::ADominates);
/// assert_eq!(compare(&[1.0, 3.0], &[3.0, 1.0]), Dominance::NonDominated);
/// assert_eq!(compare(&[2.0, 2.0], &[2.0, 2.0]), Dominance::NonDominated);
/// ```
pub fn compare(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors differ in length");

    let (a_wins, b_wins) = a
        .iter()
        .zip(b)
        .fold((false, false), |(a_wins, b_wins), (&va, &vb)| {
            (a_wins || va < vb, b_wins || vb < va)
        });

    match (a_wins, b_wins) {
        (true, false) => Dominance::ADominates,
        (false, true) => Dominance::BDominates,
        _ => Dominance::NonDominated,
    }
}

/// Returns `true` if `a` Pareto-dominates `b`.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    compare(a, b) == Dominance::ADominates
}

/// Decides whether two objective vectors represent the same point.
///
/// Two vectors are equal when every pair of corresponding objectives
/// differs by at most `tolerance`. A tolerance of `0.0` means exact match.
///
/// # Example
///
/// ```
/// use u_moea::dominance::EqualityComparator;
///
/// let exact = EqualityComparator::exact();
/// assert!(exact.equal(&[1.0, 2.0], &[1.0, 2.0]));
/// assert!(!exact.equal(&[1.0, 2.0], &[1.0, 2.0 + 1e-12]));
///
/// let loose = EqualityComparator::with_tolerance(1e-6);
/// assert!(loose.equal(&[1.0, 2.0], &[1.0, 2.0 + 1e-12]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EqualityComparator {
    tolerance: f64,
}

impl EqualityComparator {
    /// Exact comparison (zero tolerance).
    pub fn exact() -> Self {
        Self { tolerance: 0.0 }
    }

    /// Comparison within `tolerance` per objective. Negative values are
    /// clamped to zero.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// The configured per-objective tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns `true` if `a` and `b` are the same point.
    pub fn equal(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b.iter())
                .all(|(&va, &vb)| (va - vb).abs() <= self.tolerance)
    }
}

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// Assigns a Pareto rank to each solution based on dominance relationships.
/// An empty input yields empty ranks and no fronts.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moea::dominance::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult {
            ranks: Vec::new(),
            fronts: Vec::new(),
        };
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match compare(&objectives[i], &objectives[j]) {
                Dominance::ADominates => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::BDominates => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::NonDominated => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Indices of the non-dominated solutions, in input order.
///
/// Identical vectors are all kept; deduplicate with an archive if needed.
pub fn pareto_front_indices(objectives: &[Vec<f64>]) -> Vec<usize> {
    (0..objectives.len())
        .filter(|&i| {
            !objectives
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && dominates(other, &objectives[i]))
        })
        .collect()
}
