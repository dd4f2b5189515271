//! R2-indicator truncation.
//!
//! The R2 indicator of a set `S` with respect to weight vectors `W`, a
//! scalarizing function `g` and an ideal point `z*` is
//!
//! ```text
//! R2(S) = (1/|W|) * sum_{w in W} min_{s in S} g(s, w, z*)
//! ```
//!
//! Lower is better. A member's necessity is measured by `R2(S \ {s})`: the
//! smaller that value, the less the set loses when the member is dropped.

use super::Truncation;
use crate::error::{ArchiveError, Result};
use rand::Rng;

/// A fixed set of weight (reference) directions.
///
/// # Example
///
/// ```
/// use u_moea::truncation::ReferenceDirections;
///
/// let w = ReferenceDirections::uniform_2d(3).unwrap();
/// assert_eq!(w.rows(), &[vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]]);
///
/// let lattice = ReferenceDirections::simplex_lattice(3, 2).unwrap();
/// assert_eq!(lattice.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceDirections {
    weights: Vec<Vec<f64>>,
}

impl ReferenceDirections {
    /// Builds directions from explicit rows.
    ///
    /// Rows must be non-empty, share one length, and hold finite
    /// non-negative values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = match rows.first() {
            Some(first) => first.len(),
            None => return Err(ArchiveError::invalid_directions("no weight vectors")),
        };
        if dim == 0 {
            return Err(ArchiveError::invalid_directions("weight vectors are empty"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(ArchiveError::invalid_directions(format!(
                    "row {i} has {} values, expected {dim}",
                    row.len()
                )));
            }
            if row.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(ArchiveError::invalid_directions(format!(
                    "row {i} contains a negative or non-finite weight"
                )));
            }
        }
        Ok(Self { weights: rows })
    }

    /// `n` evenly spaced bi-objective weights `[a, 1 - a]` with
    /// `a = i / (n - 1)`.
    pub fn uniform_2d(n: usize) -> Result<Self> {
        if n < 2 {
            return Err(ArchiveError::invalid_directions(
                "uniform_2d needs at least 2 vectors",
            ));
        }
        let weights = (0..n)
            .map(|i| {
                let a = i as f64 / (n - 1) as f64;
                vec![a, 1.0 - a]
            })
            .collect();
        Ok(Self { weights })
    }

    /// Das–Dennis simplex lattice: every weight vector of `m` components in
    /// steps of `1 / divisions` that sums to one.
    ///
    /// Produces `C(divisions + m - 1, m - 1)` vectors.
    pub fn simplex_lattice(m: usize, divisions: usize) -> Result<Self> {
        if m == 0 {
            return Err(ArchiveError::invalid_directions(
                "simplex lattice needs at least one objective",
            ));
        }
        if divisions == 0 {
            return Err(ArchiveError::invalid_directions(
                "simplex lattice needs at least one division",
            ));
        }

        let mut weights = Vec::new();
        let mut current = Vec::with_capacity(m);
        lattice_points(m, divisions, divisions, &mut current, &mut weights);
        Ok(Self { weights })
    }

    /// Number of weight vectors.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false` for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of components per weight vector.
    pub fn num_objectives(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    /// Weight vectors as rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.weights
    }
}

fn lattice_points(
    m: usize,
    divisions: usize,
    remaining: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<f64>>,
) {
    if current.len() == m - 1 {
        current.push(remaining);
        out.push(
            current
                .iter()
                .map(|&k| k as f64 / divisions as f64)
                .collect(),
        );
        current.pop();
        return;
    }
    for k in 0..=remaining {
        current.push(k);
        lattice_points(m, divisions, remaining - k, current, out);
        current.pop();
    }
}

/// Scalarizing function `g(f, w, z*)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalarizing {
    /// Weighted Tchebycheff: `max_j w_j * |f_j - z_j|`.
    #[default]
    Tchebycheff,
    /// Weighted sum: `sum_j w_j * (f_j - z_j)`.
    WeightedSum,
}

impl Scalarizing {
    /// Evaluates `g(f, w, z)`.
    pub fn apply(&self, f: &[f64], w: &[f64], z: &[f64]) -> f64 {
        let terms = f.iter().zip(w).zip(z);
        match self {
            Scalarizing::Tchebycheff => terms
                .map(|((&fj, &wj), &zj)| wj * (fj - zj).abs())
                .fold(0.0, f64::max),
            Scalarizing::WeightedSum => terms.map(|((&fj, &wj), &zj)| wj * (fj - zj)).sum(),
        }
    }
}

/// The R2 quality indicator.
///
/// When no ideal point is configured, the component-wise minimum of the
/// evaluated set is used. With normalization enabled, objectives (and the
/// configured ideal point) are min-max scaled against the evaluated set
/// before scalarizing; zero-range objectives scale to `0`.
///
/// # Example
///
/// ```
/// use u_moea::truncation::{R2Indicator, ReferenceDirections};
///
/// let r2 = R2Indicator::new(ReferenceDirections::uniform_2d(3).unwrap())
///     .with_ideal_point(vec![0.0, 0.0]);
///
/// let rows = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
/// let set: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
///
/// assert!((r2.value(&set) - 0.25 / 3.0).abs() < 1e-12);
/// assert!((r2.value_without(&set, 1) - 0.5 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct R2Indicator {
    directions: ReferenceDirections,
    scalarizing: Scalarizing,
    ideal_point: Option<Vec<f64>>,
    normalize: bool,
}

impl R2Indicator {
    /// Creates an indicator with Tchebycheff scalarizing, no fixed ideal
    /// point and no normalization.
    pub fn new(directions: ReferenceDirections) -> Self {
        Self {
            directions,
            scalarizing: Scalarizing::default(),
            ideal_point: None,
            normalize: false,
        }
    }

    /// Fixes the ideal point `z*`.
    pub fn with_ideal_point(mut self, ideal: Vec<f64>) -> Self {
        self.ideal_point = Some(ideal);
        self
    }

    /// Sets the scalarizing function.
    pub fn with_scalarizing(mut self, scalarizing: Scalarizing) -> Self {
        self.scalarizing = scalarizing;
        self
    }

    /// Enables or disables min-max normalization against the evaluated set.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// The weight vectors.
    pub fn directions(&self) -> &ReferenceDirections {
        &self.directions
    }

    /// The configured ideal point, if any.
    pub fn ideal_point(&self) -> Option<&[f64]> {
        self.ideal_point.as_deref()
    }

    /// Checks that directions and ideal point match `num_objectives` and
    /// that the ideal point is finite.
    pub fn validate(&self, num_objectives: usize) -> Result<()> {
        if self.directions.num_objectives() != num_objectives {
            return Err(ArchiveError::invalid_directions(format!(
                "weight vectors have {} components, archive has {num_objectives} objectives",
                self.directions.num_objectives()
            )));
        }
        if let Some(ideal) = &self.ideal_point {
            if ideal.len() != num_objectives {
                return Err(ArchiveError::DimensionMismatch {
                    expected: num_objectives,
                    actual: ideal.len(),
                });
            }
            if let Some(z) = ideal.iter().find(|z| !z.is_finite()) {
                return Err(ArchiveError::invalid_config(format!(
                    "ideal point must be finite, got {z}"
                )));
            }
        }
        Ok(())
    }

    /// R2 value of the set. An empty set scores `+inf`.
    pub fn value(&self, objectives: &[&[f64]]) -> f64 {
        if objectives.is_empty() {
            return f64::INFINITY;
        }
        let utilities = self.utilities(objectives);
        let total: f64 = (0..self.directions.len())
            .map(|w| {
                utilities
                    .iter()
                    .map(|row| row[w])
                    .fold(f64::INFINITY, f64::min)
            })
            .sum();
        total / self.directions.len() as f64
    }

    /// R2 value of the set with member `index` left out.
    ///
    /// Scalarization still uses the full set for the implicit ideal point
    /// and normalization bounds, so values for different `index` are
    /// directly comparable.
    pub fn value_without(&self, objectives: &[&[f64]], index: usize) -> f64 {
        self.values_without(objectives)
            .get(index)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// `R2(S \ {i})` for every member `i`, computed in one pass.
    pub fn values_without(&self, objectives: &[&[f64]]) -> Vec<f64> {
        let n = objectives.len();
        if n == 0 {
            return Vec::new();
        }
        let utilities = self.utilities(objectives);
        let num_weights = self.directions.len();

        let mut sums = vec![0.0f64; n];
        for w in 0..num_weights {
            // Best and second-best utility for this weight vector.
            let mut best = (f64::INFINITY, usize::MAX);
            let mut second = f64::INFINITY;
            for (i, row) in utilities.iter().enumerate() {
                let u = row[w];
                if u < best.0 {
                    second = best.0;
                    best = (u, i);
                } else if u < second {
                    second = u;
                }
            }
            for (i, sum) in sums.iter_mut().enumerate() {
                *sum += if i == best.1 { second } else { best.0 };
            }
        }

        sums.into_iter().map(|s| s / num_weights as f64).collect()
    }

    /// Loss in indicator quality when each member is dropped:
    /// `R2(S \ {i}) - R2(S)`. Always non-negative.
    pub fn contributions(&self, objectives: &[&[f64]]) -> Vec<f64> {
        let full = self.value(objectives);
        self.values_without(objectives)
            .into_iter()
            .map(|v| v - full)
            .collect()
    }

    /// Utility matrix: one row per member, one column per weight vector.
    fn utilities(&self, objectives: &[&[f64]]) -> Vec<Vec<f64>> {
        let (points, ideal) = self.prepare(objectives);
        let row = |f: &Vec<f64>| -> Vec<f64> {
            self.directions
                .rows()
                .iter()
                .map(|w| self.scalarizing.apply(f, w, &ideal))
                .collect()
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = {
            use rayon::prelude::*;
            points.par_iter().map(row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = points.iter().map(row).collect();

        rows
    }

    /// Returns the (possibly normalized) points and the ideal point in the
    /// same space.
    fn prepare(&self, objectives: &[&[f64]]) -> (Vec<Vec<f64>>, Vec<f64>) {
        let m = objectives.first().map_or(0, |f| f.len());
        let min = crate::objective::ideal_point(objectives).unwrap_or_else(|| vec![0.0; m]);

        if !self.normalize {
            let points = objectives.iter().map(|f| f.to_vec()).collect();
            let ideal = self.ideal_point.clone().unwrap_or(min);
            return (points, ideal);
        }

        let max = crate::objective::nadir_point(objectives).unwrap_or_else(|| vec![0.0; m]);
        let scale = |f: &[f64]| -> Vec<f64> {
            f.iter()
                .enumerate()
                .map(|(j, &v)| {
                    let range = max[j] - min[j];
                    if range > 0.0 {
                        (v - min[j]) / range
                    } else {
                        0.0
                    }
                })
                .collect()
        };
        let points = objectives.iter().map(|f| scale(*f)).collect();
        let ideal = match &self.ideal_point {
            Some(z) => scale(z.as_slice()),
            None => vec![0.0; m],
        };
        (points, ideal)
    }
}

/// Which tournament entrant [`R2Truncation`] returns from `select`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TournamentPreference {
    /// Return the entrant whose removal costs the indicator least, i.e. the
    /// smaller `R2(S \ {i})`. Biases parent choice toward members the front
    /// could spare, which favors exploration.
    #[default]
    LeastNeeded,
    /// Return the entrant whose removal costs the indicator most, i.e. the
    /// larger `R2(S \ {i})`.
    MostNeeded,
}

/// Truncation by R2 contribution.
///
/// The victim is the member `i` with the smallest `R2(S \ {i})`: removing it
/// leaves the best remaining indicator value. Ties go to the earliest index.
///
/// # Example
///
/// ```
/// use u_moea::truncation::{R2Truncation, ReferenceDirections, Truncation};
///
/// let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap())
///     .with_ideal_point(vec![0.0, 0.0]);
///
/// let rows = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
/// let set: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
/// assert_eq!(policy.victim(&set), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct R2Truncation {
    indicator: R2Indicator,
    preference: TournamentPreference,
}

impl R2Truncation {
    /// Creates the policy with default indicator settings and
    /// [`TournamentPreference::LeastNeeded`].
    pub fn new(directions: ReferenceDirections) -> Self {
        Self::from_indicator(R2Indicator::new(directions))
    }

    /// Wraps a configured indicator.
    pub fn from_indicator(indicator: R2Indicator) -> Self {
        Self {
            indicator,
            preference: TournamentPreference::default(),
        }
    }

    /// Fixes the ideal point `z*`.
    pub fn with_ideal_point(mut self, ideal: Vec<f64>) -> Self {
        self.indicator = self.indicator.with_ideal_point(ideal);
        self
    }

    /// Sets the scalarizing function.
    pub fn with_scalarizing(mut self, scalarizing: Scalarizing) -> Self {
        self.indicator = self.indicator.with_scalarizing(scalarizing);
        self
    }

    /// Enables or disables normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.indicator = self.indicator.with_normalization(normalize);
        self
    }

    /// Sets the tournament preference.
    pub fn with_preference(mut self, preference: TournamentPreference) -> Self {
        self.preference = preference;
        self
    }

    /// The underlying indicator.
    pub fn indicator(&self) -> &R2Indicator {
        &self.indicator
    }

    /// The tournament preference.
    pub fn preference(&self) -> TournamentPreference {
        self.preference
    }

    /// Decides a two-entrant tournament. `first` wins ties.
    pub fn tournament(&self, objectives: &[&[f64]], first: usize, second: usize) -> usize {
        if first == second {
            return first;
        }
        let without = self.indicator.values_without(objectives);
        self.pick(&without, first, second)
    }

    fn pick(&self, without: &[f64], first: usize, second: usize) -> usize {
        let second_wins = match self.preference {
            TournamentPreference::LeastNeeded => without[second] < without[first],
            TournamentPreference::MostNeeded => without[second] > without[first],
        };
        if second_wins {
            second
        } else {
            first
        }
    }
}

impl Truncation for R2Truncation {
    fn name(&self) -> &'static str {
        "r2"
    }

    fn validate(&self, num_objectives: usize) -> Result<()> {
        self.indicator.validate(num_objectives)
    }

    fn victim(&self, objectives: &[&[f64]]) -> usize {
        let without = self.indicator.values_without(objectives);
        let mut worst = 0;
        for (i, &v) in without.iter().enumerate().skip(1) {
            if v < without[worst] {
                worst = i;
            }
        }
        worst
    }

    fn select<R: Rng + ?Sized>(&self, objectives: &[&[f64]], rng: &mut R) -> usize {
        let n = objectives.len();
        let first = rng.random_range(0..n);
        let second = rng.random_range(0..n);
        self.tournament(objectives, first, second)
    }
}
