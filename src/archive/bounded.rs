//! Fixed-capacity Pareto archive with a pluggable truncation policy.

use super::config::ArchiveConfig;
use super::types::InsertOutcome;
use super::{admit, Admission};
use crate::dominance::EqualityComparator;
use crate::error::{ArchiveError, Result};
use crate::objective::{check_objectives, Solution};
use crate::truncation::{CrowdingDistance, HypervolumeContribution, R2Truncation, Truncation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

/// Bounded archive using crowding-distance truncation.
pub type CrowdingArchive<S> = BoundedArchive<S, CrowdingDistance>;

/// Bounded archive using R2-contribution truncation.
pub type R2Archive<S> = BoundedArchive<S, R2Truncation>;

/// Bounded archive using hypervolume-contribution truncation.
pub type HypervolumeArchive<S> = BoundedArchive<S, HypervolumeContribution>;

/// A fixed-capacity set of mutually non-dominated solutions.
///
/// Members are kept in insertion order, which is the deterministic
/// tie-break for truncation and selection. The archive owns its members
/// and only hands out shared references.
///
/// # Usage
///
/// ```
/// use u_moea::{ArchiveConfig, BoundedArchive, CrowdingDistance};
///
/// let config = ArchiveConfig::new(5, 2).with_seed(42);
/// let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
///
/// assert!(archive.insert(vec![1.0, 1.0]));
/// assert!(!archive.insert(vec![2.0, 2.0])); // dominated
/// assert!(archive.insert(vec![0.5, 3.0]));
/// assert_eq!(archive.size(), 2);
/// ```
#[derive(Debug)]
pub struct BoundedArchive<S, T> {
    config: ArchiveConfig,
    equality: EqualityComparator,
    truncation: T,
    members: Vec<S>,
    rng: StdRng,
}

impl<S: Solution, T: Truncation> BoundedArchive<S, T> {
    /// Creates an empty archive.
    ///
    /// The selection RNG is seeded from `config.seed`, or randomly when
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidConfig`] if the configuration is
    /// invalid or the capacity is below what the truncation policy needs,
    /// and propagates the policy's own validation errors.
    pub fn new(config: ArchiveConfig, truncation: T) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(config, truncation, rng)
    }

    /// Creates an empty archive that draws selections from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(config: ArchiveConfig, truncation: T, rng: StdRng) -> Result<Self> {
        config.validate()?;
        if config.capacity < truncation.min_capacity() {
            return Err(ArchiveError::invalid_config(format!(
                "{} truncation needs capacity of at least {}, got {}",
                truncation.name(),
                truncation.min_capacity(),
                config.capacity
            )));
        }
        truncation.validate(config.num_objectives)?;

        Ok(Self {
            equality: EqualityComparator::with_tolerance(config.tolerance),
            members: Vec::new(),
            config,
            truncation,
            rng,
        })
    }

    /// Attempts to insert a candidate, reporting exactly what happened.
    ///
    /// 1. The candidate is rejected if any member dominates or equals it.
    /// 2. Otherwise every member it dominates is removed and it is appended.
    /// 3. If the archive now exceeds its capacity, the truncation policy
    ///    evicts exactly one member, possibly the candidate itself.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::DimensionMismatch`] or
    /// [`ArchiveError::NonFiniteObjective`] for malformed candidates; the
    /// archive is left unchanged.
    pub fn try_insert(&mut self, candidate: S) -> Result<InsertOutcome> {
        check_objectives(candidate.objectives(), self.config.num_objectives)?;

        let removed = match admit(&mut self.members, candidate, &self.equality) {
            Admission::Dominated => {
                trace!("candidate rejected: dominated by a member");
                return Ok(InsertOutcome::Dominated);
            }
            Admission::Duplicate => {
                trace!("candidate rejected: duplicate of a member");
                return Ok(InsertOutcome::Duplicate);
            }
            Admission::Admitted { removed } => removed,
        };

        if self.members.len() <= self.config.capacity {
            return Ok(InsertOutcome::Accepted {
                removed,
                evicted: false,
            });
        }

        let newest = self.members.len() - 1;
        let victim = self.truncate();
        if victim == newest {
            Ok(InsertOutcome::Truncated)
        } else {
            Ok(InsertOutcome::Accepted {
                removed,
                evicted: true,
            })
        }
    }

    /// Inserts a candidate.
    ///
    /// Returns `true` if the candidate is a member afterwards. Malformed
    /// candidates are logged and rejected rather than reported as errors so
    /// one bad evaluation cannot abort a run; use
    /// [`try_insert`](Self::try_insert) to observe the error.
    pub fn insert(&mut self, candidate: S) -> bool {
        match self.try_insert(candidate) {
            Ok(outcome) => outcome.is_resident(),
            Err(e) => {
                warn!(error = %e, "rejected malformed candidate");
                false
            }
        }
    }

    /// Evicts one member chosen by the truncation policy; returns its index.
    fn truncate(&mut self) -> usize {
        let views: Vec<&[f64]> = self.members.iter().map(|m| m.objectives()).collect();
        let victim = self.truncation.victim(&views);
        debug!(
            policy = self.truncation.name(),
            victim,
            size = self.members.len(),
            "archive over capacity, evicting member"
        );
        self.members.remove(victim);
        victim
    }

    /// Removes and returns the member at `index`, shifting later members.
    pub fn remove(&mut self, index: usize) -> Result<S> {
        if index >= self.members.len() {
            return Err(ArchiveError::IndexOutOfRange {
                index,
                len: self.members.len(),
            });
        }
        Ok(self.members.remove(index))
    }

    /// Returns the member at `index`.
    pub fn get(&self, index: usize) -> Option<&S> {
        self.members.get(index)
    }

    /// Picks a member using the truncation policy's selection rule.
    ///
    /// Returns `None` if the archive is empty.
    pub fn select(&mut self) -> Option<&S> {
        let index = self.select_index()?;
        self.members.get(index)
    }

    /// Index of a member picked by the truncation policy's selection rule.
    pub fn select_index(&mut self) -> Option<usize> {
        if self.members.is_empty() {
            return None;
        }
        let views: Vec<&[f64]> = self.members.iter().map(|m| m.objectives()).collect();
        Some(self.truncation.select(&views, &mut self.rng))
    }

    /// Current number of members.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Current number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if the next accepted insertion may trigger truncation.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.config.capacity
    }

    /// Maximum number of members.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of objectives per member.
    pub fn num_objectives(&self) -> usize {
        self.config.num_objectives
    }

    /// The configuration this archive was built with.
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// The truncation policy.
    pub fn truncation(&self) -> &T {
        &self.truncation
    }

    /// Iterates over members in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.members.iter()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[S] {
        &self.members
    }

    /// Consumes the archive, returning its members.
    pub fn into_members(self) -> Vec<S> {
        self.members
    }

    /// Removes every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

impl<'a, S, T> IntoIterator for &'a BoundedArchive<S, T> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::{compare, Dominance};
    use crate::objective::Candidate;
    use crate::truncation::{ReferenceDirections, TournamentPreference};
    use proptest::prelude::*;

    fn crowding(capacity: usize) -> CrowdingArchive<Vec<f64>> {
        BoundedArchive::new(ArchiveConfig::new(capacity, 2).with_seed(42), CrowdingDistance)
            .unwrap()
    }

    fn r2(capacity: usize) -> R2Archive<Vec<f64>> {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(11).unwrap())
            .with_ideal_point(vec![0.0, 0.0]);
        BoundedArchive::new(ArchiveConfig::new(capacity, 2).with_seed(42), policy).unwrap()
    }

    fn assert_invariants<S: Solution, T: Truncation>(archive: &BoundedArchive<S, T>) {
        let members = archive.members();
        assert!(archive.size() <= archive.capacity());
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                let (a, b) = (members[i].objectives(), members[j].objectives());
                assert_eq!(compare(a, b), Dominance::NonDominated, "{a:?} vs {b:?}");
                assert!(!archive.equality.equal(a, b), "duplicates {a:?} and {b:?}");
            }
        }
    }

    // ---- Construction ----

    #[test]
    fn test_new_is_empty() {
        let archive = crowding(5);
        assert_eq!(archive.size(), 0);
        assert!(archive.is_empty());
        assert_eq!(archive.capacity(), 5);
        assert_eq!(archive.num_objectives(), 2);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(0, 2), CrowdingDistance);
        assert!(matches!(result, Err(ArchiveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_crowding_capacity_one_rejected() {
        let result = BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(1, 2), CrowdingDistance);
        assert!(matches!(result, Err(ArchiveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut archive =
            BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(usize::MAX, 2), CrowdingDistance)
                .unwrap();
        assert_eq!(archive.capacity(), usize::MAX);
        assert!(!archive.is_full());
        assert!(archive.insert(vec![1.0, 2.0]));
        assert!(archive.insert(vec![2.0, 1.0]));
        assert_eq!(archive.size(), 2);
    }

    #[test]
    fn test_r2_non_finite_ideal_point_rejected() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap())
            .with_ideal_point(vec![f64::NAN, f64::NAN]);
        let result = BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(2, 2), policy);
        assert!(matches!(result, Err(ArchiveError::InvalidConfig { .. })));
    }

    #[test]
    fn test_r2_capacity_one_allowed() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap());
        let result = BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(1, 2), policy);
        assert!(result.is_ok());
    }

    #[test]
    fn test_r2_direction_mismatch_rejected() {
        let policy = R2Truncation::new(ReferenceDirections::simplex_lattice(3, 4).unwrap());
        let result = BoundedArchive::<Vec<f64>, _>::new(ArchiveConfig::new(10, 2), policy);
        assert!(matches!(
            result,
            Err(ArchiveError::InvalidReferenceDirections { .. })
        ));
    }

    // ---- Insertion ----

    #[test]
    fn test_domination_rejection() {
        let mut archive = crowding(5);
        assert!(archive.insert(vec![1.0, 1.0]));
        assert!(!archive.insert(vec![2.0, 2.0]));
        assert_eq!(archive.size(), 1);
        assert_eq!(archive.get(0), Some(&vec![1.0, 1.0]));
    }

    #[test]
    fn test_domination_replacement() {
        let mut archive = crowding(5);
        archive.insert(vec![2.0, 2.0]);
        assert!(archive.insert(vec![1.0, 1.0]));
        assert_eq!(archive.members(), &[vec![1.0, 1.0]]);
    }

    #[test]
    fn test_dominant_candidate_clears_archive() {
        let mut archive = crowding(5);
        archive.insert(vec![1.0, 1.0]);
        archive.insert(vec![0.0, 2.0]);
        archive.insert(vec![0.5, 1.5]);
        let outcome = archive.try_insert(vec![0.0, 0.0]).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::Accepted {
                removed: 3,
                evicted: false
            }
        );
        assert_eq!(archive.members(), &[vec![0.0, 0.0]]);
    }

    #[test]
    fn test_non_dominated_coexist() {
        let mut archive = crowding(5);
        assert!(archive.insert(vec![1.0, 2.0]));
        assert!(archive.insert(vec![2.0, 1.0]));
        assert_eq!(archive.size(), 2);
    }

    #[test]
    fn test_duplicate_rejection() {
        let mut archive = crowding(5);
        archive.insert(vec![1.0, 2.0]);
        archive.insert(vec![2.0, 1.0]);
        let outcome = archive.try_insert(vec![2.0, 1.0]).unwrap();
        assert_eq!(outcome, InsertOutcome::Duplicate);
        assert_eq!(archive.size(), 2);
    }

    #[test]
    fn test_duplicate_within_tolerance() {
        let config = ArchiveConfig::new(5, 2).with_tolerance(1e-6);
        let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
        archive.insert(vec![1.0, 2.0]);
        assert!(!archive.insert(vec![1.0 + 1e-8, 2.0 - 1e-8]));
        assert_eq!(archive.size(), 1);
    }

    #[test]
    fn test_repeat_insert_is_idempotent() {
        let mut archive = crowding(5);
        let candidate = vec![0.3, 0.7];
        assert!(archive.insert(candidate.clone()));
        assert!(!archive.insert(candidate));
        assert_eq!(archive.size(), 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut archive = crowding(5);
        let err = archive.try_insert(vec![1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            ArchiveError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert!(!archive.insert(vec![1.0]));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut archive = crowding(5);
        assert!(!archive.insert(vec![f64::NAN, 1.0]));
        assert!(!archive.insert(vec![0.0, f64::NEG_INFINITY]));
        assert!(archive.is_empty());
    }

    #[test]
    fn test_candidate_payload_is_opaque() {
        let config = ArchiveConfig::new(4, 2);
        let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
        archive.insert(Candidate::new("a", vec![1.0, 3.0]));
        archive.insert(Candidate::new("b", vec![1.0, 3.0]));
        archive.insert(Candidate::new("c", vec![3.0, 1.0]));
        let payloads: Vec<&str> = archive.iter().map(|c| c.payload).collect();
        assert_eq!(payloads, vec!["a", "c"]);
    }

    // ---- Crowding truncation ----

    #[test]
    fn test_crowding_boundary_protection() {
        let mut archive = crowding(3);
        archive.insert(vec![0.0, 10.0]);
        archive.insert(vec![5.0, 5.0]);
        archive.insert(vec![10.0, 0.0]);

        for candidate in [vec![2.0, 7.0], vec![7.0, 2.0], vec![4.0, 5.5], vec![1.0, 9.5]] {
            archive.insert(candidate);
            assert_eq!(archive.size(), 3);
            assert!(archive.iter().any(|m| m == &vec![0.0, 10.0]));
            assert!(archive.iter().any(|m| m == &vec![10.0, 0.0]));
        }
    }

    #[test]
    fn test_candidate_truncated_itself() {
        let mut archive = crowding(3);
        archive.insert(vec![0.0, 10.0]);
        archive.insert(vec![5.0, 5.0]);
        archive.insert(vec![10.0, 0.0]);
        // (2,7) has distance 1.0 against 1.5 for (5,5).
        let outcome = archive.try_insert(vec![2.0, 7.0]).unwrap();
        assert_eq!(outcome, InsertOutcome::Truncated);
        assert_eq!(
            archive.members(),
            &[vec![0.0, 10.0], vec![5.0, 5.0], vec![10.0, 0.0]]
        );
    }

    #[test]
    fn test_crowding_evicts_interior_member() {
        let mut archive = crowding(3);
        archive.insert(vec![0.0, 10.0]);
        archive.insert(vec![4.0, 6.0]);
        archive.insert(vec![10.0, 0.0]);
        // (5,5) vs (4,6): sorted neighbours make (4,6) the tighter one.
        let outcome = archive.try_insert(vec![5.0, 5.0]).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::Accepted {
                removed: 0,
                evicted: true
            }
        );
        assert_eq!(
            archive.members(),
            &[vec![0.0, 10.0], vec![10.0, 0.0], vec![5.0, 5.0]]
        );
    }

    #[test]
    fn test_zero_range_dimension_during_truncation() {
        let config = ArchiveConfig::new(3, 3).with_seed(1);
        let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
        archive.insert(vec![0.0, 4.0, 1.0]);
        archive.insert(vec![1.0, 3.0, 1.0]);
        archive.insert(vec![4.0, 0.0, 1.0]);
        assert!(archive.try_insert(vec![3.0, 1.0, 1.0]).is_ok());
        assert_eq!(archive.size(), 3);
        assert_invariants(&archive);
    }

    // ---- R2 truncation ----

    #[test]
    fn test_r2_evicts_least_needed() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap())
            .with_ideal_point(vec![0.0, 0.0]);
        let config = ArchiveConfig::new(2, 2);
        let mut archive = BoundedArchive::new(config, policy).unwrap();
        archive.insert(vec![0.0, 1.0]);
        archive.insert(vec![0.5, 0.5]);
        let outcome = archive.try_insert(vec![1.0, 0.0]).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::Accepted {
                removed: 0,
                evicted: true
            }
        );
        assert_eq!(archive.members(), &[vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_r2_select_least_needed_literal() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap())
            .with_ideal_point(vec![0.0, 0.0]);
        let mut archive = BoundedArchive::new(ArchiveConfig::new(3, 2).with_seed(5), policy).unwrap();
        archive.insert(vec![0.0, 1.0]);
        archive.insert(vec![0.5, 0.5]);
        archive.insert(vec![1.0, 0.0]);

        let views: Vec<&[f64]> = archive.iter().map(|m| m.objectives()).collect();
        assert_eq!(archive.truncation().tournament(&views, 0, 1), 1);
        assert_eq!(archive.truncation().tournament(&views, 2, 1), 1);
        assert_eq!(archive.truncation().tournament(&views, 2, 0), 2);
    }

    #[test]
    fn test_r2_select_most_needed_literal() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(3).unwrap())
            .with_ideal_point(vec![0.0, 0.0])
            .with_preference(TournamentPreference::MostNeeded);
        let mut archive = BoundedArchive::new(ArchiveConfig::new(3, 2), policy).unwrap();
        archive.insert(vec![0.0, 1.0]);
        archive.insert(vec![0.5, 0.5]);
        archive.insert(vec![1.0, 0.0]);

        let views: Vec<&[f64]> = archive.iter().map(|m| m.objectives()).collect();
        assert_eq!(archive.truncation().tournament(&views, 1, 0), 0);
        assert_eq!(archive.truncation().tournament(&views, 1, 2), 2);
    }

    // ---- Hypervolume truncation ----

    #[test]
    fn test_hypervolume_evicts_smallest_contributor() {
        let config = ArchiveConfig::new(3, 2);
        let mut archive: HypervolumeArchive<Vec<f64>> =
            BoundedArchive::new(config, HypervolumeContribution::new()).unwrap();
        archive.insert(vec![0.0, 10.0]);
        archive.insert(vec![4.0, 6.0]);
        archive.insert(vec![10.0, 0.0]);
        let outcome = archive.try_insert(vec![5.0, 5.0]).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::Accepted {
                removed: 0,
                evicted: true
            }
        );
        assert_eq!(
            archive.members(),
            &[vec![0.0, 10.0], vec![10.0, 0.0], vec![5.0, 5.0]]
        );
    }

    #[test]
    fn test_hypervolume_boundary_protection() {
        let config = ArchiveConfig::new(3, 2).with_seed(4);
        let mut archive = BoundedArchive::new(config, HypervolumeContribution::new()).unwrap();
        archive.insert(vec![0.0, 10.0]);
        archive.insert(vec![5.0, 5.0]);
        archive.insert(vec![10.0, 0.0]);
        for candidate in [vec![2.0, 7.0], vec![7.0, 2.0], vec![4.0, 5.5], vec![1.0, 9.5]] {
            archive.insert(candidate);
            assert_eq!(archive.size(), 3);
            assert!(archive.iter().any(|m| m == &vec![0.0, 10.0]));
            assert!(archive.iter().any(|m| m == &vec![10.0, 0.0]));
        }
    }

    #[test]
    fn test_hypervolume_requires_two_objectives() {
        let result = BoundedArchive::<Vec<f64>, _>::new(
            ArchiveConfig::new(5, 3),
            HypervolumeContribution::new(),
        );
        assert!(matches!(result, Err(ArchiveError::InvalidConfig { .. })));
    }

    // ---- Selection, removal, access ----

    #[test]
    fn test_select_empty() {
        let mut archive = crowding(4);
        assert!(archive.select().is_none());
        assert!(archive.select_index().is_none());
    }

    #[test]
    fn test_select_is_seed_deterministic() {
        let fill = |archive: &mut CrowdingArchive<Vec<f64>>| {
            for v in [[0.0, 4.0], [1.0, 3.0], [2.0, 2.5], [3.0, 1.0], [4.0, 0.0]] {
                archive.insert(v.to_vec());
            }
        };
        let mut a = crowding(10);
        let mut b = crowding(10);
        fill(&mut a);
        fill(&mut b);
        let picks_a: Vec<usize> = (0..25).filter_map(|_| a.select_index()).collect();
        let picks_b: Vec<usize> = (0..25).filter_map(|_| b.select_index()).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&i| i < 5));
    }

    #[test]
    fn test_with_rng_injection() {
        let policy = R2Truncation::new(ReferenceDirections::uniform_2d(5).unwrap());
        let mut archive = BoundedArchive::with_rng(
            ArchiveConfig::new(4, 2),
            policy,
            StdRng::seed_from_u64(99),
        )
        .unwrap();
        archive.insert(vec![0.0, 1.0]);
        archive.insert(vec![1.0, 0.0]);
        assert!(archive.select().is_some());
    }

    #[test]
    fn test_remove_shifts_indices() {
        let mut archive = crowding(5);
        archive.insert(vec![0.0, 2.0]);
        archive.insert(vec![1.0, 1.0]);
        archive.insert(vec![2.0, 0.0]);
        assert_eq!(archive.remove(0).unwrap(), vec![0.0, 2.0]);
        assert_eq!(archive.get(0), Some(&vec![1.0, 1.0]));
        assert_eq!(archive.size(), 2);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut archive = crowding(5);
        archive.insert(vec![0.0, 2.0]);
        assert_eq!(
            archive.remove(3).unwrap_err(),
            ArchiveError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn test_iteration_and_into_members() {
        let mut archive = crowding(5);
        archive.insert(vec![0.0, 2.0]);
        archive.insert(vec![2.0, 0.0]);
        let collected: Vec<&Vec<f64>> = (&archive).into_iter().collect();
        assert_eq!(collected.len(), 2);
        assert!(!archive.is_full());
        archive.clear();
        assert!(archive.into_members().is_empty());
    }

    // ---- Properties ----

    fn objective_vectors() -> impl Strategy<Value = Vec<Vec<f64>>> {
        prop::collection::vec(prop::collection::vec(0.0f64..10.0, 2), 1..120)
    }

    fn grid_vectors() -> impl Strategy<Value = Vec<Vec<f64>>> {
        // Coarse values force plenty of ties and exact duplicates.
        prop::collection::vec(
            prop::collection::vec((0u8..6).prop_map(f64::from), 2),
            1..80,
        )
    }

    proptest! {
        #[test]
        fn prop_crowding_invariants_hold(vectors in objective_vectors(), capacity in 2usize..12) {
            let mut archive = crowding(capacity);
            for v in vectors {
                let before = archive.size();
                let _ = archive.insert(v);
                prop_assert!(archive.size() <= before + 1);
                assert_invariants(&archive);
            }
        }

        #[test]
        fn prop_r2_invariants_hold(vectors in objective_vectors(), capacity in 1usize..12) {
            let mut archive = r2(capacity);
            for v in vectors {
                let _ = archive.insert(v);
                assert_invariants(&archive);
            }
        }

        #[test]
        fn prop_hypervolume_invariants_hold(vectors in objective_vectors(), capacity in 1usize..12) {
            let mut archive =
                BoundedArchive::new(ArchiveConfig::new(capacity, 2), HypervolumeContribution::new())
                    .unwrap();
            for v in vectors {
                let _ = archive.insert(v);
                assert_invariants(&archive);
            }
        }

        #[test]
        fn prop_grid_duplicates_never_coexist(vectors in grid_vectors()) {
            let mut archive = crowding(6);
            for v in vectors {
                let accepted = archive.insert(v.clone());
                if accepted {
                    prop_assert!(!archive.insert(v));
                }
                assert_invariants(&archive);
            }
        }

        #[test]
        fn prop_dominated_candidate_never_changes_archive(vectors in objective_vectors(), shift in 0.001f64..5.0) {
            let mut archive = crowding(8);
            for v in vectors {
                archive.insert(v);
            }
            let snapshot = archive.members().to_vec();
            for m in &snapshot {
                let worse: Vec<f64> = m.iter().map(|x| x + shift).collect();
                prop_assert_eq!(archive.try_insert(worse).unwrap(), InsertOutcome::Dominated);
            }
            prop_assert_eq!(archive.members(), snapshot.as_slice());
        }
    }
}
