//! Truncation policies for bounded archives.
//!
//! When an insertion pushes an archive one member past its capacity, the
//! archive asks its [`Truncation`] policy for exactly one victim. The same
//! policy also drives parent selection from the archive.
//!
//! # Policies
//!
//! - [`CrowdingDistance`]: NSGA-II crowding distance; evicts the most crowded
//!   member, never a boundary one
//! - [`R2Truncation`]: R2-indicator contribution; evicts the member whose
//!   removal degrades the indicator least
//! - [`HypervolumeContribution`]: exclusive hypervolume contribution
//!   (two objectives); evicts the smallest contributor
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Brockhoff, Wagner & Trautmann (2012), "On the Properties of the R2
//!   Indicator"
//! - Knowles & Corne (2003), "Properties of an Adaptive Archiving Algorithm
//!   for Storing Nondominated Vectors"

mod crowding;
mod hypervolume;
mod r2;

pub use crowding::{crowding_distance, CrowdingDistance};
pub use hypervolume::{hypervolume_contributions_2d, HypervolumeContribution};
pub use r2::{R2Indicator, R2Truncation, ReferenceDirections, Scalarizing, TournamentPreference};

use crate::error::Result;
use rand::Rng;

/// Strategy that picks eviction victims and selection winners.
///
/// Both methods receive the objective vectors of the current members in
/// archive (insertion) order and return an index into that slice. The slice
/// is never empty.
pub trait Truncation {
    /// Short policy name used in log events.
    fn name(&self) -> &'static str;

    /// Smallest archive capacity this policy can operate on.
    fn min_capacity(&self) -> usize {
        1
    }

    /// Checks policy parameters against the archive's objective count.
    fn validate(&self, _num_objectives: usize) -> Result<()> {
        Ok(())
    }

    /// Index of the member to evict. Ties go to the earliest index.
    fn victim(&self, objectives: &[&[f64]]) -> usize;

    /// Index of a member chosen for external use (e.g. as a parent).
    fn select<R: Rng + ?Sized>(&self, objectives: &[&[f64]], rng: &mut R) -> usize;
}
