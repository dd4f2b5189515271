//! Pareto archives.
//!
//! An archive keeps a mutually non-dominated, duplicate-free set of
//! solutions. Every archive type shares one insertion scan; bounded
//! archives add a [`Truncation`](crate::truncation::Truncation) policy that
//! evicts exactly one member on overflow.
//!
//! # Key Types
//!
//! - [`ArchiveConfig`]: Capacity, objective count, duplicate tolerance, seed
//! - [`BoundedArchive`]: Fixed-capacity archive with pluggable truncation
//! - [`NonDominatedArchive`]: Unbounded archive without truncation
//! - [`SharedArchive`]: Mutex-serialized handle for multi-threaded producers
//! - [`InsertOutcome`]: Detailed result of an insertion attempt
//!
//! # Invariants
//!
//! After every public operation:
//!
//! 1. No member dominates another.
//! 2. No two members are equal under the configured tolerance.
//! 3. A bounded archive never holds more than `capacity` members.

mod bounded;
mod config;
mod shared;
mod types;
mod unbounded;

pub use bounded::{BoundedArchive, CrowdingArchive, HypervolumeArchive, R2Archive};
pub use config::ArchiveConfig;
pub use shared::SharedArchive;
pub use types::InsertOutcome;
pub use unbounded::NonDominatedArchive;

use crate::dominance::{compare, Dominance, EqualityComparator};
use crate::objective::Solution;

/// Result of the shared insertion scan.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// The candidate was appended after removing `removed` members.
    Admitted { removed: usize },
    Dominated,
    Duplicate,
}

/// Runs the insertion scan and, unless the candidate is rejected, removes
/// every member it dominates and appends it.
///
/// Rejection leaves `members` untouched: dominated members are only removed
/// once the whole list has been checked.
pub(crate) fn admit<S: Solution>(
    members: &mut Vec<S>,
    candidate: S,
    equality: &EqualityComparator,
) -> Admission {
    let objectives = candidate.objectives();
    let mut doomed = vec![false; members.len()];
    let mut removed = 0;

    for (i, member) in members.iter().enumerate() {
        match compare(objectives, member.objectives()) {
            Dominance::BDominates => return Admission::Dominated,
            Dominance::ADominates => {
                doomed[i] = true;
                removed += 1;
            }
            Dominance::NonDominated => {
                if equality.equal(objectives, member.objectives()) {
                    return Admission::Duplicate;
                }
            }
        }
    }

    if removed > 0 {
        let mut i = 0;
        members.retain(|_| {
            let keep = !doomed[i];
            i += 1;
            keep
        });
    }
    members.push(candidate);

    Admission::Admitted { removed }
}
