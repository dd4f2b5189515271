//! Bounded Pareto archives for multi-objective optimizers.
//!
//! An archive keeps a set of mutually non-dominated objective vectors
//! (minimization) and, when full, evicts one member chosen by a pluggable
//! truncation policy:
//!
//! - **Crowding distance**: NSGA-II style spread preservation. Boundary
//!   members are never evicted.
//! - **R2 contribution**: drops the member whose removal degrades the R2
//!   indicator over a set of weight directions the least.
//! - **Hypervolume contribution**: drops the member with the smallest
//!   exclusive hypervolume (two objectives).
//!
//! The same policies drive parent selection from the archive through a
//! binary tournament.
//!
//! # Quick Start
//!
//! ```
//! use u_moea::{ArchiveConfig, BoundedArchive, Candidate, CrowdingDistance, Solution};
//!
//! let config = ArchiveConfig::new(3, 2).with_seed(7);
//! let mut archive = BoundedArchive::new(config, CrowdingDistance).unwrap();
//!
//! for (name, f) in [("a", [0.0, 10.0]), ("b", [5.0, 5.0]), ("c", [10.0, 0.0]), ("d", [2.0, 7.0])] {
//!     archive.insert(Candidate::new(name, f.to_vec()));
//! }
//!
//! assert_eq!(archive.size(), 3);
//! let names: Vec<&str> = archive.iter().map(|c| c.payload).collect();
//! assert!(names.contains(&"a") && names.contains(&"c"));
//! assert!(archive.select().is_some());
//! ```
//!
//! # Modules
//!
//! - [`archive`]: Bounded, unbounded and shared archives
//! - [`truncation`]: Crowding-distance, R2 and hypervolume truncation policies
//! - [`dominance`]: Pareto comparison, epsilon equality, non-dominated sorting
//! - [`objective`]: The [`Solution`] trait and objective-vector helpers
//! - [`error`]: Error types
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configuration and value types
//! - `parallel`: rayon-parallel R2 utility evaluation

pub mod archive;
pub mod dominance;
pub mod error;
pub mod objective;
pub mod truncation;

pub use archive::{
    ArchiveConfig, BoundedArchive, CrowdingArchive, HypervolumeArchive, InsertOutcome,
    NonDominatedArchive, R2Archive, SharedArchive,
};
pub use error::{ArchiveError, Result};
pub use objective::{Candidate, ObjectiveVector, Solution};
pub use truncation::{CrowdingDistance, HypervolumeContribution, R2Truncation, Truncation};
