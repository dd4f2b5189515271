//! Insertion outcomes.

/// What happened to a candidate passed to an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertOutcome {
    /// The candidate is now a member.
    Accepted {
        /// Members removed because the candidate dominates them.
        removed: usize,
        /// Whether another member was evicted by truncation.
        evicted: bool,
    },

    /// The candidate was admitted, then chosen as the truncation victim
    /// itself. Membership is unchanged. Truncation only runs when no member
    /// was dominated, so nothing else was removed.
    Truncated,

    /// A member dominates the candidate. Nothing changed.
    Dominated,

    /// A member equals the candidate. Nothing changed.
    Duplicate,
}

impl InsertOutcome {
    /// Returns `true` if the candidate is a member after the call.
    pub fn is_resident(&self) -> bool {
        matches!(self, InsertOutcome::Accepted { .. })
    }

    /// Returns `true` if the archive rejected the candidate outright.
    pub fn is_rejected(&self) -> bool {
        matches!(self, InsertOutcome::Dominated | InsertOutcome::Duplicate)
    }
}
