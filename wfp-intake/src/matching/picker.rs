//! Deterministic candidate picker
//!
//! When a rule ends up with several plausible contacts, the picker selects
//! exactly one under the configured policy. The same candidate set always
//! yields the same choice; any ties under a policy fall back to lowest id.

use crate::models::ContactId;
use crate::store::ContactCandidate;

/// Selection policy for ambiguous candidate sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickPolicy {
    /// Oldest record wins
    #[default]
    LowestId,
    /// Newest record wins
    HighestId,
    /// Most recently touched record wins
    MostRecentlyModified,
    /// Record with the most populated identity fields wins
    MostComplete,
}

impl PickPolicy {
    /// Parse a configuration value; `None` for unrecognized policies
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lowest_id" => Some(Self::LowestId),
            "highest_id" => Some(Self::HighestId),
            "most_recently_modified" => Some(Self::MostRecentlyModified),
            "most_complete" => Some(Self::MostComplete),
            _ => None,
        }
    }
}

/// Picks one contact out of an ambiguous candidate set
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactPicker {
    policy: PickPolicy,
}

impl ContactPicker {
    pub fn new(policy: PickPolicy) -> Self {
        Self { policy }
    }

    /// Choose a candidate. Returns `None` only for an empty set.
    pub fn pick(&self, candidates: &[ContactCandidate]) -> Option<ContactId> {
        let picked = match self.policy {
            PickPolicy::LowestId => candidates.iter().min_by_key(|c| c.id),
            PickPolicy::HighestId => candidates.iter().max_by_key(|c| c.id),
            PickPolicy::MostRecentlyModified => candidates
                .iter()
                .max_by(|a, b| a.modified_at.cmp(&b.modified_at).then(b.id.cmp(&a.id))),
            PickPolicy::MostComplete => candidates
                .iter()
                .max_by(|a, b| a.completeness().cmp(&b.completeness()).then(b.id.cmp(&a.id))),
        };
        picked.map(|c| c.id)
    }
}
