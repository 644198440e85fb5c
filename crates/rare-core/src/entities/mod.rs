//! Entity structs for the investigation data model.
//!
//! Every entity is an immutable value once constructed: revisions produce new
//! values that point at their predecessor by id. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for the audit trail and the
//! presentation feed.

mod critique;
mod disease;
mod exclusion;
mod history;
mod hypothesis;
mod target;
mod verification;

pub use critique::Critique;
pub use disease::DiseaseQuery;
pub use exclusion::{ExclusionEntry, PairKey};
pub use history::HistoryEntry;
pub use hypothesis::Hypothesis;
pub use target::TargetCandidate;
pub use verification::{
    CompoundId, REASON_COMPOUND_UNRESOLVED, REASON_NO_INTERACTION_EVIDENCE,
    REASON_TARGET_UNRESOLVED, TargetId, VerificationRecord,
};
