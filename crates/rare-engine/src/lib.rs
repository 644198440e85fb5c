//! # rare-engine
//!
//! The deterministic core of a RareAgent investigation:
//! - [`Orchestrator`]: the cyclic state machine that routes a session through
//!   exploration, proposal, critique, validation and the rejection feedback loop
//! - [`DeterministicValidator`]: the lookup-only gate that alone decides acceptance
//! - [`ExclusionMemory`]: the session's append-only set of rejected pairs
//! - [`StepPolicy`]: per-step timeout and bounded retry with backoff
//! - [`TrailWriter`]: per-session JSONL audit trail
//! - [`CancelHandle`]: cooperative session cancellation
//!
//! Every session ends in exactly one [`rare_core::result::SessionResult`];
//! step failures never escape as errors.

pub mod cancel;
pub mod exclusion;
pub mod orchestrator;
pub mod retry;
pub mod state;
pub mod trail;
pub mod validator;

mod error;

pub use cancel::CancelHandle;
pub use error::EngineError;
pub use exclusion::ExclusionMemory;
pub use orchestrator::Orchestrator;
pub use retry::StepPolicy;
pub use state::SessionState;
pub use trail::{TrailWriter, read_trail};
pub use validator::DeterministicValidator;
