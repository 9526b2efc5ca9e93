//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, error types and the state machine trait
//! that the wizard and deployment modules build on.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::OperatorId;
pub use state_machine::StateMachine;
