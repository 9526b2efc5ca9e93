//! Domain layer containing the wizard logic and worker artifacts.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, errors, state machine trait)
//! - `wizard` - Dialogue steps, input classification and per-operator session
//! - `worker` - Routing rule, script rendering and deployment result

pub mod foundation;
pub mod wizard;
pub mod worker;
