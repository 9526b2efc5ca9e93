//! Setup wizard - the dialogue that collects a worker deployment.
//!
//! The wizard is a finite-state machine over [`WizardStep`]. Each operator
//! message is classified by the pure functions in [`input`] and applied to a
//! [`Session`], which either replies with the next prompt or hands back a
//! complete [`DeploymentConfig`].

pub mod input;
mod replies;
mod session;
mod step;
mod values;

pub use replies::{Keyboard, Reply};
pub use session::{Advance, DeploymentConfig, Draft, Session, Targeting};
pub use step::WizardStep;
pub use values::{CloakType, Device, DeviceSet};
