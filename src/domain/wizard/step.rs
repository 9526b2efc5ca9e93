//! Dialogue steps of the setup wizard.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Position of an operator in the wizard.
///
/// The flow is linear apart from the device branch after the cloak-type
/// choice. Every step may restart at `AwaitingCloakType` (the start command
/// or the "New Project" button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Init,
    AwaitingCloakType,
    AwaitingDevices,
    AwaitingEmail,
    AwaitingApiKey,
    AwaitingZoneId,
    AwaitingAccountId,
    AwaitingTargetLink,
    AwaitingGeo,
}

impl WizardStep {
    /// Steps at which the "New Project" button restarts the flow.
    pub fn accepts_new_project(&self) -> bool {
        matches!(
            self,
            WizardStep::AwaitingEmail
                | WizardStep::AwaitingApiKey
                | WizardStep::AwaitingZoneId
                | WizardStep::AwaitingAccountId
                | WizardStep::AwaitingTargetLink
                | WizardStep::AwaitingGeo
        )
    }
}

impl StateMachine for WizardStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WizardStep::*;
        match self {
            Init => vec![AwaitingCloakType],
            AwaitingCloakType => vec![AwaitingDevices, AwaitingEmail, AwaitingCloakType],
            AwaitingDevices => vec![AwaitingEmail, AwaitingCloakType],
            AwaitingEmail => vec![AwaitingApiKey, AwaitingCloakType],
            AwaitingApiKey => vec![AwaitingZoneId, AwaitingCloakType],
            AwaitingZoneId => vec![AwaitingAccountId, AwaitingCloakType],
            AwaitingAccountId => vec![AwaitingTargetLink, AwaitingCloakType],
            AwaitingTargetLink => vec![AwaitingGeo, AwaitingCloakType],
            // Deployment ends the run; the session is then reset to Init.
            AwaitingGeo => vec![Init, AwaitingCloakType],
        }
    }
}
