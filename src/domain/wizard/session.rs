//! Per-operator wizard session and its transition logic.

use secrecy::SecretString;
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

use super::input::{classify_cloak_type, classify_devices, is_new_project, is_start_command};
use super::replies::Reply;
use super::step::WizardStep;
use super::values::{CloakType, DeviceSet};

/// Fields collected so far. Populated monotonically as the step advances.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub cloak_type: Option<CloakType>,
    pub devices: Option<DeviceSet>,
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub zone_id: Option<String>,
    pub account_id: Option<String>,
    pub target_link: Option<String>,
    pub geo: Option<String>,
}

impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("cloak_type", &self.cloak_type)
            .field("devices", &self.devices)
            .field("email", &self.email)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("zone_id", &self.zone_id)
            .field("account_id", &self.account_id)
            .field("target_link", &self.target_link)
            .field("geo", &self.geo)
            .finish()
    }
}

impl Draft {
    /// Builds the deployment record, failing on the first missing field.
    pub fn complete(&self) -> Result<DeploymentConfig, ValidationError> {
        let cloak_type = self
            .cloak_type
            .ok_or_else(|| ValidationError::empty_field("cloak_type"))?;

        let targeting = match cloak_type {
            CloakType::DeviceGeo => {
                let devices = self
                    .devices
                    .clone()
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| ValidationError::empty_field("devices"))?;
                Targeting::DeviceGeo { devices }
            }
            CloakType::GeoOnly => Targeting::GeoOnly,
        };

        Ok(DeploymentConfig {
            targeting,
            email: required(&self.email, "email")?,
            api_key: SecretString::new(required(&self.api_key, "api_key")?),
            zone_id: required(&self.zone_id, "zone_id")?,
            account_id: required(&self.account_id, "account_id")?,
            target_link: required(&self.target_link, "target_link")?,
            geo: required(&self.geo, "geo")?,
        })
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String, ValidationError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::empty_field(field))
}

/// Visitor attributes the worker routes on, with the data each variant needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targeting {
    DeviceGeo { devices: DeviceSet },
    GeoOnly,
}

impl Targeting {
    pub fn cloak_type(&self) -> CloakType {
        match self {
            Targeting::DeviceGeo { .. } => CloakType::DeviceGeo,
            Targeting::GeoOnly => CloakType::GeoOnly,
        }
    }

    pub fn devices(&self) -> Option<&DeviceSet> {
        match self {
            Targeting::DeviceGeo { devices } => Some(devices),
            Targeting::GeoOnly => None,
        }
    }
}

/// A completed wizard run, ready to render and deploy.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub targeting: Targeting,
    pub email: String,
    pub api_key: SecretString,
    pub zone_id: String,
    pub account_id: String,
    pub target_link: String,
    pub geo: String,
}

/// Outcome of feeding one operator message to a session.
#[derive(Debug, Clone)]
pub enum Advance {
    /// Send this reply; the session may or may not have moved.
    Reply(Reply),
    /// All fields are collected. The session has already been reset.
    Deploy(DeploymentConfig),
}

/// One operator's wizard state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    step: WizardStep,
    draft: Draft,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Applies one operator message.
    ///
    /// Restart signals are checked before any field is stored. Unrecognized
    /// input at the cloak-type and device steps re-prompts without touching
    /// the session.
    pub fn advance(&mut self, input: &str) -> Result<Advance, ValidationError> {
        let input = input.trim();

        if is_start_command(input) || (self.accepts_new_project() && is_new_project(input)) {
            return self.restart();
        }

        match self.step {
            WizardStep::Init => Ok(Advance::Reply(Reply::start_hint())),

            WizardStep::AwaitingCloakType => match classify_cloak_type(input) {
                Some(CloakType::DeviceGeo) => {
                    self.move_to(WizardStep::AwaitingDevices)?;
                    self.draft.cloak_type = Some(CloakType::DeviceGeo);
                    Ok(Advance::Reply(Reply::devices_prompt()))
                }
                Some(CloakType::GeoOnly) => {
                    self.move_to(WizardStep::AwaitingEmail)?;
                    self.draft.cloak_type = Some(CloakType::GeoOnly);
                    Ok(Advance::Reply(Reply::email_prompt()))
                }
                None => Ok(Advance::Reply(Reply::cloak_type_retry())),
            },

            WizardStep::AwaitingDevices => {
                let devices = classify_devices(input);
                if devices.is_empty() {
                    return Ok(Advance::Reply(Reply::devices_retry()));
                }
                self.move_to(WizardStep::AwaitingEmail)?;
                self.draft.devices = Some(devices);
                Ok(Advance::Reply(Reply::email_prompt()))
            }

            WizardStep::AwaitingEmail => self.store(input, WizardStep::AwaitingApiKey),
            WizardStep::AwaitingApiKey => self.store(input, WizardStep::AwaitingZoneId),
            WizardStep::AwaitingZoneId => self.store(input, WizardStep::AwaitingAccountId),
            WizardStep::AwaitingAccountId => self.store(input, WizardStep::AwaitingTargetLink),
            WizardStep::AwaitingTargetLink => self.store(input, WizardStep::AwaitingGeo),

            WizardStep::AwaitingGeo => {
                if input.is_empty() {
                    return Ok(Advance::Reply(Reply::geo_prompt()));
                }
                self.draft.geo = Some(input.to_uppercase());
                let config = self.draft.complete()?;
                self.move_to(WizardStep::Init)?;
                self.draft = Draft::default();
                Ok(Advance::Deploy(config))
            }
        }
    }

    /// Drops all collected fields and returns to `Init`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn accepts_new_project(&self) -> bool {
        self.step == WizardStep::Init || self.step.accepts_new_project()
    }

    fn restart(&mut self) -> Result<Advance, ValidationError> {
        self.move_to(WizardStep::AwaitingCloakType)?;
        self.draft = Draft::default();
        Ok(Advance::Reply(Reply::cloak_type_prompt()))
    }

    fn move_to(&mut self, target: WizardStep) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }

    /// Stores a free-text field for the current step and prompts for the next.
    fn store(&mut self, input: &str, next: WizardStep) -> Result<Advance, ValidationError> {
        if input.is_empty() {
            return Ok(Advance::Reply(prompt_for(self.step)));
        }
        let value = Some(input.to_string());
        match self.step {
            WizardStep::AwaitingEmail => self.draft.email = value,
            WizardStep::AwaitingApiKey => self.draft.api_key = value,
            WizardStep::AwaitingZoneId => self.draft.zone_id = value,
            WizardStep::AwaitingAccountId => self.draft.account_id = value,
            WizardStep::AwaitingTargetLink => self.draft.target_link = value,
            other => {
                return Err(ValidationError::invalid_format(
                    "step",
                    format!("{:?} does not store a text field", other),
                ))
            }
        }
        self.move_to(next)?;
        Ok(Advance::Reply(prompt_for(next)))
    }
}

fn prompt_for(step: WizardStep) -> Reply {
    match step {
        WizardStep::Init => Reply::start_hint(),
        WizardStep::AwaitingCloakType => Reply::cloak_type_prompt(),
        WizardStep::AwaitingDevices => Reply::devices_prompt(),
        WizardStep::AwaitingEmail => Reply::email_prompt(),
        WizardStep::AwaitingApiKey => Reply::api_key_prompt(),
        WizardStep::AwaitingZoneId => Reply::zone_id_prompt(),
        WizardStep::AwaitingAccountId => Reply::account_id_prompt(),
        WizardStep::AwaitingTargetLink => Reply::target_link_prompt(),
        WizardStep::AwaitingGeo => Reply::geo_prompt(),
    }
}
