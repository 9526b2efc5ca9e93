//! Identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Opaque identity of the operator talking to the wizard.
///
/// The chat transport owns the meaning of this value (a chat id, a user
/// handle); the wizard only uses it as a map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(String);

impl OperatorId {
    /// Creates an operator id, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("operator_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OperatorId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_id_trims_whitespace() {
        let id = OperatorId::new("  42 ").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn operator_id_rejects_blank() {
        assert!(OperatorId::new("   ").is_err());
        assert!("".parse::<OperatorId>().is_err());
    }

    #[test]
    fn operator_id_serializes_as_plain_string() {
        let id = OperatorId::new("chat-7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"chat-7\"");
    }
}
