//! Outbound messages and keyboards.

use serde::{Deserialize, Serialize};

use super::input::{
    ALL_DEVICES_BUTTON, DESKTOP_BUTTON, DEVICE_GEO_BUTTON, GEO_ONLY_BUTTON, MOBILE_BUTTON,
    NEW_PROJECT_BUTTON, TABLET_BUTTON,
};
use super::values::{CloakType, DeviceSet};

/// Reply keyboard: rows of short button labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyboard(Vec<Vec<String>>);

impl Keyboard {
    /// One button per row.
    pub fn column<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(|l| vec![l.into()]).collect())
    }

    /// Persistent keyboard shown from the email step onward.
    pub fn main() -> Self {
        Self::column([NEW_PROJECT_BUTTON])
    }

    pub fn cloak_types() -> Self {
        Self::column([DEVICE_GEO_BUTTON, GEO_ONLY_BUTTON])
    }

    pub fn devices() -> Self {
        Self::column([MOBILE_BUTTON, TABLET_BUTTON, DESKTOP_BUTTON, ALL_DEVICES_BUTTON])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }
}

/// A message sent back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    /// A reply that leaves the operator's current keyboard in place.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    pub fn start_hint() -> Self {
        Self::text("Send /start to set up a new worker.")
    }

    pub fn cloak_type_prompt() -> Self {
        Self::with_keyboard(
            "🚀 **Worker Setup**\n\nSelect routing type:",
            Keyboard::cloak_types(),
        )
    }

    pub fn cloak_type_retry() -> Self {
        Self::text("❌ Select one of the suggested options")
    }

    pub fn devices_prompt() -> Self {
        Self::with_keyboard(
            "Select which devices to send to the target link:",
            Keyboard::devices(),
        )
    }

    pub fn devices_retry() -> Self {
        Self::text("❌ Select at least one device")
    }

    pub fn email_prompt() -> Self {
        Self::with_keyboard("Enter your account email:", Keyboard::main())
    }

    pub fn api_key_prompt() -> Self {
        Self::with_keyboard("Enter your **Global API Key**:", Keyboard::main())
    }

    pub fn zone_id_prompt() -> Self {
        Self::with_keyboard("Enter **Zone ID**:", Keyboard::main())
    }

    pub fn account_id_prompt() -> Self {
        Self::with_keyboard("Enter **Account ID**:", Keyboard::main())
    }

    pub fn target_link_prompt() -> Self {
        Self::with_keyboard("Enter **Target Link** (redirect URL):", Keyboard::main())
    }

    pub fn geo_prompt() -> Self {
        Self::with_keyboard(
            "Enter the **GEO** to redirect (e.g., UA).\nVisitors from other GEOs see the website.",
            Keyboard::main(),
        )
    }

    pub fn deployment_started(geo: &str) -> Self {
        Self::with_keyboard(
            format!("⏳ Starting worker deployment for GEO: {}...", geo),
            Keyboard::main(),
        )
    }

    /// Success report naming the effective route pattern.
    pub fn deployed(
        cloak_type: CloakType,
        geo: &str,
        devices: Option<&DeviceSet>,
        domain: &str,
    ) -> Self {
        let devices_info = devices
            .map(|d| format!("\nDevices: {}", d))
            .unwrap_or_default();
        Self::with_keyboard(
            format!(
                "✅ **Successfully deployed!**\nType: {}\nGEO: {}{}\nRoute: {}/*",
                cloak_type, geo, devices_info, domain
            ),
            Keyboard::main(),
        )
    }

    pub fn deployment_failed(message: &str) -> Self {
        Self::with_keyboard(
            format!("❌ **Control-plane error:**\n{}", message),
            Keyboard::main(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::Device;

    #[test]
    fn main_keyboard_has_single_new_project_button() {
        assert_eq!(
            Keyboard::main().rows(),
            &[vec![NEW_PROJECT_BUTTON.to_string()]]
        );
    }

    #[test]
    fn device_keyboard_lists_all_choices() {
        assert_eq!(Keyboard::devices().rows().len(), 4);
    }

    #[test]
    fn deployed_report_includes_route_and_devices() {
        let devices: DeviceSet = [Device::Mobile].into_iter().collect();
        let reply = Reply::deployed(CloakType::DeviceGeo, "UA", Some(&devices), "example.com");
        assert!(reply.text.contains("Route: example.com/*"));
        assert!(reply.text.contains("Devices: mobile"));
        assert!(reply.text.contains("Type: device_geo"));
    }

    #[test]
    fn geo_only_report_omits_devices() {
        let reply = Reply::deployed(CloakType::GeoOnly, "UA", None, "example.com");
        assert!(!reply.text.contains("Devices"));
        assert!(reply.text.contains("GEO: UA"));
    }

    #[test]
    fn text_reply_serializes_without_keyboard() {
        let json = serde_json::to_value(Reply::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hi" }));
    }
}
