//! Pure classification of operator free-text input.
//!
//! The transport delivers whatever the operator typed or whichever keyboard
//! button they pressed. These functions turn that text into wizard choices
//! without touching any session state.

use super::values::{CloakType, Device, DeviceSet};

/// Label of the persistent "New Project" keyboard button.
pub const NEW_PROJECT_BUTTON: &str = "📋 New Project";
/// Cloak-type keyboard labels.
pub const DEVICE_GEO_BUTTON: &str = "🎯 Device + Geo";
pub const GEO_ONLY_BUTTON: &str = "🌍 Geo Only";
/// Device keyboard labels.
pub const MOBILE_BUTTON: &str = "📱 Mobile";
pub const TABLET_BUTTON: &str = "📊 Tablet";
pub const DESKTOP_BUTTON: &str = "💻 Desktop";
pub const ALL_DEVICES_BUTTON: &str = "✅ All devices";

const START_COMMAND: &str = "/start";

/// Returns true for the chat start command (`/start`, `/start@bot`, `/start payload`).
pub fn is_start_command(input: &str) -> bool {
    let first = input.split_whitespace().next().unwrap_or_default();
    first == START_COMMAND || first.starts_with("/start@")
}

/// Returns true for the "New Project" signal, with or without the button emoji.
pub fn is_new_project(input: &str) -> bool {
    let text = input.trim();
    let text = text
        .strip_prefix(NEW_PROJECT_BUTTON.trim_end_matches("New Project"))
        .unwrap_or(text);
    text.trim().eq_ignore_ascii_case("new project")
}

/// Classifies the cloak-type choice.
///
/// "device" is checked first so that "Device + Geo" selects the device branch.
pub fn classify_cloak_type(input: &str) -> Option<CloakType> {
    let text = input.to_lowercase();
    if text.contains("device") {
        Some(CloakType::DeviceGeo)
    } else if text.contains("geo") {
        Some(CloakType::GeoOnly)
    } else {
        None
    }
}

/// Classifies the device selection.
///
/// "all devices" wins over any other keyword. Otherwise each device keyword
/// found anywhere in the input is selected; an empty set means the input was
/// not recognized.
pub fn classify_devices(input: &str) -> DeviceSet {
    let text = input.to_lowercase();
    if text.contains("all devices") {
        return DeviceSet::all();
    }
    Device::ALL
        .into_iter()
        .filter(|device| text.contains(device.as_str()))
        .collect()
}
