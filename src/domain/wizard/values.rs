//! Value types collected by the wizard.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Which visitor attributes the generated worker routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloakType {
    /// Route on device class and geo.
    DeviceGeo,
    /// Route on geo alone.
    GeoOnly,
}

impl CloakType {
    /// Stable identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloakType::DeviceGeo => "device_geo",
            CloakType::GeoOnly => "geo_only",
        }
    }
}

impl fmt::Display for CloakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device class of an inbound visitor.
///
/// Ordering is mobile, tablet, desktop; rendered device lists follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
}

impl Device {
    /// All device classes in canonical order.
    pub const ALL: [Device; 3] = [Device::Mobile, Device::Tablet, Device::Desktop];

    /// Lowercase name, as used in the generated script and reason codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Tablet => "tablet",
            Device::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of allowed device classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceSet(BTreeSet<Device>);

impl DeviceSet {
    /// Creates an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the set of every device class.
    pub fn all() -> Self {
        Device::ALL.into_iter().collect()
    }

    /// Adds a device class.
    pub fn insert(&mut self, device: Device) {
        self.0.insert(device);
    }

    pub fn contains(&self, device: Device) -> bool {
        self.0.contains(&device)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in canonical order (mobile, tablet, desktop).
    pub fn iter(&self) -> impl Iterator<Item = Device> + '_ {
        self.0.iter().copied()
    }

    /// Lowercase device names in canonical order.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|d| d.as_str()).collect()
    }
}

impl FromIterator<Device> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for DeviceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}
