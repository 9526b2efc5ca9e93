//! Routing decision made by a deployed worker for each visit.
//!
//! [`RoutingRule::evaluate`] is the reference for what the rendered script
//! does at the edge, so the routing semantics can be checked without running
//! JavaScript.

use reqwest::Url;
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::wizard::{DeploymentConfig, Device, DeviceSet};

/// Substrings that mark a user agent as a tablet (unless it also says "mobile").
pub const TABLET_UA_PATTERNS: [&str; 4] = ["ipad", "android", "tablet", "kindle"];

/// Substrings that mark a user agent as a phone.
pub const MOBILE_UA_PATTERNS: [&str; 9] = [
    "mobile",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "webos",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Classifies a user agent into a device class.
///
/// Tablet patterns win over mobile patterns when the agent does not
/// contain "Mobile"; anything unmatched is a desktop.
pub fn classify_user_agent(user_agent: &str) -> Device {
    let ua = user_agent.to_lowercase();
    let is_tablet =
        TABLET_UA_PATTERNS.iter().any(|p| ua.contains(p)) && !ua.contains("mobile");
    let is_mobile = MOBILE_UA_PATTERNS.iter().any(|p| ua.contains(p));

    if is_tablet {
        Device::Tablet
    } else if is_mobile {
        Device::Mobile
    } else {
        Device::Desktop
    }
}

/// Why a visit was or was not redirected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingReason {
    Matched,
    BadGeo(String),
    BadDevice(Device),
}

impl fmt::Display for RoutingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingReason::Matched => f.write_str("MATCHED"),
            RoutingReason::BadGeo(country) => write!(f, "BAD_GEO_{}", country),
            RoutingReason::BadDevice(device) => write!(f, "BAD_DEVICE_{}", device),
        }
    }
}

/// What the worker does with a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Asset or framework request, forwarded before any evaluation.
    Bypass,
    /// Evaluated and forwarded unchanged to the origin.
    PassThrough(RoutingReason),
    /// Evaluated and sent to the target link with a 302.
    Redirect(String),
}

/// An inbound request as the edge sees it.
#[derive(Debug, Clone)]
pub struct VisitRequest {
    pub url: Url,
    /// Two-letter country from the edge's geo lookup, if any.
    pub country: Option<String>,
    pub user_agent: String,
}

impl VisitRequest {
    pub fn new(
        url: &str,
        country: Option<&str>,
        user_agent: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let url = Url::parse(url).map_err(|e| ValidationError::invalid_format("url", e.to_string()))?;
        Ok(Self {
            url,
            country: country.map(str::to_string),
            user_agent: user_agent.into(),
        })
    }
}

/// Parameters baked into a worker script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    pub target_link: String,
    pub geo: String,
    /// `None` routes on geo only.
    pub devices: Option<DeviceSet>,
    /// Where the worker posts one log record per evaluated visit.
    pub visit_log_url: String,
}

impl RoutingRule {
    pub fn from_config(config: &DeploymentConfig, visit_log_url: impl Into<String>) -> Self {
        Self {
            target_link: config.target_link.clone(),
            geo: config.geo.clone(),
            devices: config.targeting.devices().cloned(),
            visit_log_url: visit_log_url.into(),
        }
    }

    /// Decides what the worker does with a visit.
    pub fn evaluate(&self, request: &VisitRequest) -> RoutingDecision {
        let url = &request.url;
        let query = url.query().unwrap_or_default();
        if url.path().contains('.') || query.contains("url=") || query.contains("_rsc") {
            return RoutingDecision::Bypass;
        }

        let country = request.country.as_deref().unwrap_or("Unknown");
        let device = classify_user_agent(&request.user_agent);

        let reason = if country != self.geo {
            RoutingReason::BadGeo(country.to_string())
        } else if self.devices.as_ref().is_some_and(|d| !d.contains(device)) {
            RoutingReason::BadDevice(device)
        } else {
            RoutingReason::Matched
        };

        match reason {
            RoutingReason::Matched => {
                RoutingDecision::Redirect(self.redirect_url(url.host_str().unwrap_or_default()))
            }
            other => RoutingDecision::PassThrough(other),
        }
    }

    /// Target link with the requested domain appended as `sub5`.
    pub fn redirect_url(&self, domain: &str) -> String {
        let separator = if self.target_link.contains('?') { '&' } else { '?' };
        format!(
            "{}{}sub5={}",
            self.target_link,
            separator,
            encode_uri_component(domain)
        )
    }
}

/// Percent-encodes like JavaScript's `encodeURIComponent`.
fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP_UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";
    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID_PHONE_UA: &str =
        "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";
    const ANDROID_TABLET_UA: &str =
        "Mozilla/5.0 (Linux; Android 13; SM-X700) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";

    fn rule(devices: Option<DeviceSet>) -> RoutingRule {
        RoutingRule {
            target_link: "https://offer.example.net/landing".to_string(),
            geo: "UA".to_string(),
            devices,
            visit_log_url: "https://logs.example.org/visits".to_string(),
        }
    }

    fn mobile_only() -> Option<DeviceSet> {
        Some([Device::Mobile].into_iter().collect())
    }

    fn visit(url: &str, country: Option<&str>, ua: &str) -> VisitRequest {
        VisitRequest::new(url, country, ua).unwrap()
    }

    #[test]
    fn user_agent_classification() {
        assert_eq!(classify_user_agent(DESKTOP_UA), Device::Desktop);
        assert_eq!(classify_user_agent(IPHONE_UA), Device::Mobile);
        assert_eq!(classify_user_agent(IPAD_UA), Device::Tablet);
        assert_eq!(classify_user_agent(ANDROID_PHONE_UA), Device::Mobile);
        assert_eq!(classify_user_agent(ANDROID_TABLET_UA), Device::Tablet);
        assert_eq!(classify_user_agent(""), Device::Desktop);
    }

    #[test]
    fn desktop_visit_on_mobile_only_rule_passes_through() {
        let decision = rule(mobile_only()).evaluate(&visit("https://shop.example.com/", Some("UA"), DESKTOP_UA));
        assert_eq!(
            decision,
            RoutingDecision::PassThrough(RoutingReason::BadDevice(Device::Desktop))
        );
        if let RoutingDecision::PassThrough(reason) = decision {
            assert_eq!(reason.to_string(), "BAD_DEVICE_desktop");
        }
    }

    #[test]
    fn matching_mobile_visit_redirects_with_sub5() {
        let decision = rule(mobile_only()).evaluate(&visit("https://shop.example.com/", Some("UA"), IPHONE_UA));
        assert_eq!(
            decision,
            RoutingDecision::Redirect(
                "https://offer.example.net/landing?sub5=shop.example.com".to_string()
            )
        );
    }

    #[test]
    fn other_geo_passes_through_with_country_reason() {
        let decision = rule(None).evaluate(&visit("https://shop.example.com/", Some("DE"), IPHONE_UA));
        assert_eq!(
            decision,
            RoutingDecision::PassThrough(RoutingReason::BadGeo("DE".to_string()))
        );
    }

    #[test]
    fn missing_country_is_unknown() {
        let decision = rule(None).evaluate(&visit("https://shop.example.com/", None, DESKTOP_UA));
        assert_eq!(
            decision,
            RoutingDecision::PassThrough(RoutingReason::BadGeo("Unknown".to_string()))
        );
    }

    #[test]
    fn geo_only_rule_ignores_device() {
        let decision = rule(None).evaluate(&visit("https://shop.example.com/", Some("UA"), DESKTOP_UA));
        assert!(matches!(decision, RoutingDecision::Redirect(_)));
    }

    #[test]
    fn assets_and_framework_requests_bypass() {
        let r = rule(None);
        for url in [
            "https://shop.example.com/static/app.js",
            "https://shop.example.com/?url=https://elsewhere",
            "https://shop.example.com/page?_rsc=abc",
        ] {
            assert_eq!(
                r.evaluate(&visit(url, Some("UA"), IPHONE_UA)),
                RoutingDecision::Bypass,
                "{} should bypass",
                url
            );
        }
    }

    #[test]
    fn redirect_uses_ampersand_when_target_has_query() {
        let mut r = rule(None);
        r.target_link = "https://offer.example.net/?campaign=7".to_string();
        assert_eq!(
            r.redirect_url("shop.example.com"),
            "https://offer.example.net/?campaign=7&sub5=shop.example.com"
        );
    }

    #[test]
    fn encode_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("shop.example.com"), "shop.example.com");
        assert_eq!(encode_uri_component("[::1]"), "%5B%3A%3A1%5D");
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
    }

    #[test]
    fn reason_codes_render() {
        assert_eq!(RoutingReason::Matched.to_string(), "MATCHED");
        assert_eq!(RoutingReason::BadGeo("FR".into()).to_string(), "BAD_GEO_FR");
        assert_eq!(
            RoutingReason::BadDevice(Device::Tablet).to_string(),
            "BAD_DEVICE_tablet"
        );
    }

    #[test]
    fn invalid_visit_url_is_rejected() {
        assert!(VisitRequest::new("not a url", None, "").is_err());
    }
}
