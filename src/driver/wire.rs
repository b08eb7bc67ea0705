//! Wire types for the automation server
//!
//! The server speaks the W3C WebDriver protocol with UiAutomator2
//! extensions. Only the envelopes the harness actually sends and receives
//! are modeled; everything else on the wire is opaque.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// W3C element identifier key in find-element responses
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Element identifier key used by legacy JSON wire responses
pub const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Error code for an invalidated element reference (transient fault class)
pub const STALE_ELEMENT_REFERENCE: &str = "stale element reference";

/// Error code for a lookup with no matching node
pub const NO_SUCH_ELEMENT: &str = "no such element";

/// Every response body is wrapped in a `value` envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub value: T,
}

/// Error payload carried in the `value` envelope of a failed request
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// Body of a find-element(s) request
#[derive(Debug, Serialize)]
pub struct FindBody<'a> {
    pub using: &'a str,
    pub value: &'a str,
}

/// Payload of a successful new-session response
#[derive(Debug, Deserialize)]
pub struct SessionValue {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub capabilities: Value,
}

/// Extract the element id from a find-element value object
pub fn element_id(value: &Value) -> Option<String> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Build W3C capabilities for a UiAutomator2 session against the app
pub fn session_capabilities(package: &str, activity: &str) -> Value {
    serde_json::json!({
        "capabilities": {
            "alwaysMatch": {
                "platformName": "Android",
                "appium:automationName": "uiautomator2",
                "appium:deviceName": "Android",
                "appium:appPackage": package,
                "appium:appActivity": activity,
                "appium:noReset": true
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_id_reads_w3c_key() {
        let v = serde_json::json!({ ELEMENT_KEY: "abc-123" });
        assert_eq!(element_id(&v).as_deref(), Some("abc-123"));
    }

    #[test]
    fn element_id_falls_back_to_legacy_key() {
        let v = serde_json::json!({ "ELEMENT": "42" });
        assert_eq!(element_id(&v).as_deref(), Some("42"));
    }

    #[test]
    fn error_envelope_roundtrip() {
        let body = r#"{"value":{"error":"stale element reference","message":"gone"}}"#;
        let env: Envelope<WireError> = serde_json::from_str(body).unwrap();
        assert_eq!(env.value.error, STALE_ELEMENT_REFERENCE);
        assert_eq!(env.value.message, "gone");
    }

    #[test]
    fn capabilities_target_the_app() {
        let caps = session_capabilities("com.payten.apos", ".gui.MainActivity");
        let m = &caps["capabilities"]["alwaysMatch"];
        assert_eq!(m["appium:appPackage"], "com.payten.apos");
        assert_eq!(m["appium:automationName"], "uiautomator2");
    }
}
