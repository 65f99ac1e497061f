//! JSON session message, shared by the inbound and outbound legs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Fixed error code carried in every routing-layer error reply.
pub const WIRE_ERROR_CODE: u64 = 13;

/// A session protocol message.
///
/// Wraps the raw JSON object so unknown fields survive the round trip to the
/// backend untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionMessage {
    fields: Map<String, Value>,
}

impl SessionMessage {
    /// Parse a message from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Build the error reply sent to the caller on any routing failure.
    pub fn error(message: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("status".into(), json!(WIRE_ERROR_CODE));
        fields.insert("value".into(), json!({ "message": message }));
        Self { fields }
    }

    /// Read-only view of the requested capabilities.
    pub fn desired_capabilities(&self) -> Capabilities<'_> {
        Capabilities {
            attrs: self
                .fields
                .get("desiredCapabilities")
                .and_then(Value::as_object),
        }
    }

    /// Stamp the resolved version number onto the desired capabilities, so
    /// the backend knows exactly which flavor to instantiate.
    pub fn stamp_version(&mut self, number: &str) {
        self.fields
            .entry("desiredCapabilities")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(caps) = self
            .fields
            .get_mut("desiredCapabilities")
            .and_then(Value::as_object_mut)
        {
            caps.insert("version".into(), json!(number));
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.fields.get("sessionId").and_then(Value::as_str)
    }

    pub fn set_session_id(&mut self, session_id: String) {
        self.fields.insert("sessionId".into(), json!(session_id));
    }

    /// Error message a backend put in its reply, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.fields
            .get("value")
            .and_then(Value::as_object)
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
    }
}

/// Read-only view of a capability set.
///
/// Attribute values are opaque to the proxy; typed accessors exist only for
/// the attributes version matching needs.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities<'a> {
    attrs: Option<&'a Map<String, Value>>,
}

impl Capabilities<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.attrs.and_then(|a| a.get(key)).and_then(Value::as_str)
    }

    pub fn browser_name(&self) -> Option<&str> {
        self.get("browserName")
    }

    /// Requested version. `None` when absent or empty, which means "give me
    /// the configured default".
    pub fn version(&self) -> Option<&str> {
        self.get("version").filter(|v| !v.is_empty())
    }

    /// Human-readable summary for the audit trail. Never used for matching.
    pub fn describe(&self) -> String {
        format!(
            "{}-{}",
            self.browser_name().unwrap_or("any"),
            self.version().unwrap_or("any")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> SessionMessage {
        SessionMessage::from_slice(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_capabilities() {
        let msg = parse(r#"{"desiredCapabilities":{"browserName":"chrome","version":"40"}}"#);
        let caps = msg.desired_capabilities();
        assert_eq!(caps.browser_name(), Some("chrome"));
        assert_eq!(caps.version(), Some("40"));
        assert_eq!(caps.describe(), "chrome-40");
    }

    #[test]
    fn test_empty_version_means_default() {
        let msg = parse(r#"{"desiredCapabilities":{"browserName":"firefox","version":""}}"#);
        assert_eq!(msg.desired_capabilities().version(), None);
        assert_eq!(msg.desired_capabilities().describe(), "firefox-any");
    }

    #[test]
    fn test_stamp_version_overwrites() {
        let mut msg = parse(r#"{"desiredCapabilities":{"browserName":"chrome","version":"40"}}"#);
        msg.stamp_version("40.0.2");
        assert_eq!(msg.desired_capabilities().version(), Some("40.0.2"));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let mut msg = parse(r#"{"desiredCapabilities":{"goog:opts":{"args":[]}},"custom":1}"#);
        msg.stamp_version("1.0");
        let raw = serde_json::to_string(&msg).unwrap();
        assert!(raw.contains("goog:opts"));
        assert!(raw.contains("\"custom\":1"));
    }

    #[test]
    fn test_error_reply_shape() {
        let msg = SessionMessage::error("Cannot create session on any available node");
        let raw = serde_json::to_value(&msg).unwrap();
        assert_eq!(raw["status"], 13);
        assert_eq!(
            raw["value"]["message"],
            "Cannot create session on any available node"
        );
    }

    #[test]
    fn test_session_id_round_trip() {
        let mut msg = parse(r#"{"sessionId":"abc123","status":0}"#);
        assert_eq!(msg.session_id(), Some("abc123"));
        msg.set_session_id("deadbeefabc123".into());
        assert_eq!(msg.session_id(), Some("deadbeefabc123"));
    }
}
