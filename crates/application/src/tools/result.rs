//! Uniform tool-result envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single block of tool output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain or JSON-formatted text
    Text {
        /// The text
        text: String,
    },
}

impl ToolContent {
    /// Create a text block
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The block's text
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Outcome of a tool invocation
///
/// Failures are reported in-band with `is_error` set rather than as a
/// protocol fault, so callers always receive a readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Output blocks
    pub content: Vec<ToolContent>,
    /// Machine-readable copy of the output, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    /// Whether the invocation failed
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result carrying `value` as pretty JSON and as structured content
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                let text =
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                Self {
                    content: vec![ToolContent::text(text)],
                    structured_content: Some(value),
                    is_error: false,
                }
            },
            Err(e) => Self::error(format!("Failed to encode tool result: {e}")),
        }
    }

    /// Failed result with a text message
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Tool call failed".to_string();
        }
        Self {
            content: vec![ToolContent::text(message)],
            structured_content: None,
            is_error: true,
        }
    }

    /// Flag a result as failed, putting `message` in front of its content
    #[must_use]
    pub fn into_error(mut self, message: impl Into<String>) -> Self {
        self.content.insert(0, ToolContent::text(message));
        self.is_error = true;
        self
    }

    /// All text blocks joined by newlines
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(ToolContent::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_result() {
        let result = ToolResult::json(&json!([{"id": 1}]));
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 1);
        assert!(result.text().contains("\"id\": 1"));
        assert_eq!(result.structured_content, Some(json!([{"id": 1}])));
    }

    #[test]
    fn test_error_result() {
        let result = ToolResult::error("geocoding service returned HTTP 503");
        assert!(result.is_error);
        assert!(result.structured_content.is_none());
        assert_eq!(result.text(), "geocoding service returned HTTP 503");
    }

    #[test]
    fn test_empty_error_message_is_replaced() {
        let result = ToolResult::error("  ");
        assert!(result.is_error);
        assert!(!result.text().trim().is_empty());
    }

    #[test]
    fn test_into_error_keeps_structured_content() {
        let result = ToolResult::json(&json!({"code": "NoRoute"})).into_error("no route found");
        assert!(result.is_error);
        assert_eq!(result.content[0].as_text(), "no route found");
        assert!(result.structured_content.is_some());
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(ToolResult::error("boom")).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "boom"}], "isError": true})
        );
    }
}
