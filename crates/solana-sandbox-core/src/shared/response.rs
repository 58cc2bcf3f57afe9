//! Unified response envelope for tool results.
//!
//! Every tool returns a [`ToolResult`], which is what the protocol layer
//! serializes back to the client:
//!
//! ```json
//! { "content": [{ "type": "text", "text": "..." }], "isError": false, "toolResult": ... }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pubkey::ParseFailure;

/// Kind tag of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
}

/// One displayable item of a tool result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub text: String,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: text.into(),
        }
    }
}

/// Outcome of a tool invocation.
///
/// `content` is never empty, and an error result never carries a
/// `tool_result`. Both hold for every constructor and are checked again on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    try_from = "RawToolResult<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ToolResult<T> {
    content: Vec<ContentItem>,
    is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_result: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawToolResult<T> {
    content: Vec<ContentItem>,
    is_error: bool,
    tool_result: Option<T>,
}

impl<T> TryFrom<RawToolResult<T>> for ToolResult<T> {
    type Error = &'static str;

    fn try_from(raw: RawToolResult<T>) -> Result<Self, Self::Error> {
        if raw.content.is_empty() {
            return Err("tool result content must not be empty");
        }
        if raw.is_error && raw.tool_result.is_some() {
            return Err("error tool result must not carry a toolResult");
        }
        Ok(Self {
            content: raw.content,
            is_error: raw.is_error,
            tool_result: raw.tool_result,
        })
    }
}

impl<T> ToolResult<T> {
    /// Create a successful result with a single text message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: false,
            tool_result: None,
        }
    }

    /// Create a successful result carrying a value for the caller.
    pub fn success_with_result(message: impl Into<String>, value: T) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: false,
            tool_result: Some(value),
        }
    }

    /// Create an error result with a single text message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(message)],
            is_error: true,
            tool_result: None,
        }
    }

    /// Create an error result from an anyhow::Error.
    ///
    /// The top-level message comes first, followed by one item per cause.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let mut response = Self::error(err.to_string());
        for cause in err.chain().skip(1) {
            response = response.with_text(format!("caused by: {}", cause));
        }
        response
    }

    /// Append a text item after the existing content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(ContentItem::text(text));
        self
    }

    pub fn content(&self) -> &[ContentItem] {
        &self.content
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn tool_result(&self) -> Option<&T> {
        self.tool_result.as_ref()
    }

    pub fn into_tool_result(self) -> Option<T> {
        self.tool_result
    }

    /// Text of the first content item.
    pub fn message(&self) -> &str {
        // content is non-empty for every constructed value
        self.content
            .first()
            .map(|item| item.text.as_str())
            .unwrap_or_default()
    }

    /// Transform the attached value, keeping content and error flag.
    pub fn map<U, F>(self, f: F) -> ToolResult<U>
    where
        F: FnOnce(T) -> U,
    {
        ToolResult {
            content: self.content,
            is_error: self.is_error,
            tool_result: self.tool_result.map(f),
        }
    }
}

impl<T: Serialize> ToolResult<T> {
    /// Erase the value type so results from different tools share one type.
    pub fn into_json(self) -> ToolResult<Value> {
        self.map(|value| serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// Convert the result to a JSON Value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl<T> From<ParseFailure> for ToolResult<T> {
    fn from(failure: ParseFailure) -> Self {
        Self::error(failure.to_string())
    }
}

impl<T> From<anyhow::Error> for ToolResult<T> {
    fn from(err: anyhow::Error) -> Self {
        Self::from_error(&err)
    }
}

/// Extract and deserialize a tool input from a JSON Value.
///
/// ```ignore
/// let parsed: PublicKeyInput = match extract_input(input) {
///     Ok(v) => v,
///     Err(e) => return e,
/// };
/// ```
pub fn extract_input<I, T>(value: Value) -> Result<I, ToolResult<T>>
where
    I: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| ToolResult::error(format!("Invalid input: {}", e)))
}

/// Metadata that can be attached to tool invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolMeta {
    /// Reason for the tool invocation (for logging/debugging).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Unique request ID for tracing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// Tags for categorization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ToolMeta {
    /// Split `_meta` off a tool input, returning the metadata and the rest.
    pub fn extract(input: &Value) -> (ToolMeta, Value) {
        let mut meta = ToolMeta::default();
        let Value::Object(map) = input else {
            return (meta, input.clone());
        };

        if let Some(Value::Object(meta_map)) = map.get("_meta") {
            if let Some(Value::String(reason)) = meta_map.get("reason") {
                meta.reason = Some(reason.clone());
            }
            if let Some(Value::String(req)) = meta_map.get("request_id") {
                meta.request_id = Some(req.clone());
            }
            if let Some(Value::Array(tags)) = meta_map.get("tags") {
                let parsed: Vec<String> = tags
                    .iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect();
                if !parsed.is_empty() {
                    meta.tags = Some(parsed);
                }
            }
        }

        let mut cleaned = map.clone();
        cleaned.remove("_meta");
        (meta, Value::Object(cleaned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_response() {
        let response = ToolResult::<()>::success("done");
        assert!(!response.is_error());
        assert_eq!(response.content(), &[ContentItem::text("done")]);
        assert_eq!(
            response.to_json(),
            json!({ "content": [{ "type": "text", "text": "done" }], "isError": false })
        );
    }

    #[test]
    fn test_error_response() {
        let response = ToolResult::<()>::error("bad input");
        assert!(response.is_error());
        assert_eq!(response.message(), "bad input");
        assert_eq!(
            response.to_json(),
            json!({ "content": [{ "type": "text", "text": "bad input" }], "isError": true })
        );
    }

    #[test]
    fn test_empty_messages_keep_one_item() {
        let ok = ToolResult::<()>::success("");
        let err = ToolResult::<()>::error("");
        assert_eq!(ok.content(), &[ContentItem::text("")]);
        assert_eq!(err.content(), &[ContentItem::text("")]);
        assert!(!ok.is_error());
        assert!(err.is_error());
    }

    #[test]
    fn test_success_with_result() {
        let response = ToolResult::success_with_result("found", json!({"count": 2}));
        let json = response.to_json();
        assert_eq!(json["isError"], false);
        assert_eq!(json["toolResult"]["count"], 2);
        assert_eq!(response.into_tool_result(), Some(json!({"count": 2})));
    }

    #[test]
    fn test_with_text_preserves_order() {
        let response = ToolResult::<()>::error("first")
            .with_text("second")
            .with_text("third");
        let texts: Vec<&str> = response
            .content()
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_from_anyhow_error_includes_causes() {
        let err = anyhow::anyhow!("root cause").context("outer failure");
        let response = ToolResult::<()>::from_error(&err);
        assert!(response.is_error());
        assert_eq!(response.message(), "outer failure");
        assert_eq!(response.content()[1].text, "caused by: root cause");
    }

    #[test]
    fn test_map_and_into_json() {
        #[derive(Serialize)]
        struct Info {
            n: u32,
        }

        let response = ToolResult::success_with_result("ok", 3u32).map(|n| Info { n });
        let erased = response.into_json();
        assert_eq!(erased.tool_result(), Some(&json!({ "n": 3 })));
    }

    #[test]
    fn test_deserialize_valid() {
        let value = json!({
            "content": [{ "type": "text", "text": "hello" }],
            "isError": false,
            "toolResult": 7
        });
        let response: ToolResult<u32> = serde_json::from_value(value).unwrap();
        assert_eq!(response.message(), "hello");
        assert_eq!(response.tool_result(), Some(&7));
    }

    #[test]
    fn test_deserialize_value_without_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Balance {
            lamports: u64,
        }

        let value = json!({
            "content": [{ "type": "text", "text": "balance" }],
            "isError": false,
            "toolResult": { "lamports": 5 }
        });
        let response: ToolResult<Balance> = serde_json::from_value(value).unwrap();
        assert_eq!(response.tool_result(), Some(&Balance { lamports: 5 }));

        let missing = json!({ "content": [{ "type": "text", "text": "none" }], "isError": false });
        let response: ToolResult<Balance> = serde_json::from_value(missing).unwrap();
        assert!(response.tool_result().is_none());
    }

    #[test]
    fn test_deserialize_rejects_empty_content() {
        let value = json!({ "content": [], "isError": false });
        assert!(serde_json::from_value::<ToolResult<Value>>(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_error_with_result() {
        let value = json!({
            "content": [{ "type": "text", "text": "boom" }],
            "isError": true,
            "toolResult": 1
        });
        assert!(serde_json::from_value::<ToolResult<u32>>(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let value = json!({
            "content": [{ "type": "image", "text": "x" }],
            "isError": false
        });
        assert!(serde_json::from_value::<ToolResult<Value>>(value).is_err());
    }

    #[test]
    fn test_extract_input() {
        #[derive(Debug, Deserialize)]
        struct Input {
            public_key: String,
        }

        let parsed: Input = extract_input::<Input, ()>(json!({ "public_key": "abc" })).unwrap();
        assert_eq!(parsed.public_key, "abc");

        let err = extract_input::<Input, ()>(json!({})).unwrap_err();
        assert!(err.is_error());
        assert!(err.message().starts_with("Invalid input: "));
    }

    #[test]
    fn test_meta_extraction() {
        let input = json!({
            "public_key": "abc",
            "_meta": { "reason": "check owner", "request_id": "req-1", "tags": ["a", 1, "b"] }
        });
        let (meta, cleaned) = ToolMeta::extract(&input);
        assert_eq!(meta.reason.as_deref(), Some("check owner"));
        assert_eq!(meta.request_id.as_deref(), Some("req-1"));
        assert_eq!(meta.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(cleaned, json!({ "public_key": "abc" }));
    }

    #[test]
    fn test_meta_extraction_non_object() {
        let (meta, cleaned) = ToolMeta::extract(&json!("raw"));
        assert!(meta.reason.is_none());
        assert_eq!(cleaned, json!("raw"));
    }
}
