use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Chat completion response
///
/// The remote service returns an arbitrary JSON object; the only part of the
/// shape this crate ever interprets is `choices[0].message.content`. Keeping
/// the raw value means everything else passes through untouched, including
/// service-reported error bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatResponse {
    raw: Value,
}

impl ChatResponse {
    /// Wrap a parsed response body
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// Borrow the full response body
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Take the full response body
    pub fn into_inner(self) -> Value {
        self.raw
    }

    /// The first choice's message content, if the response carries one.
    ///
    /// Returns `None` when any link in `choices[0].message.content` is
    /// absent or not a string; the caller decides what a missing answer
    /// means.
    pub fn primary_content(&self) -> Option<&str> {
        self.raw
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }

    /// Rewrite the first choice's content in place.
    ///
    /// The transform only runs when the content is present and non-empty;
    /// otherwise the response is left exactly as parsed. Returns whether a
    /// replacement happened.
    pub fn map_primary_content<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&str) -> String,
    {
        let replacement = match self.primary_content() {
            Some(content) if !content.is_empty() => transform(content),
            _ => return false,
        };

        let slot = self
            .raw
            .get_mut("choices")
            .and_then(|choices| choices.get_mut(0))
            .and_then(|choice| choice.get_mut("message"))
            .and_then(|message| message.get_mut("content"));

        match slot {
            Some(slot) => {
                *slot = Value::String(replacement);
                true
            }
            None => false,
        }
    }
}

impl From<Value> for ChatResponse {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_content() {
        let response = ChatResponse::new(json!({
            "choices": [{"message": {"role": "assistant", "content": "Hello"}}]
        }));
        assert_eq!(response.primary_content(), Some("Hello"));
    }

    #[test]
    fn test_primary_content_missing_choices() {
        let response = ChatResponse::new(json!({"error": {"message": "bad key"}}));
        assert_eq!(response.primary_content(), None);
    }

    #[test]
    fn test_map_replaces_in_place() {
        let mut response = ChatResponse::new(json!({
            "id": "gen-1",
            "choices": [{"message": {"role": "assistant", "content": "raw"}}]
        }));

        assert!(response.map_primary_content(|text| format!("{text}!")));
        assert_eq!(response.primary_content(), Some("raw!"));
        // untouched siblings survive
        assert_eq!(response.as_value()["id"], "gen-1");
    }

    #[test]
    fn test_map_skips_empty_content() {
        let mut response = ChatResponse::new(json!({
            "choices": [{"message": {"content": ""}}]
        }));

        assert!(!response.map_primary_content(|_| panic!("must not run")));
        assert_eq!(response.primary_content(), Some(""));
    }

    #[test]
    fn test_map_skips_absent_shape() {
        let original = json!({"choices": []});
        let mut response = ChatResponse::new(original.clone());

        assert!(!response.map_primary_content(|t| t.to_string()));
        assert_eq!(response.into_inner(), original);
    }
}
