use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Chat completion request
///
/// Serializes to the wire body `{"model", "messages", "stream"}`. Message
/// order is preserved exactly as built.
///
/// `stream` is accepted for wire compatibility but the client always awaits
/// a single complete body; see the client documentation for the limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub stream: bool,
}

impl ChatRequest {
    /// Create a new chat request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            stream: false,
        }
    }

    /// Add a message to the request
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Add multiple messages
    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Request a streamed response (accepted but not specially handled)
    pub fn stream(mut self) -> Self {
        self.stream = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new("openai/gpt-4o")
            .with_message(ChatMessage::user("Hello"));

        assert_eq!(request.model, "openai/gpt-4o");
        assert_eq!(request.messages.len(), 1);
        assert!(!request.stream);
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest::new("openai/gpt-4o")
            .with_message(ChatMessage::system("Be brief"))
            .with_message(ChatMessage::user("Hi"));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "openai/gpt-4o");
        assert_eq!(body["stream"], false);

        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "Hi");
    }

    #[test]
    fn test_message_order_preserved() {
        let request = ChatRequest::new("m").with_messages(vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("second"),
            ChatMessage::user("third"),
        ]);

        let contents: Vec<_> = request.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_stream_flag() {
        let request = ChatRequest::new("m").stream();
        assert!(request.stream);
    }
}
