pub mod chat;

// Re-export core types
pub use chat::{ChatMessage, ChatRequest, ChatResponse, Role};
