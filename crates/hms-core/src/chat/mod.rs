mod message;
mod request;
mod response;

pub use message::{ChatMessage, Role};
pub use request::ChatRequest;
pub use response::ChatResponse;
