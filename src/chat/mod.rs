//! The chat client: an explicit session object, the GET round trip to the
//! query endpoint, and the two-stage decode of the gateway envelope.

pub mod client;
pub mod envelope;
pub mod session;

pub use client::{ChatClient, RenderEvent};
pub use session::{ChatMessage, ChatSession, Role};
