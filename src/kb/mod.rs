//! Integration with the managed knowledge-base retrieval-and-generation
//! service.
//!
//! This module provides:
//! - `KnowledgeBaseProvider`: the seam between the handlers and the service
//! - `RemoteKbClient`: the HTTP implementation of that seam
//! - `RetrievalResult`: the flattened answer/context/source payload the
//!   query handler returns

pub mod extract;
pub mod provider;
pub mod remote;
pub mod types;

pub use extract::RetrievalResult;
pub use provider::KnowledgeBaseProvider;
pub use remote::RemoteKbClient;
