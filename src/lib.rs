pub mod chat;
pub mod core;
pub mod kb;
pub mod server;
pub mod state;
