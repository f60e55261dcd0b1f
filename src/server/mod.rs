pub mod autosync;
pub mod envelope;
pub mod handlers;
pub mod router;
