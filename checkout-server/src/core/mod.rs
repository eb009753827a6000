//! Core module - configuration, state, background tasks

pub mod config;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use state::ServerState;
