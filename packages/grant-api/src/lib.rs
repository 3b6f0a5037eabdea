//! HTTP surface and command-line entry points for the grant pipeline.

pub mod config;
pub mod output;
pub mod server;

pub use config::Config;
pub use server::{build_app, AppState};
