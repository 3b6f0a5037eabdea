//! Data types shared across collectors, writers and the API layer.

pub mod config;
pub mod grant;
pub mod lenient;
pub mod metadata;
pub mod organization;
pub mod page;
pub mod report;
