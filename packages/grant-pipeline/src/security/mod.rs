//! Security module for credential handling and SSRF protection.

pub mod credentials;
pub mod url_validator;

pub use credentials::{ModelCredentials, SecretString};
pub use url_validator::UrlValidator;
