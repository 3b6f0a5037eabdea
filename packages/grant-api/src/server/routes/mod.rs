// HTTP routes
pub mod content_generation;
pub mod data_collection;
pub mod health;
pub mod pipeline;
pub mod url_finder;

pub use content_generation::*;
pub use data_collection::*;
pub use health::*;
pub use pipeline::*;
pub use url_finder::*;

use url::Url;

use super::error::ApiError;

/// Reject anything that is not an absolute http(s) URL.
pub(crate) fn validate_foundation_url(raw: &str) -> Result<String, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            raw
        )));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_foundation_url() {
        assert_eq!(
            validate_foundation_url(" https://example.org ").unwrap(),
            "https://example.org/"
        );
        assert!(validate_foundation_url("example.org").is_err());
        assert!(validate_foundation_url("ftp://example.org").is_err());
    }
}
