//! Typed errors for the grant pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the API layer can
//! map each failure onto a status code.

use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Crawl or fetch operation failed
    #[error("crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    /// Language model unavailable or failed
    #[error("language model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Web search provider failed
    #[error("search error: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The model answered, but not with what the prompt asked for
    #[error("invalid model output: {reason}")]
    InvalidModelOutput { reason: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No grant survived extraction for the foundation
    #[error("no grants found at {url}")]
    NoGrantsFound { url: String },

    /// Every collected grant was filtered out as expired
    #[error("no active grants among {total} collected")]
    NoActiveGrants { total: usize },
}

/// Errors that can occur during crawl and fetch operations.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Security validation failed
    #[error("security error: {0}")]
    Security(#[from] SecurityError),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with something other than 200 OK
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Security-related errors, primarily for SSRF protection.
#[derive(Debug, Error)]
pub enum SecurityError {
    /// URL scheme not allowed (e.g., file://, ftp://)
    #[error("disallowed URL scheme: {0}")]
    DisallowedScheme(String),

    /// Host is blocked (e.g., localhost, internal IPs)
    #[error("blocked host: {0}")]
    BlockedHost(String),

    /// IP in blocked CIDR range (e.g., 10.0.0.0/8)
    #[error("blocked IP range: {0}")]
    BlockedCidr(String),

    /// URL has no host
    #[error("URL has no host")]
    NoHost,

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl PipelineError {
    /// Wrap any error coming back from a model provider.
    pub fn model(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Model(err.into())
    }

    /// Wrap any error coming back from a search provider.
    pub fn search(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Search(err.into())
    }

    pub fn invalid_output(reason: impl Into<String>) -> Self {
        Self::InvalidModelOutput {
            reason: reason.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for crawl operations.
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

/// Result type alias for security operations.
pub type SecurityResult<T> = std::result::Result<T, SecurityError>;
