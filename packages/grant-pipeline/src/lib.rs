//! Foundation Crawl & Structured-Extraction Pipeline
//!
//! Takes a foundation's root URL, discovers a bounded set of candidate pages
//! by keyword-filtering anchor tags, fetches and cleans each page, and asks a
//! language model to turn the text into structured [`Grant`] and
//! [`Organization`] records. Downstream writers synthesize a consolidated
//! opportunity description and SEO metadata from those records.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grant_pipeline::{GrantPipeline, HttpFetcher, OpenAI, PipelineRequest, ValidatedFetcher};
//!
//! let fetcher = Arc::new(ValidatedFetcher::new(HttpFetcher::new()?));
//! let model = Arc::new(OpenAI::new("sk-..."));
//! let pipeline = GrantPipeline::new(fetcher, model);
//!
//! let outcome = pipeline
//!     .run(&PipelineRequest::new("https://examplefoundation.org"))
//!     .await?;
//! println!("{}", outcome.consolidated.description);
//! ```
//!
//! # Modules
//!
//! - [`crawl`] - Keyword-filtered link discovery and the HTTP fetcher
//! - [`text`] - Main-content extraction and Markdown conversion
//! - [`llm`] - Code-fence stripping and lenient JSON parsing of model output
//! - [`collectors`] - Grant and organization collectors
//! - [`writers`] - Consolidated description and metadata writers
//! - [`finder`] - Organization URL finder (search, then validate)
//! - [`pipeline`] - End-to-end orchestration
//! - [`security`] - Credential handling and SSRF protection
//! - [`testing`] - Mock implementations for offline tests

pub mod ai;
pub mod collectors;
pub mod crawl;
pub mod error;
pub mod finder;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod security;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;
pub mod writers;

pub use ai::OpenAI;
pub use collectors::{GrantCollector, OrganizationCollector};
pub use crawl::{discover, go_one_level_deeper, HttpFetcher, Keywords};
pub use error::{CrawlError, PipelineError, Result, SecurityError};
pub use finder::{UrlFinder, UrlFinderOutcome};
pub use pipeline::GrantPipeline;
pub use security::{ModelCredentials, SecretString, UrlValidator};
pub use text::{extract_page_text, PageText};
pub use traits::{
    ai::{CompletionRequest, LanguageModel},
    fetcher::{PageFetcher, ValidatedFetcher},
    searcher::{MockWebSearcher, SearchResult, TavilyWebSearcher, WebSearcher},
};
pub use types::{
    config::{CrawlConfig, PipelineRequest},
    grant::{ContactInfo, Grant, NOT_SPECIFIED},
    metadata::GrantMetadata,
    organization::{Organization, OrganizationContact},
    page::FetchedPage,
    report::{ConsolidatedDescription, ConsolidatedReport, PipelineOutcome},
};
pub use writers::{is_deadline_expired, DescriptionWriter, MetadataWriter};
