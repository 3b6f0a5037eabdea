//! Keyword-filtered link discovery.
//!
//! A crawl is deliberately shallow: fetch the root, keep the anchors whose
//! href mentions one of the collector's keywords, and (optionally) repeat
//! that once for every page found.

pub mod discover;
pub mod http;
pub mod links;

pub use discover::{discover, go_one_level_deeper};
pub use http::HttpFetcher;
pub use links::{extract_hrefs, resolve_link, Keywords};
