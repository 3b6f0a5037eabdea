//! Seams between the pipeline and the outside world.
//!
//! Everything that talks to the network sits behind one of these traits so
//! collectors, writers and the finder can run against mocks.

pub mod ai;
pub mod fetcher;
pub mod searcher;
