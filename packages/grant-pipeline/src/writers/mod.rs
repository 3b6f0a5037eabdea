//! Writers synthesize directory copy from collected records.

pub mod description;
pub mod metadata;

pub use description::{filter_active_grants, is_deadline_expired, DescriptionWriter};
pub use metadata::MetadataWriter;
