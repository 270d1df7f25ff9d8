//! kakeibo-ingest: CSV export loading, text decoding, and source discovery.

pub mod discovery;
pub mod loader;
pub mod types;

pub use discovery::discover_sources;
pub use loader::load;
pub use types::{LoadError, SourceFile};
