// src/lib.rs
// Public library surface for the embedding web app and integration tests.

pub mod aggregator;
pub mod config;
pub mod normalize;
pub mod similarity;
pub mod sources;
pub mod store;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::aggregator::SourceRegistry;
pub use crate::config::{AppConfig, QualityFilters, SourceConfig};
pub use crate::store::{MemoryStore, PostingStore, Upsert};
pub use crate::types::{
    AggregateResult, FetchOutcome, JobSource, NormalizedPosting, RawPosting, UserProfile,
};
