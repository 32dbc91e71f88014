// src/aggregator.rs
//! Fan-out across registered job sources with per-source failure isolation:
//! one source failing never prevents the others from running or being
//! reported.

use metrics::{counter, gauge};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::sources::ensure_metrics_described;
use crate::store::{PostingStore, Upsert};
use crate::types::{AggregateResult, FetchOutcome, JobSource, UserProfile};

pub struct SourceRegistry {
    sources: BTreeMap<&'static str, Box<dyn JobSource>>,
    store: Arc<dyn PostingStore>,
}

impl SourceRegistry {
    /// Sources are injected explicitly; nothing registers itself behind the
    /// caller's back.
    pub fn new(store: Arc<dyn PostingStore>) -> Self {
        Self {
            sources: BTreeMap::new(),
            store,
        }
    }

    pub fn with_sources(store: Arc<dyn PostingStore>, sources: Vec<Box<dyn JobSource>>) -> Self {
        let mut registry = Self::new(store);
        for source in sources {
            registry.register(source);
        }
        registry
    }

    /// Adds a source, replacing any previous one with the same name.
    pub fn register(&mut self, source: Box<dyn JobSource>) {
        self.sources.insert(source.name(), source);
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.keys().copied().collect()
    }

    /// One aggregate run: fetch, filter, normalize, and upsert per source,
    /// independently, then consolidate the per-source outcomes.
    pub async fn fetch_and_process_all(
        &self,
        user_id: &str,
        profile: &UserProfile,
    ) -> AggregateResult {
        ensure_metrics_described();

        let mut result = AggregateResult::default();
        for (name, source) in &self.sources {
            let outcome = self.run_source(source.as_ref(), user_id, profile).await;
            tracing::info!(
                target: "pipeline",
                source = *name,
                success = outcome.success,
                processed = outcome.processed,
                "source run finished"
            );
            result.total_processed += outcome.processed;
            result.per_source.insert((*name).to_string(), outcome);
        }

        gauge!("jobs_pipeline_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        result
    }

    /// Same per-source sequence for a single named source. An unregistered
    /// name is a caller error and reported as such, distinct from a source
    /// that merely returned nothing.
    pub async fn fetch_from_one(
        &self,
        source_name: &str,
        user_id: &str,
        profile: &UserProfile,
    ) -> FetchOutcome {
        ensure_metrics_described();
        match self.sources.get(source_name) {
            Some(source) => self.run_source(source.as_ref(), user_id, profile).await,
            None => FetchOutcome::failed(format!("source `{source_name}` is not registered")),
        }
    }

    async fn run_source(
        &self,
        source: &dyn JobSource,
        user_id: &str,
        profile: &UserProfile,
    ) -> FetchOutcome {
        let name = source.name();

        let raw = match source.fetch_raw().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(target: "pipeline", source = name, error = ?e, "fetch failed");
                counter!("jobs_source_errors_total").increment(1);
                return FetchOutcome::failed(format!("{e:#}"));
            }
        };
        if raw.is_empty() {
            return FetchOutcome::failed("no postings found");
        }

        let fetched = raw.len();
        let kept = source.filter(raw, profile);
        counter!("jobs_filtered_total").increment((fetched - kept.len()) as u64);
        if kept.is_empty() {
            return FetchOutcome::succeeded(0, "no matching postings");
        }

        let mut processed = 0usize;
        for posting in &kept {
            let normalized = match source.normalize(posting) {
                Ok(n) => n,
                Err(e) => {
                    tracing::warn!(
                        target: "pipeline",
                        source = name,
                        error = ?e,
                        "dropping invalid posting"
                    );
                    continue;
                }
            };
            match self.store.upsert(&normalized).await {
                Ok(Upsert::Inserted) => {
                    counter!("jobs_upserted_total").increment(1);
                }
                Ok(Upsert::Updated) => {}
                Err(e) => {
                    tracing::warn!(
                        target: "pipeline",
                        source = name,
                        hash = %normalized.hash,
                        error = ?e,
                        "upsert failed, skipping posting"
                    );
                    continue;
                }
            }
            if let Err(e) = self.store.link_user(user_id, &normalized.hash).await {
                tracing::warn!(
                    target: "pipeline",
                    source = name,
                    hash = %normalized.hash,
                    error = ?e,
                    "linking posting to user failed"
                );
                continue;
            }
            processed += 1;
        }

        counter!("jobs_kept_total").increment(processed as u64);
        FetchOutcome::succeeded(processed, format!("processed {processed} postings"))
    }
}
