// tests/dedup_upsert.rs
//! Running the pipeline twice over an unchanged upstream response must not
//! duplicate stored postings or user links.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use job_radar::sources::RemotiveSource;
use job_radar::types::{JobSource, NormalizedPosting, RawPosting};
use job_radar::{MemoryStore, SourceConfig, SourceRegistry, UserProfile};

struct FixtureRemotive(RemotiveSource);

#[async_trait]
impl JobSource for FixtureRemotive {
    fn name(&self) -> &'static str {
        "remotive"
    }
    async fn fetch_raw(&self) -> Result<Vec<RawPosting>> {
        RemotiveSource::parse_response(include_str!("fixtures/remotive.json"))
    }
    fn filter(&self, postings: Vec<RawPosting>, profile: &UserProfile) -> Vec<RawPosting> {
        self.0.filter(postings, profile)
    }
    fn normalize(&self, posting: &RawPosting) -> Result<NormalizedPosting> {
        self.0.normalize(posting)
    }
}

#[tokio::test]
async fn repeated_runs_upsert_instead_of_duplicating() {
    let store = Arc::new(MemoryStore::new());
    let registry = SourceRegistry::with_sources(
        store.clone(),
        vec![Box::new(FixtureRemotive(RemotiveSource::new(
            SourceConfig::default(),
        )))],
    );
    let profile = UserProfile::new(
        "Backend Developer",
        vec!["Python".into(), "Django".into(), "SQL".into()],
    );

    let first = registry.fetch_and_process_all("alice", &profile).await;
    let second = registry.fetch_and_process_all("alice", &profile).await;

    // Both runs process the same postings; the store holds each hash once.
    assert_eq!(first.total_processed, 4);
    assert_eq!(second.total_processed, 4);
    assert_eq!(store.posting_count(), 4);
    assert_eq!(store.links_for("alice").len(), 4);
}

#[tokio::test]
async fn second_user_shares_postings_but_gets_own_links() {
    let store = Arc::new(MemoryStore::new());
    let registry = SourceRegistry::with_sources(
        store.clone(),
        vec![Box::new(FixtureRemotive(RemotiveSource::new(
            SourceConfig::default(),
        )))],
    );
    let profile = UserProfile::new(
        "Backend Developer",
        vec!["Python".into(), "Django".into(), "SQL".into()],
    );

    registry.fetch_and_process_all("alice", &profile).await;
    registry.fetch_and_process_all("bob", &profile).await;

    assert_eq!(store.posting_count(), 4);
    assert_eq!(store.links_for("alice").len(), 4);
    assert_eq!(store.links_for("bob").len(), 4);
}
