//! Demo that runs one aggregate pass over the real providers for a sample
//! profile and prints the per-source outcome table.

use std::sync::Arc;

use job_radar::sources::{ArbeitnowSource, JobicySource, RemotiveSource};
use job_radar::{AppConfig, MemoryStore, SourceRegistry, UserProfile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = AppConfig::load_default()?;
    let store = Arc::new(MemoryStore::new());
    let registry = SourceRegistry::with_sources(
        store.clone(),
        vec![
            Box::new(RemotiveSource::new(cfg.source("remotive"))),
            Box::new(ArbeitnowSource::new(cfg.source("arbeitnow"))),
            Box::new(JobicySource::new(cfg.source("jobicy"))),
        ],
    );

    let profile = UserProfile::new(
        "Backend Developer",
        vec!["Python".into(), "Django".into(), "SQL".into()],
    );

    let result = registry.fetch_and_process_all("demo-user", &profile).await;

    for (source, outcome) in &result.per_source {
        println!(
            "{source:>10}  success={}  processed={}  {}",
            outcome.success, outcome.processed, outcome.message
        );
    }
    println!(
        "total processed: {} (stored postings: {})",
        result.total_processed,
        store.posting_count()
    );

    Ok(())
}
