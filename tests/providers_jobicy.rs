// tests/providers_jobicy.rs
use job_radar::sources::JobicySource;
use job_radar::types::JobSource;
use job_radar::{SourceConfig, UserProfile};

const FIXTURE: &str = include_str!("fixtures/jobicy.json");

fn source() -> JobicySource {
    // Jobicy exposes industry labels, not skill tags; the shipped config
    // lowers the overlap minimum to one there.
    JobicySource::new(SourceConfig {
        min_skill_matches: 1,
        ..SourceConfig::default()
    })
}

fn profile() -> UserProfile {
    UserProfile::new("Backend Developer", vec!["Python".into(), "SQL".into()])
}

#[test]
fn parses_the_jobs_array() {
    let raw = JobicySource::parse_response(FIXTURE).unwrap();
    assert_eq!(raw.len(), 3);
}

#[test]
fn filter_uses_industry_labels_as_tags() {
    let src = source();
    let raw = JobicySource::parse_response(FIXTURE).unwrap();
    let kept = src.filter(raw, &profile());

    let titles: Vec<&str> = kept
        .iter()
        .filter_map(|p| p.get("jobTitle").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(titles, vec!["Backend Developer"]);
}

#[test]
fn normalize_maps_provider_field_names() {
    let src = source();
    let raw = JobicySource::parse_response(FIXTURE).unwrap();
    let n = src.normalize(&raw[0]).unwrap();

    assert_eq!(n.source, "jobicy");
    assert_eq!(n.title, "Backend Developer");
    assert_eq!(n.company, "Polar Software");
    assert_eq!(n.location.as_deref(), Some("Anywhere"));
    assert_eq!(
        n.tags,
        vec!["Software Development", "SQL", "full-time"]
    );
    // "2024-03-05 08:00:12" parsed as a bare datetime
    assert!(n.published_at.is_some());
    assert!(n.description.starts_with("Design APIs"));
}
