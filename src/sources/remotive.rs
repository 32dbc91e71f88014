// src/sources/remotive.rs
//! Remotive adapter. Payload shape: `{"jobs": [{title, company_name,
//! description, candidate_required_location, tags, url, publication_date}]}`.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::normalize;
use crate::sources;
use crate::types::{fingerprint, JobSource, NormalizedPosting, RawPosting, UserProfile};

const NAME: &str = "remotive";
const DEFAULT_URL: &str = "https://remotive.com/api/remote-jobs";

pub struct RemotiveSource {
    cfg: SourceConfig,
    client: reqwest::Client,
}

impl RemotiveSource {
    pub fn new(cfg: SourceConfig) -> Self {
        Self {
            cfg,
            client: reqwest::Client::new(),
        }
    }

    /// Parse the provider body into raw postings. Pure, so fixture-driven
    /// tests exercise it without a network.
    pub fn parse_response(body: &str) -> Result<Vec<RawPosting>> {
        #[derive(serde::Deserialize)]
        struct Payload {
            #[serde(default)]
            jobs: Vec<serde_json::Value>,
        }
        let payload: Payload = serde_json::from_str(body).context("remotive: parsing json")?;
        Ok(payload
            .jobs
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::Object(m) => Some(m),
                _ => None,
            })
            .collect())
    }
}

#[async_trait]
impl JobSource for RemotiveSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch_raw(&self) -> Result<Vec<RawPosting>> {
        sources::fetch_capped(NAME, &self.cfg, &self.client, DEFAULT_URL, Self::parse_response)
            .await
    }

    fn filter(&self, postings: Vec<RawPosting>, profile: &UserProfile) -> Vec<RawPosting> {
        postings
            .into_iter()
            .filter(|p| {
                let tags = sources::string_list(p, "tags");
                sources::passes_profile(
                    sources::str_field(p, "title").unwrap_or_default(),
                    sources::str_field(p, "description").unwrap_or_default(),
                    &tags,
                    sources::str_field(p, "url"),
                    profile,
                    &self.cfg,
                )
            })
            .collect()
    }

    fn normalize(&self, posting: &RawPosting) -> Result<NormalizedPosting> {
        let title = sources::str_field(posting, "title")
            .unwrap_or_default()
            .trim()
            .to_string();
        let company = sources::str_field(posting, "company_name")
            .unwrap_or_default()
            .trim()
            .to_string();
        let url = sources::str_field(posting, "url")
            .unwrap_or_default()
            .trim()
            .to_string();
        let hash = fingerprint(NAME, &[&url]);
        NormalizedPosting {
            title,
            company,
            description: normalize::clean_html(
                sources::str_field(posting, "description").unwrap_or_default(),
            ),
            location: sources::opt_field(posting, "candidate_required_location"),
            tags: sources::string_list(posting, "tags"),
            url,
            source: NAME.to_string(),
            hash,
            published_at: sources::parse_published_at(posting.get("publication_date")),
        }
        .ensure_required()
    }
}
