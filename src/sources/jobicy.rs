// src/sources/jobicy.rs
//! Jobicy adapter. Payload shape: `{"jobs": [{jobTitle, companyName,
//! jobDescription, jobGeo, jobIndustry, jobType, url, pubDate}]}`.
//! `pubDate` is a bare "YYYY-MM-DD HH:MM:SS" timestamp.

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::SourceConfig;
use crate::normalize;
use crate::sources;
use crate::types::{fingerprint, JobSource, NormalizedPosting, RawPosting, UserProfile};

const NAME: &str = "jobicy";
const DEFAULT_URL: &str = "https://jobicy.com/api/v2/remote-jobs";

pub struct JobicySource {
    cfg: SourceConfig,
    client: reqwest::Client,
}

impl JobicySource {
    pub fn new(cfg: SourceConfig) -> Self {
        Self {
            cfg,
            client: reqwest::Client::new(),
        }
    }

    pub fn parse_response(body: &str) -> Result<Vec<RawPosting>> {
        #[derive(serde::Deserialize)]
        struct Payload {
            #[serde(default)]
            jobs: Vec<serde_json::Value>,
        }
        let payload: Payload = serde_json::from_str(body).context("jobicy: parsing json")?;
        Ok(payload
            .jobs
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::Object(m) => Some(m),
                _ => None,
            })
            .collect())
    }

    /// Jobicy has no skill tags proper; industry and job-type labels are the
    /// closest signal it exposes.
    fn tags_of(posting: &RawPosting) -> Vec<String> {
        let mut tags = sources::string_list(posting, "jobIndustry");
        tags.extend(sources::string_list(posting, "jobType"));
        tags
    }
}

#[async_trait]
impl JobSource for JobicySource {
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
                let tags = Self::tags_of(p);
                sources::passes_profile(
                    sources::str_field(p, "jobTitle").unwrap_or_default(),
                    sources::str_field(p, "jobDescription").unwrap_or_default(),
                    &tags,
                    sources::str_field(p, "url"),
                    profile,
                    &self.cfg,
                )
            })
            .collect()
    }

    fn normalize(&self, posting: &RawPosting) -> Result<NormalizedPosting> {
        let title = sources::str_field(posting, "jobTitle")
            .unwrap_or_default()
            .trim()
            .to_string();
        let company = sources::str_field(posting, "companyName")
            .unwrap_or_default()
            .trim()
            .to_string();
        let url = sources::str_field(posting, "url")
            .unwrap_or_default()
            .trim()
            .to_string();
        // Jobicy republishes listings under fresh URLs; title+company+url is
        // the stable subset.
        let hash = fingerprint(NAME, &[&title, &company, &url]);
        NormalizedPosting {
            title,
            company,
            description: normalize::clean_html(
                sources::str_field(posting, "jobDescription").unwrap_or_default(),
            ),
            location: sources::opt_field(posting, "jobGeo"),
            tags: Self::tags_of(posting),
            url,
            source: NAME.to_string(),
            hash,
            published_at: sources::parse_published_at(posting.get("pubDate")),
        }
        .ensure_required()
    }
}
