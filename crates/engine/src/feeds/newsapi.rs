use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::request_error;
use common::{Error, NewsItem, NewsQuery, NewsSource, Result};

const BASE_URL: &str = "https://newsapi.org/v2/everything";
const TIMEOUT: Duration = Duration::from_secs(20);

/// Outlets searched for crypto news.
pub const NEWS_DOMAINS: &[&str] = &[
    "coindesk.com",
    "cointelegraph.com",
    "decrypt.co",
    "theblock.co",
    "bloomberg.com",
    "reuters.com",
    "wsj.com",
    "ft.com",
];

/// NewsAPI "everything" search. Without an API key every fetch is empty.
pub struct NewsApiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn recent_news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(Vec::new());
        };

        let from = (Utc::now() - chrono::Duration::hours(i64::from(query.hours)))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let page_size = query.page_size.to_string();
        let domains = NEWS_DOMAINS.join(",");

        debug!(query = %query.query, from = %from, "Fetching news");
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query.query.as_str()),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("from", from.as_str()),
                ("sortBy", "publishedAt"),
                ("apiKey", api_key),
                ("domains", domains.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(request_error)?;

        if !status.is_success() {
            return Err(Error::Http(format!("HTTP {status}: {body}")));
        }
        parse_articles(&body)
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

fn parse_articles(body: &str) -> Result<Vec<NewsItem>> {
    let resp: EverythingResponse = serde_json::from_str(body)?;
    Ok(resp
        .articles
        .into_iter()
        .map(|a| NewsItem {
            title: a.title.unwrap_or_default(),
            description: a.description.unwrap_or_default(),
            url: a.url.unwrap_or_default(),
            published_at: a
                .published_at
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|d| d.with_timezone(&Utc)),
            source: a.source.and_then(|s| s.name).unwrap_or_default(),
        })
        .collect())
}
