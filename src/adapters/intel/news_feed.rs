//! News search API feed adapter. Implements NewsFeedPort with a plain
//! keyword query over the last day of coverage.

use crate::adapters::intel::extract::indicators_from_content;
use crate::domain::{DomainError, NewsArticle, ScamType, UrgencyLevel};
use crate::ports::{FeedBatch, NewsFeedPort};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

const SOURCE_NAME: &str = "newswire";

const QUERY: &str = "elderly scam OR senior fraud OR grandparent scam OR medicare fraud";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<SearchArticle>,
}

#[derive(Deserialize)]
struct SearchArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    source: Option<SearchSource>,
}

#[derive(Deserialize)]
struct SearchSource {
    name: Option<String>,
}

/// News search API adapter.
pub struct NewsApiFeed {
    client: Arc<Client>,
    api_url: String,
    api_key: String,
}

impl NewsApiFeed {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl NewsFeedPort for NewsApiFeed {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn collect(&self) -> Result<FeedBatch, DomainError> {
        let yesterday = (chrono::Utc::now() - chrono::Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", QUERY),
                ("from", yesterday.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Feed(format!("news request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DomainError::Feed(format!(
                "news API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Feed(format!("bad news response: {}", e)))?;

        let articles: Vec<NewsArticle> = search
            .articles
            .into_iter()
            .map(|a| {
                let description = a.description.unwrap_or_default();
                let key_indicators = indicators_from_content(&description);
                NewsArticle {
                    scam_type: ScamType::classify(&key_indicators),
                    title: a.title.unwrap_or_default(),
                    description,
                    url: a.url.unwrap_or_default(),
                    published: a.published_at.unwrap_or_default(),
                    source: a
                        .source
                        .and_then(|s| s.name)
                        .unwrap_or_else(|| SOURCE_NAME.to_string()),
                    urgency: UrgencyLevel::Medium,
                    // Query is elderly-targeted, so results are treated as such
                    elderly_specific: true,
                    key_indicators,
                }
            })
            .collect();

        info!(count = articles.len(), "collected newswire articles");

        Ok(FeedBatch {
            source: SOURCE_NAME.to_string(),
            articles,
            snapshot_id: None,
        })
    }
}
