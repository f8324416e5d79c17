//! News lookup client and its `get_news` tool wrapper.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::config::CourierConfig;
use crate::error::{CourierError, Result};
use crate::service::http::shared_client;
use crate::tools::tool::{AgentTool, Tool};
use crate::tools::types::{require_str, AgentToolParameters};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_PAGE_SIZE: u32 = 5;

/// Client for the article search endpoint.
///
/// Lookup failures (transport errors, non-200 responses) degrade to an empty
/// result set. Losing optional context is preferable to aborting the turn,
/// so callers must treat an empty list as "no data", not as an error.
#[derive(Debug, Clone)]
pub struct NewsClient {
    api_key: String,
    base_url: String,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    source: ArticleSource,
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

impl NewsClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Build from config; requires a `news` API key.
    pub fn from_config(config: &CourierConfig) -> Result<Self> {
        let api_key = config.get_api_key("news").ok_or_else(|| {
            CourierError::Configuration("missing news API key (set NEWS_API_KEY)".to_string())
        })?;
        Ok(Self::new(api_key, config.get_base_url("news")))
    }

    /// Fetch the most relevant articles for a topic, formatted as one
    /// textual record per article. Empty on any provider-side failure.
    pub async fn fetch(&self, topic: &str) -> Vec<String> {
        let url = format!("{}/everything", self.base_url);
        let page_size = self.page_size.to_string();
        let request = shared_client().get(&url).query(&[
            ("q", topic),
            ("apiKey", self.api_key.as_str()),
            ("pageSize", page_size.as_str()),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(topic, error = %err, "news lookup failed, degrading to empty result");
                return Vec::new();
            }
        };

        if response.status().as_u16() != 200 {
            warn!(
                topic,
                status = response.status().as_u16(),
                "news lookup returned non-200, degrading to empty result"
            );
            return Vec::new();
        }

        let body: EverythingResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(topic, error = %err, "news payload decode failed, degrading to empty result");
                return Vec::new();
            }
        };

        body.articles.iter().map(format_article).collect()
    }
}

fn format_article(article: &Article) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or("unknown").to_string();
    format!(
        "Title: {},\nAuthor: {},\nSource: {},\nDescription: {},\nURL: {},\nContent: {}",
        field(&article.title),
        field(&article.author),
        field(&article.source.name),
        field(&article.description),
        field(&article.url),
        field(&article.content),
    )
}

/// Create the `get_news` tool backed by a [`NewsClient`].
///
/// The tool output is the fetched records joined by blank lines; an empty
/// string when the lookup found nothing.
pub fn news_tool(client: Arc<NewsClient>) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "get_news",
        "Search recent news articles on a topic",
        AgentToolParameters::object()
            .string("topic", "The topic to search news for", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let topic = require_str(&args, "topic")?;
                let records = client.fetch(topic).await;
                Ok(records.join("\n\n"))
            }
        },
    ))
}
