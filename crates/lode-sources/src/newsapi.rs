//! NewsAPI `/v2/everything` adapter.

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use serde::Deserialize;

use crate::SourceAdapter;
use crate::error::SourceError;
use crate::http::SourceClient;

const ENDPOINT: &str = "https://newsapi.org/v2/everything";

const RELEVANCE: f64 = 0.8;

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    content: Option<String>,
    published_at: Option<String>,
    author: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

pub struct NewsApiAdapter {
    client: SourceClient,
    api_key: String,
}

impl NewsApiAdapter {
    pub fn new(client: SourceClient, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for NewsApiAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::NewsApi
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::NotConfigured(SourceKind::NewsApi));
        }
        let url = format!(
            "{ENDPOINT}?q={}&apiKey={}&sortBy=relevancy&pageSize={}&language=en",
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key),
            max_results.max(1)
        );
        let data: NewsResponse = self.client.get(&url).await?.json().await?;
        Ok(into_results(data, max_results))
    }
}

/// Articles without a title or URL are dropped; the snippet is the
/// description, or the truncated body when there is none.
fn into_results(data: NewsResponse, max_results: usize) -> Vec<SearchResult> {
    data.articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title.filter(|t| !t.is_empty())?;
            let url = article.url.filter(|u| !u.is_empty())?;
            let snippet = article
                .description
                .filter(|d| !d.is_empty())
                .or(article.content)
                .unwrap_or_default();
            let mut hit = SearchResult::new(SourceKind::NewsApi, title, url, snippet, RELEVANCE);
            if let Some(published) = article.published_at {
                hit = hit.with_metadata("published_at", published);
            }
            if let Some(name) = article.source.and_then(|s| s.name) {
                hit = hit.with_metadata("publisher", name);
            }
            if let Some(author) = article.author {
                hit = hit.with_metadata("author", author);
            }
            Some(hit)
        })
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {
                "source": {"id": null, "name": "The Verge"},
                "author": "Jane Doe",
                "title": "Rust 2024 edition ships",
                "description": "The Rust 2024 edition is now stable.",
                "url": "https://www.theverge.com/rust-2024",
                "publishedAt": "2025-02-20T16:00:00Z",
                "content": "Full article text..."
            },
            {
                "source": {"id": null, "name": "Blog"},
                "author": null,
                "title": "Async closures land",
                "description": null,
                "url": "https://blog.example.com/async-closures",
                "publishedAt": "2025-02-21T09:30:00Z",
                "content": "Async closures are stable in 1.85."
            },
            {
                "source": {"id": null, "name": "[Removed]"},
                "author": null,
                "title": null,
                "description": null,
                "url": null,
                "publishedAt": "1970-01-01T00:00:00Z",
                "content": null
            }
        ]
    }"#;

    #[test]
    fn maps_articles_and_skips_removed() {
        let data: NewsResponse = serde_json::from_str(FIXTURE).unwrap();
        let results = into_results(data, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].snippet, "The Rust 2024 edition is now stable.");
        assert_eq!(
            results[0].metadata.get("publisher"),
            Some(&serde_json::json!("The Verge"))
        );
        assert_eq!(results[1].snippet, "Async closures are stable in 1.85.");
        assert!(results[1].metadata.get("author").is_none());
    }

    #[test]
    fn error_payload_without_articles_is_empty() {
        let data: NewsResponse =
            serde_json::from_str(r#"{"status": "error", "code": "apiKeyInvalid"}"#).unwrap();
        assert!(into_results(data, 5).is_empty());
    }
}
