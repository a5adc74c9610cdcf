//! Google Programmable Search (Custom Search JSON API) adapter.

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use serde::Deserialize;

use crate::SourceAdapter;
use crate::error::SourceError;
use crate::http::SourceClient;

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API refuses `num` above 10.
const MAX_PAGE: usize = 10;

const RELEVANCE: f64 = 0.9;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    formatted_url: Option<String>,
}

pub struct GoogleAdapter {
    client: SourceClient,
    api_key: String,
    cse_id: String,
}

impl GoogleAdapter {
    pub fn new(client: SourceClient, api_key: impl Into<String>, cse_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            cse_id: cse_id.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for GoogleAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Google
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        if self.api_key.is_empty() || self.cse_id.is_empty() {
            return Err(SourceError::NotConfigured(SourceKind::Google));
        }
        let num = max_results.clamp(1, MAX_PAGE);
        let url = format!(
            "{ENDPOINT}?key={}&cx={}&q={}&num={num}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.cse_id),
            urlencoding::encode(query)
        );
        let data: SearchResponse = self.client.get(&url).await?.json().await?;
        Ok(into_results(data, num))
    }
}

fn into_results(data: SearchResponse, max_results: usize) -> Vec<SearchResult> {
    data.items
        .into_iter()
        .take(max_results)
        .map(|item| {
            let hit = SearchResult::new(SourceKind::Google, item.title, item.link, item.snippet, RELEVANCE);
            match item.formatted_url {
                Some(formatted) => hit.with_metadata("formatted_url", formatted),
                None => hit,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "kind": "customsearch#search",
        "items": [
            {
                "kind": "customsearch#result",
                "title": "Tokio - An asynchronous Rust runtime",
                "link": "https://tokio.rs/",
                "formattedUrl": "https://tokio.rs/",
                "snippet": "Tokio is an asynchronous runtime for the Rust programming language."
            },
            {
                "kind": "customsearch#result",
                "title": "tokio - crates.io",
                "link": "https://crates.io/crates/tokio",
                "snippet": "An event-driven, non-blocking I/O platform."
            }
        ]
    }"#;

    #[test]
    fn maps_items() {
        let data: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let results = into_results(data, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://tokio.rs/");
        assert_eq!(
            results[0].metadata.get("formatted_url"),
            Some(&serde_json::json!("https://tokio.rs/"))
        );
        assert!(results[1].metadata.is_empty());
        assert!((results[1].relevance_score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn no_items_is_empty() {
        let data: SearchResponse =
            serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(into_results(data, 10).is_empty());
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_network() {
        let client = SourceClient::new("lodestar-test", std::time::Duration::from_secs(1)).unwrap();
        let adapter = GoogleAdapter::new(client, "", "");
        let err = adapter.search("rust", 5).await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured(SourceKind::Google)));
    }
}
