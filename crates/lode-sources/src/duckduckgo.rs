//! DuckDuckGo Instant Answer adapter.
//!
//! The Instant Answer API returns an abstract, direct results, and related
//! topics rather than a ranked web index, so it yields at most a handful of
//! hits per query. No API key is needed.

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use lode_core::text::preview;
use serde::Deserialize;

use crate::SourceAdapter;
use crate::error::SourceError;
use crate::http::SourceClient;

const ENDPOINT: &str = "https://api.duckduckgo.com/";

const ABSTRACT_RELEVANCE: f64 = 0.8;
const RELATED_RELEVANCE: f64 = 0.6;
const RESULT_RELEVANCE: f64 = 0.7;

#[derive(Deserialize)]
struct InstantAnswer {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "Abstract", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "AbstractSource", default)]
    abstract_source: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<Topic>,
    #[serde(rename = "Results", default)]
    results: Vec<Topic>,
}

/// Related topics mix plain entries with named groups; groups carry no
/// `Text` and are skipped.
#[derive(Deserialize)]
struct Topic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

pub struct DuckDuckGoAdapter {
    client: SourceClient,
}

impl DuckDuckGoAdapter {
    pub const fn new(client: SourceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for DuckDuckGoAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::DuckDuckGo
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{ENDPOINT}?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );
        // The API answers with `application/x-javascript`, so decode the body by hand.
        let body = self.client.get(&url).await?.text().await?;
        let data: InstantAnswer =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(into_results(data, max_results))
    }
}

/// Abstract first, then related topics, then direct results.
fn into_results(data: InstantAnswer, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    if !data.abstract_text.is_empty() {
        let mut hit = SearchResult::new(
            SourceKind::DuckDuckGo,
            data.heading,
            data.abstract_url,
            data.abstract_text,
            ABSTRACT_RELEVANCE,
        );
        if !data.abstract_source.is_empty() {
            hit = hit.with_metadata("abstract_source", data.abstract_source);
        }
        results.push(hit);
    }

    let topics = data
        .related_topics
        .into_iter()
        .map(|t| (t, RELATED_RELEVANCE))
        .chain(data.results.into_iter().map(|t| (t, RESULT_RELEVANCE)));
    for (topic, relevance) in topics {
        let Some(text) = topic.text.filter(|t| !t.is_empty()) else {
            continue;
        };
        results.push(SearchResult::new(
            SourceKind::DuckDuckGo,
            preview(&text, 100),
            topic.first_url,
            text,
            relevance,
        ));
    }

    results.truncate(max_results);
    results
}
