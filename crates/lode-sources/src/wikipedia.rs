//! Wikipedia adapter.
//!
//! Tries the REST page summary for the query as a title first. When that
//! is not a standard article (disambiguation, missing page), falls back to
//! the MediaWiki full-text search API.

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use serde::Deserialize;

use crate::SourceAdapter;
use crate::error::SourceError;
use crate::http::SourceClient;

const SUMMARY_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";
const SEARCH_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

const SUMMARY_RELEVANCE: f64 = 0.95;
const SEARCH_RELEVANCE: f64 = 0.9;

#[derive(Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Deserialize)]
struct ContentUrls {
    desktop: PageUrls,
}

#[derive(Deserialize)]
struct PageUrls {
    page: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    pageid: u64,
}

pub struct WikipediaAdapter {
    client: SourceClient,
}

impl WikipediaAdapter {
    pub const fn new(client: SourceClient) -> Self {
        Self { client }
    }

    async fn summary(&self, query: &str) -> Result<Option<SearchResult>, SourceError> {
        let url = format!("{SUMMARY_ENDPOINT}{}", title_slug(query));
        match self.client.get(&url).await {
            Ok(resp) => {
                let summary: PageSummary = resp.json().await?;
                Ok(summary_to_result(summary))
            }
            Err(SourceError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn full_text(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{SEARCH_ENDPOINT}?action=query&format=json&list=search&srsearch={}&srlimit={max_results}&origin=*",
            urlencoding::encode(query)
        );
        let data: SearchResponse = self.client.get(&url).await?.json().await?;
        Ok(search_to_results(data, max_results))
    }
}

#[async_trait]
impl SourceAdapter for WikipediaAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Wikipedia
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        if let Some(hit) = self.summary(query).await? {
            return Ok(vec![hit]);
        }
        self.full_text(query, max_results).await
    }
}

/// Page title as it appears in article URLs: spaces become underscores,
/// everything else percent-encoded.
fn title_slug(title: &str) -> String {
    urlencoding::encode(&title.trim().replace(' ', "_")).into_owned()
}

fn article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title_slug(title))
}

fn summary_to_result(summary: PageSummary) -> Option<SearchResult> {
    if summary.kind != "standard" || summary.extract.is_empty() {
        return None;
    }
    let url = summary
        .content_urls
        .map_or_else(|| article_url(&summary.title), |u| u.desktop.page);
    let mut hit = SearchResult::new(
        SourceKind::Wikipedia,
        summary.title,
        url,
        summary.extract,
        SUMMARY_RELEVANCE,
    );
    if let Some(description) = summary.description {
        hit = hit.with_metadata("description", description);
    }
    Some(hit)
}

fn search_to_results(data: SearchResponse, max_results: usize) -> Vec<SearchResult> {
    data.query
        .map(|q| q.search)
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(|hit| {
            SearchResult::new(
                SourceKind::Wikipedia,
                hit.title.clone(),
                article_url(&hit.title),
                hit.snippet,
                SEARCH_RELEVANCE,
            )
            .with_metadata("pageid", hit.pageid)
        })
        .collect()
}
