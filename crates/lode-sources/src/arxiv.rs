//! arXiv export API adapter.
//!
//! The API answers with an Atom feed, deserialized with `quick-xml`. Only
//! `title`, `summary`, `id`, and `published` are read from each entry.

use async_trait::async_trait;
use lode_core::entities::SearchResult;
use lode_core::enums::SourceKind;
use lode_core::text::{normalize_whitespace, preview};
use serde::Deserialize;

use crate::SourceAdapter;
use crate::error::SourceError;
use crate::http::SourceClient;

const ENDPOINT: &str = "https://export.arxiv.org/api/query";

const RELEVANCE: f64 = 0.9;

const SNIPPET_CHARS: usize = 300;

// ── Atom wire format ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    id: Text,
    #[serde(default)]
    title: Text,
    #[serde(default)]
    summary: Text,
    published: Option<Text>,
}

/// Element text; attributes such as `type="html"` are ignored.
#[derive(Debug, Default, Deserialize)]
struct Text {
    #[serde(rename = "$text", default)]
    value: String,
}

impl Text {
    fn normalized(&self) -> String {
        normalize_whitespace(&self.value)
    }
}

pub struct ArxivAdapter {
    client: SourceClient,
}

impl ArxivAdapter {
    pub const fn new(client: SourceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceAdapter for ArxivAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::Arxiv
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SourceError> {
        let url = format!(
            "{ENDPOINT}?search_query=all:{}&start=0&max_results={}&sortBy=relevance",
            urlencoding::encode(query),
            max_results.max(1)
        );
        let feed = self.client.get(&url).await?.text().await?;
        parse_feed(&feed, max_results)
    }
}

/// Entries missing a title or id are skipped.
fn parse_feed(feed: &str, max_results: usize) -> Result<Vec<SearchResult>, SourceError> {
    let feed: Feed =
        quick_xml::de::from_str(feed).map_err(|e| SourceError::Parse(format!("arXiv feed: {e}")))?;
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.normalized();
            let link = entry.id.normalized();
            if title.is_empty() || link.is_empty() {
                return None;
            }
            let mut hit = SearchResult::new(
                SourceKind::Arxiv,
                title,
                link,
                preview(&entry.summary.normalized(), SNIPPET_CHARS),
                RELEVANCE,
            )
            .with_metadata("type", "academic_paper");
            let published = entry.published.map(|p| p.normalized()).unwrap_or_default();
            if !published.is_empty() {
                hit = hit.with_metadata("published", published);
            }
            Some(hit)
        })
        .take(max_results)
        .collect())
}
