//! Cached query results and the facts behind them.

use chrono::{DateTime, Duration, Utc};
use libsql::params;
use lode_core::entities::{CachedQueryRecord, ExtractedFact, SimilarQuery, StoredFact};
use lode_core::responses::AnswerResponse;
use lode_core::text::{jaccard_similarity, word_set};

use crate::KnowledgeStore;
use crate::error::StoreError;
use crate::helpers::{
    QueryKey, format_timestamp, normalize_query, parse_datetime, parse_json_list,
};

/// Candidate words shorter than this never drive the `LIKE` prefilter.
const MIN_FILTER_WORD_CHARS: usize = 3;

/// Concepts below this popularity are dropped once they go stale.
const STALE_CONCEPT_POPULARITY: f64 = 0.1;

const RECORD_COLS: &str =
    "id, query, query_hash, user_id, mode, submode, results_json, confidence, sources_json, timestamp";

fn row_to_record(row: &libsql::Row) -> Result<CachedQueryRecord, StoreError> {
    Ok(CachedQueryRecord {
        id: row.get::<i64>(0)?,
        query_text: row.get::<String>(1)?,
        query_hash: row.get::<String>(2)?,
        user_id: row.get::<Option<String>>(3)?,
        mode: row.get::<String>(4)?,
        submode: row.get::<String>(5)?,
        result_payload: serde_json::from_str(&row.get::<String>(6)?)?,
        confidence: row.get::<f64>(7)?,
        sources: parse_json_list(&row.get::<String>(8)?)?,
        stored_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

fn row_to_fact(row: &libsql::Row) -> Result<StoredFact, StoreError> {
    Ok(StoredFact {
        id: row.get::<i64>(0)?,
        query_id: row.get::<i64>(1)?,
        text: row.get::<String>(2)?,
        source: row.get::<String>(3)?,
        source_url: row.get::<String>(4)?,
        confidence: row.get::<f64>(5)?,
        context: row.get::<String>(6)?,
        entities: parse_json_list(&row.get::<String>(7)?)?,
        stored_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Sources named by a response: its key information when present,
/// otherwise its citations.
fn response_sources(response: &AnswerResponse) -> Vec<String> {
    if let Some(info) = response.key_information.as_ref().filter(|i| !i.sources.is_empty()) {
        return info.sources.clone();
    }
    let mut sources: Vec<String> = Vec::new();
    for citation in &response.citations {
        if !sources.contains(&citation.source) {
            sources.push(citation.source.clone());
        }
    }
    sources
}

impl KnowledgeStore {
    /// Cache `response` under `key`, replacing any earlier result for the same
    /// key together with its facts, and fold the response's key information
    /// into the concept index. Returns the query row id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding or any statement fails; nothing is
    /// written in that case.
    pub async fn store_query_result(
        &self,
        key: &QueryKey<'_>,
        response: &AnswerResponse,
        facts: &[ExtractedFact],
    ) -> Result<i64, StoreError> {
        self.store_query_result_at(key, response, facts, Utc::now()).await
    }

    /// [`Self::store_query_result`] with an explicit storage time.
    ///
    /// # Errors
    ///
    /// Same as [`Self::store_query_result`].
    pub async fn store_query_result_at(
        &self,
        key: &QueryKey<'_>,
        response: &AnswerResponse,
        facts: &[ExtractedFact],
        stored_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let payload = serde_json::to_string(response)?;
        let sources = serde_json::to_string(&response_sources(response))?;
        let now = format_timestamp(stored_at);

        let conn = self.connect().await?;
        let tx = conn.transaction().await?;

        tx.execute(
            "INSERT INTO queries (query, query_hash, user_id, mode, submode, results_json, timestamp, confidence, sources_json, query_norm)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(query_hash) DO UPDATE SET
                query = excluded.query,
                query_norm = excluded.query_norm,
                results_json = excluded.results_json,
                timestamp = excluded.timestamp,
                confidence = excluded.confidence,
                sources_json = excluded.sources_json",
            params![
                key.text,
                key.hash(),
                key.user_id,
                key.mode,
                key.submode,
                payload,
                now.as_str(),
                response.confidence,
                sources,
                normalize_query(key.text)
            ],
        )
        .await?;

        let mut rows = tx
            .query("SELECT id FROM queries WHERE query_hash = ?1", [key.hash()])
            .await?;
        let query_id = rows.next().await?.ok_or(StoreError::NoResult)?.get::<i64>(0)?;

        tx.execute("DELETE FROM facts WHERE query_id = ?1", [query_id])
            .await?;
        for fact in facts {
            tx.execute(
                "INSERT INTO facts (query_id, fact, source, source_url, confidence, context, entities_json, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    query_id,
                    fact.text.as_str(),
                    fact.source.as_str(),
                    fact.source_url.as_str(),
                    fact.confidence,
                    fact.context.as_str(),
                    serde_json::to_string(&fact.entities)?,
                    now.as_str()
                ],
            )
            .await?;
        }

        if let Some(info) = &response.key_information {
            Self::upsert_concepts(&tx, info, query_id, &now).await?;
        }

        tx.commit().await?;
        tracing::debug!(query_id, facts = facts.len(), "query result stored");
        Ok(query_id)
    }

    /// Cached results whose normalized text contains a word of `query`, best match
    /// first, each paired with its Jaccard similarity to `query`.
    ///
    /// Rows whose payload no longer decodes as JSON are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    pub async fn retrieve_similar_queries(
        &self,
        query: &str,
        user_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SimilarQuery>, StoreError> {
        let words: Vec<String> = word_set(query)
            .into_iter()
            .filter(|w| w.chars().count() >= MIN_FILTER_WORD_CHARS)
            .collect();

        let mut conditions: Vec<String> = Vec::new();
        let mut values: Vec<libsql::Value> = Vec::new();
        if !words.is_empty() {
            let likes: Vec<String> = (1..=words.len()).map(|i| format!("query_norm LIKE ?{i}")).collect();
            conditions.push(format!("({})", likes.join(" OR ")));
            values.extend(words.iter().map(|w| libsql::Value::from(format!("%{w}%"))));
        }
        if let Some(user) = user_id {
            conditions.push(format!("user_id = ?{}", values.len() + 1));
            values.push(user.into());
        }
        let where_clause = if conditions.is_empty() {
            "1=1".to_string()
        } else {
            conditions.join(" AND ")
        };
        let sql = format!(
            "SELECT {RECORD_COLS} FROM queries WHERE {where_clause}
             ORDER BY confidence DESC, timestamp DESC"
        );

        let conn = self.connect().await?;
        let tx = conn.transaction().await?;
        let mut rows = tx.query(&sql, libsql::params_from_iter(values)).await?;
        let mut matches = Vec::new();
        while let Some(row) = rows.next().await? {
            match row_to_record(&row) {
                Ok(record) => {
                    let similarity = jaccard_similarity(query, &record.query_text);
                    matches.push(SimilarQuery { record, similarity });
                }
                Err(e) => tracing::warn!(%e, "skipping unreadable cached query"),
            }
        }
        drop(rows);
        tx.commit().await?;

        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches.truncate(limit);
        tracing::debug!(query, candidates = matches.len(), "similar queries retrieved");
        Ok(matches)
    }

    /// Facts stored with query `query_id`, most confident first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    pub async fn get_facts_for_query(&self, query_id: i64) -> Result<Vec<StoredFact>, StoreError> {
        let conn = self.connect().await?;
        let tx = conn.transaction().await?;
        let mut rows = tx
            .query(
                "SELECT id, query_id, fact, source, source_url, confidence, context, entities_json, timestamp
                 FROM facts WHERE query_id = ?1 ORDER BY confidence DESC, id",
                [query_id],
            )
            .await?;
        let mut facts = Vec::new();
        while let Some(row) = rows.next().await? {
            facts.push(row_to_fact(&row)?);
        }
        drop(rows);
        tx.commit().await?;
        Ok(facts)
    }

    /// Remove cached queries stored more than `older_than_days` days ago
    /// (their facts go with them) and stale, unpopular concepts. Returns the
    /// number of queries removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any statement fails; nothing is removed then.
    pub async fn clear_cache(&self, older_than_days: u32) -> Result<u64, StoreError> {
        let cutoff = format_timestamp(Utc::now() - Duration::days(i64::from(older_than_days)));

        let conn = self.connect().await?;
        let tx = conn.transaction().await?;
        let removed = tx
            .execute("DELETE FROM queries WHERE timestamp < ?1", [cutoff.as_str()])
            .await?;
        if removed > 0 {
            tx.execute(
                "DELETE FROM knowledge_base WHERE popularity < ?1 AND last_accessed < ?2",
                params![STALE_CONCEPT_POPULARITY, cutoff.as_str()],
            )
            .await?;
        }
        tx.commit().await?;

        tracing::info!(removed, older_than_days, "cache cleared");
        Ok(removed)
    }
}
