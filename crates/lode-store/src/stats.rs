//! Aggregate counts over the store.

use chrono::{Duration, Utc};
use lode_core::responses::{ConceptPopularity, SourceCount, StoreStats};
use lode_core::text::round_to;

use crate::KnowledgeStore;
use crate::error::StoreError;
use crate::helpers::format_timestamp;

const TOP_ENTRIES: i64 = 5;

async fn count(
    conn: &libsql::Connection,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<u64, StoreError> {
    let mut rows = conn.query(sql, params).await?;
    let row = rows.next().await?.ok_or(StoreError::NoResult)?;
    Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
}

impl KnowledgeStore {
    /// Table sizes, recent activity, and the most common sources and concepts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any query fails.
    #[allow(clippy::cast_precision_loss)]
    pub async fn get_stats(&self) -> Result<StoreStats, StoreError> {
        let conn = self.connect().await?;
        let tx = conn.transaction().await?;

        let total_queries = count(&tx, "SELECT COUNT(*) FROM queries", ()).await?;
        let total_facts = count(&tx, "SELECT COUNT(*) FROM facts", ()).await?;
        let total_concepts = count(&tx, "SELECT COUNT(*) FROM knowledge_base", ()).await?;
        let day_ago = format_timestamp(Utc::now() - Duration::hours(24));
        let recent_queries_24h = count(
            &tx,
            "SELECT COUNT(*) FROM queries WHERE timestamp > ?1",
            [day_ago.as_str()],
        )
        .await?;

        let mut rows = tx
            .query("SELECT COALESCE(AVG(confidence), 0.0) FROM queries", ())
            .await?;
        let average_confidence = match rows.next().await? {
            Some(row) => row.get::<f64>(0)?,
            None => 0.0,
        };
        drop(rows);

        let mut rows = tx
            .query(
                "SELECT source, COUNT(*) AS n FROM facts GROUP BY source ORDER BY n DESC, source LIMIT ?1",
                [TOP_ENTRIES],
            )
            .await?;
        let mut top_sources = Vec::new();
        while let Some(row) = rows.next().await? {
            top_sources.push(SourceCount {
                source: row.get::<String>(0)?,
                count: u64::try_from(row.get::<i64>(1)?).unwrap_or_default(),
            });
        }
        drop(rows);

        let mut rows = tx
            .query(
                "SELECT concept, popularity FROM knowledge_base ORDER BY popularity DESC, concept LIMIT ?1",
                [TOP_ENTRIES],
            )
            .await?;
        let mut top_concepts = Vec::new();
        while let Some(row) = rows.next().await? {
            top_concepts.push(ConceptPopularity {
                concept: row.get::<String>(0)?,
                popularity: row.get::<f64>(1)?,
            });
        }
        drop(rows);
        tx.commit().await?;

        let bytes = tokio::fs::metadata(&self.path).await.map_or(0, |m| m.len());
        Ok(StoreStats {
            total_queries,
            total_facts,
            total_concepts,
            recent_queries_24h,
            average_confidence: round_to(average_confidence, 3),
            top_sources,
            top_concepts,
            database_size_mb: round_to(bytes as f64 / (1024.0 * 1024.0), 2),
        })
    }
}
