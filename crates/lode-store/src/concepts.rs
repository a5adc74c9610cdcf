//! The concept index: terms learned from answered queries.

use chrono::Utc;
use libsql::params;
use lode_core::entities::KnowledgeConcept;
use lode_core::responses::KeyInformation;

use crate::KnowledgeStore;
use crate::error::StoreError;
use crate::helpers::{concept_key, format_timestamp, parse_datetime, parse_json_list};

const NEW_CONCEPT_POPULARITY: f64 = 1.0;
const REUSE_POPULARITY_BOOST: f64 = 0.1;
/// Words of a main fact that name its concept.
const FACT_CONCEPT_WORDS: usize = 3;
const MIN_CONCEPT_CHARS: usize = 3;
const MAX_CONCEPT_CHARS: usize = 99;

const CONCEPT_COLS: &str =
    "id, concept, definition, related_facts_json, popularity, last_accessed, created_at, updated_at";

fn row_to_concept(row: &libsql::Row) -> Result<KnowledgeConcept, StoreError> {
    Ok(KnowledgeConcept {
        id: row.get::<i64>(0)?,
        concept: row.get::<String>(1)?,
        definition: row.get::<String>(2)?,
        related_query_ids: parse_json_list(&row.get::<String>(3)?)?,
        popularity: row.get::<f64>(4)?,
        last_accessed_at: parse_datetime(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// `(concept, definition)` pairs named by key information: each definition's
/// term, then the opening words of each main fact.
fn concepts_in(info: &KeyInformation) -> Vec<(String, String)> {
    let definitions = info
        .definitions
        .iter()
        .map(|d| (concept_key(&d.term), d.definition.clone()));
    let main_facts = info.main_facts.iter().map(|f| {
        let opening: Vec<&str> = f.fact.split_whitespace().take(FACT_CONCEPT_WORDS).collect();
        (concept_key(&opening.join(" ")), f.fact.clone())
    });
    definitions
        .chain(main_facts)
        .filter(|(concept, _)| (MIN_CONCEPT_CHARS..=MAX_CONCEPT_CHARS).contains(&concept.chars().count()))
        .collect()
}

impl KnowledgeStore {
    /// Insert or refresh every concept named by `info`. A new concept starts at
    /// popularity 1.0; each later mention adds 0.1 and links `query_id`.
    pub(crate) async fn upsert_concepts(
        conn: &libsql::Connection,
        info: &KeyInformation,
        query_id: i64,
        now: &str,
    ) -> Result<(), StoreError> {
        for (concept, definition) in concepts_in(info) {
            let mut rows = conn
                .query(
                    "SELECT related_facts_json FROM knowledge_base WHERE concept = ?1",
                    [concept.as_str()],
                )
                .await?;
            let existing = match rows.next().await? {
                Some(row) => Some(parse_json_list::<i64>(&row.get::<String>(0)?)?),
                None => None,
            };
            drop(rows);

            match existing {
                Some(mut related) => {
                    if !related.contains(&query_id) {
                        related.push(query_id);
                    }
                    conn.execute(
                        "UPDATE knowledge_base
                         SET definition = ?2, related_facts_json = ?3, popularity = popularity + ?4,
                             last_accessed = ?5, updated_at = ?5
                         WHERE concept = ?1",
                        params![
                            concept.as_str(),
                            definition.as_str(),
                            serde_json::to_string(&related)?,
                            REUSE_POPULARITY_BOOST,
                            now
                        ],
                    )
                    .await?;
                }
                None => {
                    conn.execute(
                        "INSERT INTO knowledge_base
                         (concept, definition, related_facts_json, popularity, last_accessed, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?5)",
                        params![
                            concept.as_str(),
                            definition.as_str(),
                            serde_json::to_string(&[query_id])?,
                            NEW_CONCEPT_POPULARITY,
                            now
                        ],
                    )
                    .await?;
                }
            }
        }
        Ok(())
    }

    /// Look up one concept by name (case and spacing ignored), marking it as
    /// accessed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup or the access update fails.
    pub async fn get_concept(&self, name: &str) -> Result<Option<KnowledgeConcept>, StoreError> {
        let key = concept_key(name);
        let conn = self.connect().await?;
        let tx = conn.transaction().await?;

        let now = format_timestamp(Utc::now());
        let updated = tx
            .execute(
                "UPDATE knowledge_base SET last_accessed = ?2 WHERE concept = ?1",
                params![key.as_str(), now.as_str()],
            )
            .await?;
        if updated == 0 {
            tx.commit().await?;
            return Ok(None);
        }

        let mut rows = tx
            .query(
                &format!("SELECT {CONCEPT_COLS} FROM knowledge_base WHERE concept = ?1"),
                [key.as_str()],
            )
            .await?;
        let concept = rows
            .next()
            .await?
            .map(|row| row_to_concept(&row))
            .transpose()?;
        drop(rows);
        tx.commit().await?;
        Ok(concept)
    }

    /// Concepts whose name or definition contains `term`, most popular first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lookup fails.
    pub async fn search_knowledge_base(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<KnowledgeConcept>, StoreError> {
        let pattern = format!("%{}%", term.trim().to_lowercase());
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let conn = self.connect().await?;
        let tx = conn.transaction().await?;
        let mut rows = tx
            .query(
                &format!(
                    "SELECT {CONCEPT_COLS} FROM knowledge_base
                     WHERE LOWER(concept) LIKE ?1 OR LOWER(definition) LIKE ?1
                     ORDER BY popularity DESC, last_accessed DESC
                     LIMIT ?2"
                ),
                params![pattern, limit],
            )
            .await?;
        let mut concepts = Vec::new();
        while let Some(row) = rows.next().await? {
            concepts.push(row_to_concept(&row)?);
        }
        drop(rows);
        tx.commit().await?;
        Ok(concepts)
    }
}
