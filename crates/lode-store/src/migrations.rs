//! Embedded schema, applied on every open. All statements are idempotent.

use crate::KnowledgeStore;
use crate::error::StoreError;

const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl KnowledgeStore {
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.connect().await?;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
