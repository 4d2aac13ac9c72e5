// src/store/topics.rs - Topic reads and the batch redirect write

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio_postgres::types::ToSql;

use crate::models::core::{RedirectInstruction, TopicRecord};
use crate::store::db_connect::PgPool;

/// Counters for rows skipped while loading candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct CandidateLoadStats {
    pub fetched: usize,
    pub skipped_malformed: usize,
}

/// Load the candidate set for one dedup run. Rows already excluded from
/// deduplication (previously redirected entries) are filtered in SQL;
/// rows with a missing id or blank name are skipped per-record and
/// counted, never failing the run.
pub async fn fetch_candidate_topics(pool: &PgPool) -> Result<(Vec<TopicRecord>, CandidateLoadStats)> {
    let conn = pool
        .get()
        .await
        .context("Failed to get DB connection for fetch_candidate_topics")?;

    const SELECT_SQL: &str = "
        SELECT id, name, popularity_score, is_live, canonical_path
        FROM public.topic
        WHERE exclude_from_dedupe = FALSE AND redirect = FALSE";

    let rows = conn
        .query(SELECT_SQL, &[])
        .await
        .context("Failed to query candidate topics")?;

    let mut stats = CandidateLoadStats {
        fetched: rows.len(),
        ..Default::default()
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let id: Option<String> = row.get("id");
        let name: Option<String> = row.get("name");
        let (Some(id), Some(name)) = (id, name) else {
            stats.skipped_malformed += 1;
            continue;
        };
        if name.trim().is_empty() {
            stats.skipped_malformed += 1;
            continue;
        }
        records.push(TopicRecord {
            id,
            name,
            popularity_score: row.get::<_, Option<i64>>("popularity_score").unwrap_or(0),
            is_live: row.get::<_, Option<bool>>("is_live").unwrap_or(false),
            canonical_path: row
                .get::<_, Option<String>>("canonical_path")
                .unwrap_or_default(),
            exclude_from_dedupe: false,
        });
    }

    if stats.skipped_malformed > 0 {
        warn!(
            "Skipped {} malformed candidate row(s) while loading topics",
            stats.skipped_malformed
        );
    }
    debug!("Loaded {} candidate topics", records.len());

    Ok((records, stats))
}

/// Apply every redirect instruction in exactly one batch statement inside
/// one transaction: duplicates get `redirect = TRUE`, `is_live = FALSE`,
/// and the main entry's canonical path. An empty batch is a no-op success.
pub async fn apply_redirect_batch(
    pool: &PgPool,
    instructions: &[RedirectInstruction],
) -> Result<u64> {
    if instructions.is_empty() {
        debug!("Empty redirect batch, nothing to apply");
        return Ok(0);
    }

    info!("Batch applying {} redirect(s)", instructions.len());

    let mut conn = pool
        .get()
        .await
        .context("Failed to get DB connection for apply_redirect_batch")?;

    let transaction = conn
        .transaction()
        .await
        .context("Failed to start transaction for redirect batch")?;

    let mut values_clause_parts = Vec::new();
    let mut params: Vec<Box<dyn ToSql + Sync + Send>> = Vec::new();
    let mut param_idx = 1;

    for instruction in instructions {
        values_clause_parts.push(format!("(${}::text, ${}::text)", param_idx, param_idx + 1));
        params.push(Box::new(instruction.duplicate_id.clone()));
        params.push(Box::new(instruction.target_path.clone()));
        param_idx += 2;
    }

    let update_sql = format!(
        "UPDATE public.topic AS t SET
            redirect = TRUE,
            is_live = FALSE,
            canonical_path = v.target_path,
            updated_at = CURRENT_TIMESTAMP
         FROM (VALUES {}) AS v(id, target_path)
         WHERE t.id = v.id",
        values_clause_parts.join(", ")
    );

    let params_slice: Vec<&(dyn ToSql + Sync)> = params
        .iter()
        .map(|p| p.as_ref() as &(dyn ToSql + Sync))
        .collect();

    let rows_affected = transaction
        .execute(update_sql.as_str(), params_slice.as_slice())
        .await
        .context("Failed to execute redirect batch update")?;

    transaction
        .commit()
        .await
        .context("Failed to commit redirect batch transaction")?;

    if rows_affected as usize != instructions.len() {
        warn!(
            "Redirect batch row count mismatch: expected {}, updated {}",
            instructions.len(),
            rows_affected
        );
    } else {
        info!("Redirect batch applied: {} row(s) updated", rows_affected);
    }

    Ok(rows_affected)
}
