// src/pipeline.rs - Preview and apply orchestration
//
// Preview: load candidates, run the deterministic clustering pass, offer
// the leftover singletons to the semantic matcher (when one is configured),
// and assemble the terminal result payload. The deterministic pass never
// fails; a semantic matcher failure degrades to zero additional groups.
// Apply: turn confirmed groups into redirect instructions and hand them to
// the store as one batch.

use anyhow::Result;
use chrono::Utc;
use log::warn;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::clustering::{cluster_names, select_survivors};
use crate::models::core::{
    ApplyOutcome, DedupeResult, DuplicateGroup, RedirectInstruction, TopicRecord,
};
use crate::models::stats::DedupeRunStats;
use crate::semantic::{filter_known_names, SemanticMatcher, RESIDUAL_MATCH_RULES};
use crate::store::db_connect::PgPool;
use crate::store::topics::{apply_redirect_batch, fetch_candidate_topics};
use crate::update_progress;
use crate::utils::logging::DedupeLogger;
use crate::utils::progress::ProgressCallback;

/// Records indexed by raw name. First occurrence wins when two records
/// share a name; the loser surfaces as an unresolvable cluster member.
fn index_by_name(records: &[TopicRecord]) -> HashMap<String, TopicRecord> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index
            .entry(record.name.clone())
            .or_insert_with(|| record.clone());
    }
    index
}

/// Deterministic pass over an in-memory candidate set: cluster by both key
/// types, elect survivors. Pure CPU work, safe to call concurrently.
pub fn build_duplicate_groups(records: &[TopicRecord]) -> Vec<DuplicateGroup> {
    let names: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
    let clusters = cluster_names(&names);
    let index = index_by_name(records);
    select_survivors(&clusters, &index)
}

/// Names that ended up in no deterministic group - the semantic matcher's
/// input set.
pub fn residual_names(records: &[TopicRecord], groups: &[DuplicateGroup]) -> Vec<String> {
    let clustered: HashSet<&str> = groups
        .iter()
        .flat_map(|g| g.members.iter().map(|m| m.name.as_str()))
        .collect();
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| !clustered.contains(name) && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Full preview over an in-memory candidate set. The store is not touched;
/// `run_preview` is the pool-backed wrapper. Progress phases stream through
/// the callback, with a keep-alive tick while the semantic call is in
/// flight so a relaying status channel is never idle long enough to drop.
pub async fn run_preview_with_records<M: SemanticMatcher>(
    records: Vec<TopicRecord>,
    matcher: Option<&M>,
    progress_callback: Option<ProgressCallback>,
    keep_alive_secs: u64,
    stats: &mut DedupeRunStats,
) -> DedupeResult {
    let logger = DedupeLogger::deterministic();

    let before = records.len();
    let records: Vec<TopicRecord> = records
        .into_iter()
        .filter(|r| !r.exclude_from_dedupe && !r.id.trim().is_empty() && !r.name.trim().is_empty())
        .collect();
    stats.skipped_excluded += before - records.len();
    stats.total_candidates = records.len();

    if records.len() < 2 {
        update_progress!(progress_callback, "Completed", "Not enough candidates to compare");
        logger.log_completion(0, 0);
        return DedupeResult::empty(records.len());
    }

    logger.log_phase("Clustering", Some("building word-set and spaceless keys"));
    update_progress!(
        progress_callback,
        "Clustering",
        format!("{} candidate names", records.len())
    );

    let clustering_start = Instant::now();
    let mut groups = build_duplicate_groups(&records);
    stats.clustering_time = clustering_start.elapsed().as_secs_f64();
    stats.deterministic_groups = groups.len();

    logger.log_data_loaded(groups.len(), "deterministic duplicate group");
    update_progress!(
        progress_callback,
        "Clustering",
        format!("{} deterministic group(s) found", groups.len())
    );

    if let Some(matcher) = matcher {
        let residuals = residual_names(&records, &groups);
        stats.residual_names = residuals.len();
        if residuals.len() >= 2 {
            let residual_start = Instant::now();
            let residual_groups = run_residual_pass(
                matcher,
                &residuals,
                &records,
                progress_callback.clone(),
                keep_alive_secs,
            )
            .await;
            stats.residual_time = residual_start.elapsed().as_secs_f64();
            stats.residual_groups = residual_groups.len();
            groups.extend(residual_groups);
        }
    }

    // Reproducible payload ordering regardless of map iteration order.
    groups.sort_by(|a, b| {
        let a_main = a.main().map(|m| m.id.as_str()).unwrap_or("");
        let b_main = b.main().map(|m| m.id.as_str()).unwrap_or("");
        a_main.cmp(b_main)
    });

    let total_duplicate_count = groups
        .iter()
        .map(|g| g.members.len().saturating_sub(1))
        .sum();

    stats.total_groups = groups.len();
    stats.total_duplicates = total_duplicate_count;

    logger.log_completion(groups.len(), total_duplicate_count);
    update_progress!(
        progress_callback,
        "Completed",
        format!("{} group(s), {} duplicate(s)", groups.len(), total_duplicate_count)
    );

    DedupeResult {
        total_candidates: records.len(),
        duplicate_groups: groups,
        total_duplicate_count,
    }
}

/// One call to the external matcher, raced against a keep-alive ticker.
/// Every failure path logs a warning and returns no groups.
async fn run_residual_pass<M: SemanticMatcher>(
    matcher: &M,
    residuals: &[String],
    records: &[TopicRecord],
    progress_callback: Option<ProgressCallback>,
    keep_alive_secs: u64,
) -> Vec<DuplicateGroup> {
    let logger = DedupeLogger::semantic();
    logger.log_phase(
        "Residual pass",
        Some(&format!("{} unclustered name(s)", residuals.len())),
    );
    update_progress!(
        progress_callback,
        "Residual pass",
        format!("consulting semantic matcher for {} name(s)", residuals.len())
    );

    let classify = matcher.classify(RESIDUAL_MATCH_RULES, residuals);
    tokio::pin!(classify);

    let mut ticker = tokio::time::interval(Duration::from_secs(keep_alive_secs.max(1)));
    ticker.tick().await; // first tick fires immediately

    let outcome = loop {
        tokio::select! {
            result = &mut classify => break result,
            _ = ticker.tick() => {
                update_progress!(
                    progress_callback,
                    "Residual pass",
                    "semantic matcher call in flight"
                );
            }
        }
    };

    let raw_groups = match outcome {
        Ok(groups) => groups,
        Err(e) => {
            logger.log_warning(&format!(
                "Semantic matcher failed, continuing with deterministic results only: {}",
                e
            ));
            update_progress!(progress_callback, "Residual pass", "semantic matcher unavailable");
            return Vec::new();
        }
    };

    let residual_set: HashSet<String> = residuals.iter().cloned().collect();
    let name_groups = filter_known_names(raw_groups, &residual_set);
    logger.log_data_loaded(name_groups.len(), "validated residual group");

    let index = index_by_name(records);
    select_survivors(&name_groups, &index)
}

/// Pool-backed preview: fetch candidates, run the full pass, return the
/// payload plus run statistics.
pub async fn run_preview<M: SemanticMatcher>(
    pool: &PgPool,
    matcher: Option<&M>,
    progress_callback: Option<ProgressCallback>,
    keep_alive_secs: u64,
) -> Result<(DedupeResult, DedupeRunStats)> {
    let run_id = Uuid::new_v4().to_string();
    let mut stats = DedupeRunStats::new(run_id.clone(), Utc::now().naive_utc());
    let logger = DedupeLogger::deterministic();
    logger.log_start(&run_id);

    update_progress!(progress_callback, "Loading data", "querying candidate topics");
    let fetch_start = Instant::now();
    let (records, load_stats) = fetch_candidate_topics(pool).await?;
    stats.fetch_time = fetch_start.elapsed().as_secs_f64();
    stats.skipped_malformed = load_stats.skipped_malformed;

    logger.log_data_loaded(records.len(), "candidate topic");
    update_progress!(
        progress_callback,
        "Loading data",
        format!("{} candidate(s) loaded", records.len())
    );

    let result = run_preview_with_records(
        records,
        matcher,
        progress_callback,
        keep_alive_secs,
        &mut stats,
    )
    .await;

    stats.total_processing_time = stats.fetch_time + stats.clustering_time + stats.residual_time;
    Ok((result, stats))
}

/// Expand confirmed groups into redirect instructions. Groups without an
/// identifiable main entry or with fewer than two members are skipped with
/// a warning, never failing the whole apply.
pub fn collect_redirect_instructions(groups: &[DuplicateGroup]) -> Vec<RedirectInstruction> {
    let mut instructions = Vec::new();
    for group in groups {
        if group.members.len() < 2 {
            warn!(
                "Skipping confirmed group with {} member(s); nothing to redirect",
                group.members.len()
            );
            continue;
        }
        let Some(main) = group.main() else {
            warn!(
                "Skipping confirmed group with no main entry (first member: {:?})",
                group.members.first().map(|m| m.id.as_str())
            );
            continue;
        };
        for duplicate in group.duplicates() {
            instructions.push(RedirectInstruction {
                duplicate_id: duplicate.id.clone(),
                target_path: main.path.clone(),
            });
        }
    }
    instructions
}

/// Apply operator-confirmed groups as one batch write. An empty confirmed
/// set succeeds with zero redirects.
pub async fn apply_confirmed_groups(
    pool: &PgPool,
    groups: &[DuplicateGroup],
) -> Result<ApplyOutcome> {
    let logger = DedupeLogger::apply();
    let instructions = collect_redirect_instructions(groups);
    logger.log_phase(
        "Applying redirects",
        Some(&format!("{} instruction(s)", instructions.len())),
    );

    let applied = apply_redirect_batch(pool, &instructions).await?;
    logger.log_completion(groups.len(), applied as usize);

    Ok(ApplyOutcome {
        redirects_applied: applied as usize,
    })
}
