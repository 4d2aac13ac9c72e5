use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dedupe_lib::models::core::{DedupeResult, DuplicateGroup};
use dedupe_lib::pipeline::{apply_confirmed_groups, run_preview};
use dedupe_lib::semantic::{SemanticClient, SemanticClientConfig};
use dedupe_lib::store::db_connect::{connect, get_pool_status};
use dedupe_lib::utils::env::load_env;
use dedupe_lib::utils::get_memory_usage;
use dedupe_lib::utils::progress::{ProgressCallback, ProgressConfig};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dedupe", about = "Topic deduplication engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dedup pass and write the duplicate-group payload to a file
    /// for operator review. The store is not modified.
    Preview {
        /// Where to write the preview payload (JSON)
        #[arg(short, long, default_value = "dedupe_preview.json")]
        output: PathBuf,
        /// Skip the residual semantic matcher even when configured
        #[arg(long)]
        no_semantic: bool,
    },
    /// Apply a reviewed (possibly pruned) preview payload: every non-main
    /// member is redirected to its group's main entry in one batch write.
    Apply {
        /// Preview payload to apply, as written by `preview`
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    load_env();

    let cli = Cli::parse();

    let progress_config = ProgressConfig::from_env();
    let pool = connect().await.context("Failed to connect to the topic store")?;

    match cli.command {
        Commands::Preview { output, no_semantic } => {
            run_preview_command(&pool, &progress_config, output, no_semantic).await?;
        }
        Commands::Apply { input } => {
            run_apply_command(&pool, input).await?;
        }
    }

    let (pool_size, available, in_use) = get_pool_status(&pool);
    info!(
        "Final DB Connection Pool Status: Total: {}, Available: {}, In Use: {}",
        pool_size, available, in_use
    );

    Ok(())
}

async fn run_preview_command(
    pool: &dedupe_lib::store::db_connect::PgPool,
    progress_config: &ProgressConfig,
    output: PathBuf,
    no_semantic: bool,
) -> Result<()> {
    info!("Starting topic dedup preview");

    let semantic_config = SemanticClientConfig::from_env();
    semantic_config.log_config();
    let matcher = if no_semantic {
        None
    } else {
        SemanticClient::from_config(&semantic_config)?
    };

    let progress_callback = create_spinner_callback(progress_config);

    let (result, stats) = run_preview(
        pool,
        matcher.as_ref(),
        progress_callback,
        progress_config.keep_alive_secs,
    )
    .await?;

    let payload = serde_json::to_string_pretty(&result)
        .context("Failed to serialize preview payload")?;
    tokio::fs::write(&output, payload)
        .await
        .with_context(|| format!("Failed to write preview payload to {}", output.display()))?;

    info!("=== Dedup Preview Summary ===");
    info!("Run ID: {}", stats.run_id);
    info!("Total candidates: {}", result.total_candidates);
    if stats.skipped_malformed > 0 || stats.skipped_excluded > 0 {
        info!(
            "Skipped rows: {} malformed, {} excluded",
            stats.skipped_malformed, stats.skipped_excluded
        );
    }
    info!(
        "Duplicate groups: {} ({} deterministic, {} residual)",
        stats.total_groups, stats.deterministic_groups, stats.residual_groups
    );
    info!("Total duplicates: {}", stats.total_duplicates);
    info!("=== Timing Breakdown ===");
    info!("Fetch: {:.2}s", stats.fetch_time);
    info!("Clustering: {:.2}s", stats.clustering_time);
    if stats.residual_names > 0 {
        info!(
            "Residual pass: {:.2}s ({} names offered)",
            stats.residual_time, stats.residual_names
        );
    }
    info!("Total: {:.2}s", stats.total_processing_time);

    if progress_config.should_show_memory() {
        info!("Final memory usage: {} MB", get_memory_usage().await);
    }

    info!("Preview payload written to {}", output.display());
    info!("Review it (prune duplicates as needed), then run: dedupe apply --input {}", output.display());
    Ok(())
}

async fn run_apply_command(
    pool: &dedupe_lib::store::db_connect::PgPool,
    input: PathBuf,
) -> Result<()> {
    let payload = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read confirmed payload from {}", input.display()))?;

    // Accept either the full preview payload or a bare group array, so an
    // operator can hand back a pruned subset in whichever shape they kept.
    let groups: Vec<DuplicateGroup> = match serde_json::from_str::<DedupeResult>(&payload) {
        Ok(result) => result.duplicate_groups,
        Err(_) => serde_json::from_str(&payload)
            .context("Confirmed payload is neither a preview result nor a group array")?,
    };

    info!("Applying {} confirmed group(s) from {}", groups.len(), input.display());

    let outcome = apply_confirmed_groups(pool, &groups).await?;
    info!("Redirects applied: {}", outcome.redirects_applied);
    println!(
        "{}",
        serde_json::to_string(&outcome).context("Failed to serialize apply outcome")?
    );
    Ok(())
}

/// Progress callback that drives an indicatif spinner; falls back to
/// log-only when progress bars are disabled.
fn create_spinner_callback(config: &ProgressConfig) -> Option<ProgressCallback> {
    let Some(multi_progress) = config.create_multi_progress() else {
        return Some(dedupe_lib::utils::progress::create_logging_callback("dedupe"));
    };
    let spinner = multi_progress.add(ProgressBar::new_spinner());
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(Arc::new(move |phase: String, details: Option<String>| {
        let message = match details {
            Some(details) => format!("{}: {}", phase, details),
            None => phase,
        };
        spinner.set_message(message);
    }))
}
