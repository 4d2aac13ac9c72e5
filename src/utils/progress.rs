// src/utils/progress.rs - Progress callback plumbing for the dedup run
//
// The engine exposes a status-callback hook and owns no transport; the
// caller (CLI, admin panel relay) decides where phase updates go. The
// keep-alive ticker in the pipeline reuses the same callback while the
// semantic matcher call is in flight.

use indicatif::MultiProgress;
use log::debug;
use std::env;
use std::sync::Arc;
use std::time::Instant;

/// Takes a phase name and optional detail text.
pub type ProgressCallback = Arc<dyn Fn(String, Option<String>) + Send + Sync>;

/// Convenience macro for reporting a phase from inside the pipeline.
#[macro_export]
macro_rules! update_progress {
    ($callback:expr, $phase:expr) => {
        if let Some(ref cb) = $callback {
            cb($phase.to_string(), None);
        }
    };
    ($callback:expr, $phase:expr, $details:expr) => {
        if let Some(ref cb) = $callback {
            cb($phase.to_string(), Some($details.to_string()));
        }
    };
}

/// A callback that forwards every update to the debug log.
pub fn create_logging_callback(label: &str) -> ProgressCallback {
    let label = label.to_string();
    Arc::new(move |phase: String, details: Option<String>| {
        let detail_str = details.map(|d| format!(" - {}", d)).unwrap_or_default();
        debug!("[{}] Progress: {}{}", label, phase, detail_str);
    })
}

/// Tracks the current phase so loop updates can repeat it without
/// re-threading the phase name everywhere.
pub struct ProgressTracker {
    callback: Option<ProgressCallback>,
    current_phase: String,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Self {
            callback,
            current_phase: "Initializing".to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn set_phase(&mut self, phase: &str) {
        self.current_phase = phase.to_string();
        if let Some(ref cb) = self.callback {
            cb(phase.to_string(), None);
        }
    }

    pub fn set_phase_with_details(&mut self, phase: &str, details: &str) {
        self.current_phase = phase.to_string();
        if let Some(ref cb) = self.callback {
            cb(phase.to_string(), Some(details.to_string()));
        }
    }

    pub fn update_progress(&self, current: usize, total: usize) {
        if let Some(ref cb) = self.callback {
            cb(self.current_phase.clone(), Some(format!("{}/{}", current, total)));
        }
    }

    pub fn finish_phase(&self, summary: &str) {
        if let Some(ref cb) = self.callback {
            let elapsed = self.start_time.elapsed();
            let details = format!("{} in {:.2}s", summary, elapsed.as_secs_f64());
            cb("Completed".to_string(), Some(details));
        }
    }
}

/// Progress display configuration for the CLI, from environment variables.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Whether to show progress bars at all
    pub enabled: bool,
    /// Whether to show memory usage in progress messages
    pub show_memory: bool,
    /// Keep-alive interval while the semantic matcher call is in flight
    pub keep_alive_secs: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_memory: true,
            keep_alive_secs: 5,
        }
    }
}

impl ProgressConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env::var("PROGRESS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            show_memory: env::var("PROGRESS_SHOW_MEMORY")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            keep_alive_secs: env::var("PROGRESS_KEEP_ALIVE_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }

    pub fn create_multi_progress(&self) -> Option<MultiProgress> {
        if self.enabled {
            Some(MultiProgress::new())
        } else {
            None
        }
    }

    pub fn should_show_memory(&self) -> bool {
        self.enabled && self.show_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_progress_tracker_invokes_callback() {
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = Arc::clone(&call_count);

        let callback: ProgressCallback = Arc::new(move |_phase: String, _details: Option<String>| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut tracker = ProgressTracker::new(Some(callback));
        tracker.set_phase("Clustering");
        tracker.update_progress(50, 100);
        tracker.set_phase_with_details("Residual pass", "42 names");
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_logging_callback_does_not_panic() {
        let callback = create_logging_callback("dedupe");
        callback("Fetching".to_string(), Some("1200 rows".to_string()));
        callback("Clustering".to_string(), None);
    }

    #[test]
    fn test_default_config() {
        let config = ProgressConfig::default();
        assert!(config.enabled);
        assert!(config.show_memory);
        assert_eq!(config.keep_alive_secs, 5);
    }

    #[test]
    fn test_multi_progress_creation_respects_enabled() {
        let mut config = ProgressConfig::default();
        config.enabled = true;
        assert!(config.create_multi_progress().is_some());
        config.enabled = false;
        assert!(config.create_multi_progress().is_none());
        assert!(!config.should_show_memory());
    }
}
