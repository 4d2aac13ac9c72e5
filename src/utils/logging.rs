// src/utils/logging.rs - Logging helpers for the dedup run

use log::{debug, error, info, warn};
use std::time::Instant;

/// Consistent prefixing for one dedup run's log output.
#[derive(Clone)]
pub struct DedupeLogger {
    stage_name: &'static str,
    stage_emoji: &'static str,
    start_time: Instant,
}

impl DedupeLogger {
    pub fn deterministic() -> Self {
        Self {
            stage_name: "DEDUPE",
            stage_emoji: "🔤",
            start_time: Instant::now(),
        }
    }

    pub fn semantic() -> Self {
        Self {
            stage_name: "SEMANTIC",
            stage_emoji: "🧠",
            start_time: Instant::now(),
        }
    }

    pub fn apply() -> Self {
        Self {
            stage_name: "APPLY",
            stage_emoji: "✏️",
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, run_id: &str) {
        info!(
            "[{}] {} 🚀 Starting (run ID: {})",
            self.stage_name, self.stage_emoji, run_id
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        match details {
            Some(details) => info!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, details, elapsed.as_secs_f32()
            ),
            None => info!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, elapsed.as_secs_f32()
            ),
        }
    }

    pub fn log_data_loaded(&self, count: usize, data_type: &str) {
        info!(
            "[{}] {} 📊 Found {} {} records",
            self.stage_name, self.stage_emoji, count, data_type
        );
    }

    pub fn log_completion(&self, groups: usize, duplicates: usize) {
        let duration = self.start_time.elapsed();
        info!(
            "[{}] {} 🎉 COMPLETED: {} duplicate group(s), {} duplicate(s) in {:.2?}",
            self.stage_name, self.stage_emoji, groups, duplicates, duration
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!("[{}] {} ⚠️  {}", self.stage_name, self.stage_emoji, message);
    }

    pub fn log_error(&self, message: &str) {
        error!("[{}] {} ❌ {}", self.stage_name, self.stage_emoji, message);
    }

    pub fn log_debug(&self, message: &str) {
        debug!("[{}] {} {}", self.stage_name, self.stage_emoji, message);
    }

    pub fn get_elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}
