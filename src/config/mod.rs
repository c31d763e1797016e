//! Configuration for the scoring engine.
//!
//! Every window, threshold and baseline the rules use lives here so that
//! alternative definitions can be explored without touching the rules.

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Largest window, in hours, any rule accepts (ten years)
pub const MAX_WINDOW_HOURS: i64 = 24 * 365 * 10;

/// Configuration for the `ScoringEngine`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hours a culture may precede the antibiotic (closed bound)
    pub culture_before_hours: i64,
    /// Hours a culture may follow the antibiotic (closed bound)
    pub culture_after_hours: i64,
    /// Hours before the suspected infection time the organ score window opens
    pub organ_window_before_hours: i64,
    /// Hours after the suspected infection time the organ score window closes
    pub organ_window_after_hours: i64,
    /// Worst organ dysfunction score needed for a positive classification
    pub organ_dysfunction_threshold: i32,
    /// Score assumed when no organ dysfunction score exists in the window
    pub organ_baseline_score: i32,
    /// SIRS window start, in hours relative to admission
    pub sirs_window_start_hours: i64,
    /// SIRS window end, in hours relative to admission
    pub sirs_window_end_hours: i64,
    /// SIRS total at or above which an encounter is reported as positive
    pub sirs_positive_threshold: u8,
    /// First day on which untagged diagnosis codes are read as ICD-10
    pub icd10_transition_date: NaiveDate,
    /// Worker threads for cohort evaluation (defaults to the CPU count)
    pub worker_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            culture_before_hours: 72,
            culture_after_hours: 24,
            organ_window_before_hours: 48,
            organ_window_after_hours: 24,
            organ_dysfunction_threshold: 2,
            organ_baseline_score: 0,
            sirs_window_start_hours: -6,
            sirs_window_end_hours: 24,
            sirs_positive_threshold: 2,
            icd10_transition_date: NaiveDate::from_ymd_opt(2015, 10, 1).unwrap_or_default(),
            worker_threads: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Set the asymmetric culture window
    #[must_use]
    pub fn with_culture_window(mut self, before_hours: i64, after_hours: i64) -> Self {
        self.culture_before_hours = before_hours;
        self.culture_after_hours = after_hours;
        self
    }

    /// Set the organ dysfunction window around the suspected infection time
    #[must_use]
    pub fn with_organ_window(mut self, before_hours: i64, after_hours: i64) -> Self {
        self.organ_window_before_hours = before_hours;
        self.organ_window_after_hours = after_hours;
        self
    }

    /// Set the organ dysfunction threshold
    #[must_use]
    pub fn with_organ_threshold(mut self, threshold: i32) -> Self {
        self.organ_dysfunction_threshold = threshold;
        self
    }

    /// Set the SIRS window relative to admission
    #[must_use]
    pub fn with_sirs_window(mut self, start_hours: i64, end_hours: i64) -> Self {
        self.sirs_window_start_hours = start_hours;
        self.sirs_window_end_hours = end_hours;
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// Check that the configured values can be used
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("culture_before_hours", self.culture_before_hours),
            ("culture_after_hours", self.culture_after_hours),
            ("organ_window_before_hours", self.organ_window_before_hours),
            ("organ_window_after_hours", self.organ_window_after_hours),
        ];
        for (name, hours) in windows {
            if hours < 0 {
                return Err(Error::config(format!("{name} must not be negative, got {hours}")));
            }
            if hours > MAX_WINDOW_HOURS {
                return Err(Error::config(format!(
                    "{name} must not exceed {MAX_WINDOW_HOURS}h, got {hours}"
                )));
            }
        }

        let sirs_bounds = [
            ("sirs_window_start_hours", self.sirs_window_start_hours),
            ("sirs_window_end_hours", self.sirs_window_end_hours),
        ];
        for (name, hours) in sirs_bounds {
            if hours.checked_abs().is_none_or(|h| h > MAX_WINDOW_HOURS) {
                return Err(Error::config(format!(
                    "{name} must lie within ±{MAX_WINDOW_HOURS}h, got {hours}"
                )));
            }
        }

        if self.sirs_window_start_hours > self.sirs_window_end_hours {
            return Err(Error::config(format!(
                "SIRS window starts after it ends ({}h > {}h)",
                self.sirs_window_start_hours, self.sirs_window_end_hours
            )));
        }

        if self.worker_threads == Some(0) {
            return Err(Error::config("worker_threads must be at least 1"));
        }

        Ok(())
    }

    /// Number of worker threads to use for cohort evaluation
    #[must_use]
    pub fn effective_worker_threads(&self) -> usize {
        self.worker_threads.unwrap_or_else(num_cpus::get)
    }

    /// Culture matching window derived from the configured hours
    #[must_use]
    pub fn culture_window(&self) -> MatchWindow {
        MatchWindow::from_hours(self.culture_before_hours, self.culture_after_hours)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(
            f,
            "  Culture Window: {}h before / {}h after antibiotic",
            self.culture_before_hours, self.culture_after_hours
        )?;
        writeln!(
            f,
            "  Organ Dysfunction Window: -{}h / +{}h around suspected infection",
            self.organ_window_before_hours, self.organ_window_after_hours
        )?;
        writeln!(
            f,
            "  Organ Dysfunction Threshold: {} (baseline {})",
            self.organ_dysfunction_threshold, self.organ_baseline_score
        )?;
        writeln!(
            f,
            "  SIRS Window: {}h to {}h from admission (positive at {})",
            self.sirs_window_start_hours, self.sirs_window_end_hours, self.sirs_positive_threshold
        )?;
        writeln!(f, "  ICD-10 Transition Date: {}", self.icd10_transition_date)?;
        write!(f, "  Worker Threads: {}", self.effective_worker_threads())
    }
}

/// Asymmetric window around an anchor event, at two granularities
///
/// Time-resolved pairs use the hour bounds. Pairs where either side only
/// carries a calendar date use the whole-day bounds instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWindow {
    /// Maximum time a candidate may precede the anchor
    pub before: Duration,
    /// Maximum time a candidate may follow the anchor
    pub after: Duration,
    /// Maximum whole days a date-only candidate may precede the anchor
    pub before_days: i64,
    /// Maximum whole days a date-only candidate may follow the anchor
    pub after_days: i64,
}

impl MatchWindow {
    /// Build a window from hour bounds; day bounds round up to whole days
    #[must_use]
    pub fn from_hours(before_hours: i64, after_hours: i64) -> Self {
        Self {
            before: hours_delta(before_hours),
            after: hours_delta(after_hours),
            before_days: hours_to_days(before_hours),
            after_days: hours_to_days(after_hours),
        }
    }
}

impl Default for MatchWindow {
    fn default() -> Self {
        Self::from_hours(72, 24)
    }
}

fn hours_to_days(hours: i64) -> i64 {
    hours.saturating_add(23).div_euclid(24)
}

/// Hours as a duration, saturating at the representable range
#[must_use]
pub fn hours_delta(hours: i64) -> Duration {
    Duration::try_hours(hours).unwrap_or(if hours < 0 { Duration::MIN } else { Duration::MAX })
}
