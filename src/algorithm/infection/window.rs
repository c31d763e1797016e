//! Asymmetric window classification of one candidate against one anchor
//!
//! The candidate falls in the "before" partition when it is not later than
//! the anchor, and in the "after" partition otherwise. Both bounds are closed.
//! When either side only carries a date, ordering and distance are both taken
//! on calendar dates and the bounds switch to whole days; a date is never
//! treated as midnight for this comparison.

use chrono::Duration;

use crate::config::MatchWindow;
use crate::models::events::EventTime;

/// Side of the anchor a candidate lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    /// At or before the anchor
    Before,
    /// Strictly after the anchor
    After,
}

/// Where a candidate sits relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPosition {
    /// Partition the candidate belongs to
    pub partition: Partition,
    /// Non-negative distance from the anchor
    pub offset: Duration,
    /// Whether the comparison was made on calendar days
    pub day_granularity: bool,
}

/// Classify a candidate event against an anchor event
///
/// Returns `None` when the candidate lies outside the window on its side.
#[must_use]
pub fn classify(anchor: EventTime, candidate: EventTime, window: &MatchWindow) -> Option<WindowPosition> {
    match (anchor, candidate) {
        (EventTime::Timestamp(anchor), EventTime::Timestamp(candidate)) => {
            let lead = anchor - candidate;
            if lead >= Duration::zero() {
                (lead <= window.before).then_some(WindowPosition {
                    partition: Partition::Before,
                    offset: lead,
                    day_granularity: false,
                })
            } else {
                let lag = candidate - anchor;
                (lag <= window.after).then_some(WindowPosition {
                    partition: Partition::After,
                    offset: lag,
                    day_granularity: false,
                })
            }
        }
        _ => {
            let lead_days = (anchor.date() - candidate.date()).num_days();
            if lead_days >= 0 {
                (lead_days <= window.before_days).then(|| WindowPosition {
                    partition: Partition::Before,
                    offset: Duration::days(lead_days),
                    day_granularity: true,
                })
            } else {
                let lag_days = -lead_days;
                (lag_days <= window.after_days).then(|| WindowPosition {
                    partition: Partition::After,
                    offset: Duration::days(lag_days),
                    day_granularity: true,
                })
            }
        }
    }
}
