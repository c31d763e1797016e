//! Suspicion of infection
//!
//! An infection is suspected when a systemic antibiotic is paired with a
//! culture specimen taken within an asymmetric window around it. Culture
//! positivity plays no part; only timing does.

pub mod matcher;
pub mod window;

use chrono::{Duration, NaiveDateTime};
use std::fmt;

use crate::models::events::{CulturePolarity, EventId, EventTime};
use crate::models::encounter::EncounterId;

pub use matcher::{match_administration, match_encounter};
pub use window::{Partition, WindowPosition, classify};

/// Direction of a specimen relative to its administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchDirection {
    /// Specimen at or before the administration
    Before,
    /// Specimen after the administration
    After,
    /// No specimen bound
    None,
}

impl fmt::Display for MatchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
            Self::None => write!(f, "none"),
        }
    }
}

/// An administration bound to the specimen selected for it
///
/// Only pairs inside the window exist; `offset` is always within the bound
/// for `direction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    /// Administration identifier
    pub administration_id: EventId,
    /// Encounter identifier
    pub encounter_id: EncounterId,
    /// Administration start
    pub administration_time: EventTime,
    /// Specimen identifier
    pub specimen_id: EventId,
    /// Specimen time
    pub specimen_time: EventTime,
    /// Specimen result, carried for reporting only
    pub specimen_polarity: CulturePolarity,
    /// Side of the administration the specimen lies on
    pub direction: MatchDirection,
    /// Non-negative distance between the two events
    pub offset: Duration,
    /// Whether the pair was compared on calendar days
    pub day_granularity: bool,
}

impl MatchedPair {
    /// Specimen time when it precedes the administration, else the administration time
    #[must_use]
    pub fn suspected_infection_time(&self) -> EventTime {
        match self.direction {
            MatchDirection::Before => self.specimen_time,
            MatchDirection::After | MatchDirection::None => self.administration_time,
        }
    }

    /// Suspected infection time as a point in time, date-only resolving to midnight
    #[must_use]
    pub fn suspected_infection_instant(&self) -> NaiveDateTime {
        self.suspected_infection_time().as_datetime()
    }
}

/// Matching outcome of one administration, matched or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfectionMatch {
    /// Administration identifier
    pub administration_id: EventId,
    /// Encounter identifier
    pub encounter_id: EncounterId,
    /// Administration start
    pub administration_time: EventTime,
    /// Whether the administration was eligible (systemic route)
    pub eligible: bool,
    /// Bound specimen, if any
    pub pair: Option<MatchedPair>,
}

impl InfectionMatch {
    /// Direction of the bound specimen, `None` when unmatched
    #[must_use]
    pub fn direction(&self) -> MatchDirection {
        self.pair
            .as_ref()
            .map_or(MatchDirection::None, |pair| pair.direction)
    }

    /// Whether this administration raises suspicion of infection
    #[must_use]
    pub const fn is_suspected_infection(&self) -> bool {
        self.pair.is_some()
    }
}
