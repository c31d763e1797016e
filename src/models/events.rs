//! Timed treatment and specimen events
//!
//! Antibiotic administrations and culture specimens both carry an
//! [`EventTime`], which may be resolved to the second or only to the day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;
use std::fmt;

use super::encounter::EncounterId;

/// Identifier of an administration or specimen event
pub type EventId = i64;

/// When an event happened, at the precision the source recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTime {
    /// Date and time of day are known
    Timestamp(NaiveDateTime),
    /// Only the calendar date is known
    DateOnly(NaiveDate),
}

impl EventTime {
    /// Build from the optional time and date columns most sources carry;
    /// the timestamp wins when both are present
    #[must_use]
    pub fn from_parts(time: Option<NaiveDateTime>, date: Option<NaiveDate>) -> Option<Self> {
        match (time, date) {
            (Some(ts), _) => Some(Self::Timestamp(ts)),
            (None, Some(d)) => Some(Self::DateOnly(d)),
            (None, None) => None,
        }
    }

    /// Calendar date of the event
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Timestamp(ts) => ts.date(),
            Self::DateOnly(d) => *d,
        }
    }

    /// Whether time of day is known
    #[must_use]
    pub const fn has_time(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }

    /// Point in time for reporting; date-only events resolve to midnight
    #[must_use]
    pub fn as_datetime(&self) -> NaiveDateTime {
        match self {
            Self::Timestamp(ts) => *ts,
            Self::DateOnly(d) => d.and_time(NaiveTime::MIN),
        }
    }

    fn sort_key(&self) -> (NaiveDate, bool, NaiveTime) {
        match self {
            Self::Timestamp(ts) => (ts.date(), false, ts.time()),
            Self::DateOnly(d) => (*d, true, NaiveTime::MIN),
        }
    }
}

/// Chronological order; on the same day, time-resolved events sort before
/// date-only ones
impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::DateOnly(d) => write!(f, "{d} (date only)"),
        }
    }
}

/// Route class of an administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Reaches the bloodstream (IV, IM, oral, enteral, ...)
    Systemic,
    /// Applied locally (eye, ear, skin)
    Topical,
    /// No clear tag; never eligible for matching
    Unclassified,
}

const SYSTEMIC_ROUTES: &[&str] = &[
    "SYSTEMIC", "IV", "IV DRIP", "IV BOLUS", "IVPCA", "IVPB", "IM", "PO", "NG", "PO/NG", "OG",
    "PO/OG", "NG/OG", "G TUBE", "J TUBE", "PEG", "SC", "SUBCUT", "ORAL", "ENTERAL TUBE", "PR",
];

const TOPICAL_ROUTES: &[&str] = &[
    "TOPICAL", "TP", "OU", "OS", "OD", "AU", "AS", "AD", "EX", "OPHTHALMIC", "OTIC",
];

impl Route {
    /// Classify a route tag or route code
    ///
    /// Explicit `systemic`/`topical` tags and common route abbreviations are
    /// recognised; anything else is `Unclassified`.
    #[must_use]
    pub fn classify(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_uppercase();
        if SYSTEMIC_ROUTES.contains(&tag.as_str()) {
            Self::Systemic
        } else if TOPICAL_ROUTES.contains(&tag.as_str()) {
            Self::Topical
        } else {
            Self::Unclassified
        }
    }

    /// Only explicitly systemic administrations take part in matching
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Systemic)
    }
}

/// A treatment administration, e.g. an antibiotic order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrationEvent {
    /// Event identifier, unique within the cohort
    pub id: EventId,
    /// Encounter the administration belongs to
    pub encounter_id: EncounterId,
    /// Substance class or drug name
    pub substance: String,
    /// Route class
    pub route: Route,
    /// Start of the administration
    pub start: EventTime,
}

impl AdministrationEvent {
    /// Create a new administration event
    #[must_use]
    pub fn new(
        id: EventId,
        encounter_id: EncounterId,
        substance: impl Into<String>,
        route: Route,
        start: EventTime,
    ) -> Self {
        Self {
            id,
            encounter_id,
            substance: substance.into(),
            route,
            start,
        }
    }
}

/// Result polarity of a specimen; unknown stays unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CulturePolarity {
    /// Organism detected
    Positive,
    /// Explicit negative result
    Negative,
    /// No result recorded
    Unknown,
}

impl CulturePolarity {
    /// Read a polarity tag; anything unrecognised is `Unknown`
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()) {
            Some(t) if t == "positive" || t == "pos" => Self::Positive,
            Some(t) if t == "negative" || t == "neg" => Self::Negative,
            _ => Self::Unknown,
        }
    }

    /// Tri-state as an optional boolean
    #[must_use]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Positive => Some(true),
            Self::Negative => Some(false),
            Self::Unknown => None,
        }
    }
}

/// A culture specimen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenEvent {
    /// Event identifier, unique within the cohort
    pub id: EventId,
    /// Encounter the specimen belongs to
    pub encounter_id: EncounterId,
    /// When the specimen was taken
    pub time: EventTime,
    /// Specimen type, e.g. blood culture
    pub specimen_type: String,
    /// Result polarity
    pub polarity: CulturePolarity,
}

impl SpecimenEvent {
    /// Create a new specimen event
    #[must_use]
    pub fn new(
        id: EventId,
        encounter_id: EncounterId,
        time: EventTime,
        specimen_type: impl Into<String>,
        polarity: CulturePolarity,
    ) -> Self {
        Self {
            id,
            encounter_id,
            time,
            specimen_type: specimen_type.into(),
            polarity,
        }
    }
}
