//! Physiologic observations and organ dysfunction scores
//!
//! Observations feed the SIRS criteria. Organ dysfunction scores are computed
//! elsewhere and arrive as a per-encounter timeline of score points.

use chrono::NaiveDateTime;
use std::fmt;

use super::encounter::EncounterId;

/// Measured variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// Body temperature in degrees Celsius
    TemperatureCelsius,
    /// Body temperature in degrees Fahrenheit
    TemperatureFahrenheit,
    /// Heart rate, beats per minute
    HeartRate,
    /// Respiratory rate, breaths per minute
    RespiratoryRate,
    /// Partial pressure of CO2, mmHg
    PaCO2,
    /// White blood cell count, 10^9/L
    WhiteBloodCells,
    /// Immature (band) neutrophils, percent
    BandNeutrophils,
}

impl Variable {
    /// Parse a variable name as it appears in flat input records
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "temperature" | "temperature_c" | "temp_c" => Some(Self::TemperatureCelsius),
            "temperature_f" | "temp_f" => Some(Self::TemperatureFahrenheit),
            "heart_rate" | "hr" => Some(Self::HeartRate),
            "resp_rate" | "respiratory_rate" | "rr" => Some(Self::RespiratoryRate),
            "paco2" | "pco2" => Some(Self::PaCO2),
            "wbc" | "white_blood_cells" => Some(Self::WhiteBloodCells),
            "bands" | "band_neutrophils" | "immature_neutrophils" => Some(Self::BandNeutrophils),
            _ => None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TemperatureCelsius => "temperature_c",
            Self::TemperatureFahrenheit => "temperature_f",
            Self::HeartRate => "heart_rate",
            Self::RespiratoryRate => "resp_rate",
            Self::PaCO2 => "paco2",
            Self::WhiteBloodCells => "wbc",
            Self::BandNeutrophils => "bands",
        };
        write!(f, "{name}")
    }
}

/// Specimen source of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecimenSource {
    /// Arterial sample
    Arterial,
    /// Venous sample
    Venous,
    /// Mixed venous sample
    MixedVenous,
    /// Source not recorded or not applicable
    Unspecified,
}

impl SpecimenSource {
    /// Parse a source tag; anything unrecognised is `Unspecified`
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("art" | "arterial") => Self::Arterial,
            Some("ven" | "venous") => Self::Venous,
            Some("mix" | "mixed_venous" | "mixed venous") => Self::MixedVenous,
            _ => Self::Unspecified,
        }
    }
}

/// A single physiologic measurement
#[derive(Debug, Clone, PartialEq)]
pub struct PhysiologicObservation {
    /// Encounter the observation belongs to
    pub encounter_id: EncounterId,
    /// What was measured
    pub variable: Variable,
    /// Measured value, in the variable's unit
    pub value: f64,
    /// When the value was charted
    pub time: NaiveDateTime,
    /// Where the sample came from
    pub source: SpecimenSource,
}

impl PhysiologicObservation {
    /// Create a new observation with an unspecified source
    #[must_use]
    pub fn new(
        encounter_id: EncounterId,
        variable: Variable,
        value: f64,
        time: NaiveDateTime,
    ) -> Self {
        Self {
            encounter_id,
            variable,
            value,
            time,
            source: SpecimenSource::Unspecified,
        }
    }

    /// Set the specimen source
    #[must_use]
    pub fn with_source(mut self, source: SpecimenSource) -> Self {
        self.source = source;
        self
    }
}

/// Externally computed organ dysfunction scores for one encounter
///
/// Each point is the worst score of the rolling period ending at `time`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganDysfunctionTimeline {
    points: Vec<(NaiveDateTime, i32)>,
}

impl OrganDysfunctionTimeline {
    /// Build a timeline from unordered score points
    #[must_use]
    pub fn new(mut points: Vec<(NaiveDateTime, i32)>) -> Self {
        points.sort_unstable();
        Self { points }
    }

    /// Number of score points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the timeline has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Worst (highest) score with a time inside `[start, end]`
    #[must_use]
    pub fn worst_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Option<i32> {
        let first = self.points.partition_point(|(time, _)| *time < start);
        self.points[first..]
            .iter()
            .take_while(|(time, _)| *time <= end)
            .map(|(_, score)| *score)
            .max()
    }
}
