//! Systemic inflammatory response syndrome (SIRS) criteria
//!
//! Two steps: [`SirsInputs::aggregate`] filters and reduces raw observations
//! to the worst values inside a window, and [`evaluate`] scores the four
//! criteria. A criterion whose inputs are absent is scored as not met.

use chrono::NaiveDateTime;
use itertools::{Itertools, MinMaxResult};

use crate::models::observation::{PhysiologicObservation, SpecimenSource, Variable};

/// Lower bound of normal temperature, Celsius
pub const TEMPERATURE_LOW: f64 = 36.0;
/// Upper bound of normal temperature, Celsius
pub const TEMPERATURE_HIGH: f64 = 38.0;
/// Heart rate above which the criterion is met
pub const HEART_RATE_HIGH: f64 = 90.0;
/// Respiratory rate above which the criterion is met
pub const RESPIRATORY_RATE_HIGH: f64 = 20.0;
/// Arterial PaCO2 below which the criterion is met, mmHg
pub const PACO2_LOW: f64 = 32.0;
/// Lower bound of normal white cell count, 10^9/L
pub const WBC_LOW: f64 = 4.0;
/// Upper bound of normal white cell count, 10^9/L
pub const WBC_HIGH: f64 = 12.0;
/// Immature neutrophil percentage above which the criterion is met
pub const BANDS_HIGH: f64 = 10.0;

/// Windowed extreme values the criteria are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SirsInputs {
    /// Lowest temperature, Celsius
    pub temperature_min: Option<f64>,
    /// Highest temperature, Celsius
    pub temperature_max: Option<f64>,
    /// Highest heart rate
    pub heart_rate_max: Option<f64>,
    /// Highest respiratory rate
    pub resp_rate_max: Option<f64>,
    /// Lowest arterial PaCO2
    pub paco2_min: Option<f64>,
    /// Lowest white cell count
    pub wbc_min: Option<f64>,
    /// Highest white cell count
    pub wbc_max: Option<f64>,
    /// Highest immature neutrophil percentage
    pub bands_max: Option<f64>,
}

impl SirsInputs {
    /// Reduce observations in `[start, end]` to their extreme values
    ///
    /// This is where input filtering happens: PaCO2 only counts when the
    /// sample is explicitly arterial, and Fahrenheit temperatures are
    /// converted to Celsius. Non-finite values are dropped.
    #[must_use]
    pub fn aggregate(
        observations: &[PhysiologicObservation],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        let in_window = || {
            observations
                .iter()
                .filter(move |obs| obs.time >= start && obs.time <= end && obs.value.is_finite())
        };
        let values = |wanted: &[Variable]| {
            in_window()
                .filter(|obs| wanted.contains(&obs.variable))
                .map(celsius_value)
                .collect_vec()
        };

        let (temperature_min, temperature_max) = min_max(values(&[
            Variable::TemperatureCelsius,
            Variable::TemperatureFahrenheit,
        ]));
        let (wbc_min, wbc_max) = min_max(values(&[Variable::WhiteBloodCells]));
        let arterial_paco2 = in_window()
            .filter(|obs| obs.variable == Variable::PaCO2 && obs.source == SpecimenSource::Arterial)
            .map(|obs| obs.value)
            .collect_vec();

        Self {
            temperature_min,
            temperature_max,
            heart_rate_max: min_max(values(&[Variable::HeartRate])).1,
            resp_rate_max: min_max(values(&[Variable::RespiratoryRate])).1,
            paco2_min: min_max(arterial_paco2).0,
            wbc_min,
            wbc_max,
            bands_max: min_max(values(&[Variable::BandNeutrophils])).1,
        }
    }
}

fn celsius_value(obs: &PhysiologicObservation) -> f64 {
    match obs.variable {
        Variable::TemperatureFahrenheit => (obs.value - 32.0) * 5.0 / 9.0,
        _ => obs.value,
    }
}

fn min_max(values: Vec<f64>) -> (Option<f64>, Option<f64>) {
    match values.into_iter().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (None, None),
        MinMaxResult::OneElement(v) => (Some(v), Some(v)),
        MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
    }
}

/// Per-criterion SIRS result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SirsScore {
    /// Temperature outside [36, 38] °C
    pub temperature: bool,
    /// Heart rate above 90
    pub heart_rate: bool,
    /// Respiratory rate above 20 or arterial PaCO2 below 32 mmHg
    pub respiratory: bool,
    /// White cells outside [4, 12] or immature neutrophils above 10%
    pub white_cells: bool,
}

impl SirsScore {
    /// Criteria in reporting order
    #[must_use]
    pub const fn criteria(&self) -> [bool; 4] {
        [self.temperature, self.heart_rate, self.respiratory, self.white_cells]
    }

    /// Number of criteria met, 0 to 4
    #[must_use]
    pub fn total(&self) -> u8 {
        self.criteria().iter().map(|met| u8::from(*met)).sum()
    }

    /// Whether the total reaches a caller-chosen threshold
    #[must_use]
    pub fn meets(&self, threshold: u8) -> bool {
        self.total() >= threshold
    }
}

/// Score the four SIRS criteria; absent inputs never meet a criterion
#[must_use]
pub fn evaluate(inputs: &SirsInputs) -> SirsScore {
    let below = |value: Option<f64>, limit: f64| value.is_some_and(|v| v < limit);
    let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);

    SirsScore {
        temperature: below(inputs.temperature_min, TEMPERATURE_LOW)
            || above(inputs.temperature_max, TEMPERATURE_HIGH),
        heart_rate: above(inputs.heart_rate_max, HEART_RATE_HIGH),
        respiratory: above(inputs.resp_rate_max, RESPIRATORY_RATE_HIGH)
            || below(inputs.paco2_min, PACO2_LOW),
        white_cells: below(inputs.wbc_min, WBC_LOW)
            || above(inputs.wbc_max, WBC_HIGH)
            || above(inputs.bands_max, BANDS_HIGH),
    }
}
