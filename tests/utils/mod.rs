use chrono::{Duration, NaiveDate, NaiveDateTime};
use cohort_rules::models::{
    AdministrationEvent, CulturePolarity, Encounter, EncounterBundle, EncounterId, EventId,
    EventTime, Route, SpecimenEvent,
};

/// Encounter used by single-encounter fixtures
pub const ENCOUNTER: EncounterId = 1;

/// Fixed anchor for relative fixture times: 2020-03-10 12:00
#[must_use]
pub fn anchor() -> NaiveDateTime {
    date(2020, 3, 10).and_hms_opt(12, 0, 0).unwrap()
}

#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A time-resolved event `hours` after the anchor (negative for before)
#[must_use]
pub fn hours(hours: i64) -> EventTime {
    EventTime::Timestamp(anchor() + Duration::hours(hours))
}

/// A time-resolved event offset from the anchor by an exact duration
#[must_use]
pub fn offset(duration: Duration) -> EventTime {
    EventTime::Timestamp(anchor() + duration)
}

/// A date-only event `days` after the anchor date (negative for before)
#[must_use]
pub fn day(days: i64) -> EventTime {
    EventTime::DateOnly(anchor().date() + Duration::days(days))
}

#[must_use]
pub fn systemic(id: EventId, start: EventTime) -> AdministrationEvent {
    AdministrationEvent::new(id, ENCOUNTER, "vancomycin", Route::Systemic, start)
}

#[must_use]
pub fn administration(id: EventId, route: &str, start: EventTime) -> AdministrationEvent {
    AdministrationEvent::new(id, ENCOUNTER, "vancomycin", Route::classify(route), start)
}

#[must_use]
pub fn specimen(id: EventId, time: EventTime) -> SpecimenEvent {
    SpecimenEvent::new(id, ENCOUNTER, time, "BLOOD CULTURE", CulturePolarity::Unknown)
}

/// Empty bundle admitted at the anchor
#[must_use]
pub fn bundle(age_years: Option<u32>) -> EncounterBundle {
    EncounterBundle::new(Encounter::new(ENCOUNTER, anchor(), age_years))
}
