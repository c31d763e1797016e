//! Domain models for encounter-level rule evaluation
//!
//! Events are grouped per encounter before any rule runs. Flat record types
//! mirror the Parquet input and output tables.

pub mod diagnosis;
pub mod encounter;
pub mod events;
pub mod observation;
pub mod records;
pub mod rows;

pub use diagnosis::{CodingSystem, DiagnosisEvent};
pub use encounter::{Cohort, Encounter, EncounterBundle, EncounterId};
pub use events::{AdministrationEvent, CulturePolarity, EventId, EventTime, Route, SpecimenEvent};
pub use observation::{OrganDysfunctionTimeline, PhysiologicObservation, SpecimenSource, Variable};
pub use records::CohortRecords;
pub use rows::OutputTables;
