//! Clinical rule implementations
//!
//! Comorbidity indices, SIRS criteria, suspicion of infection and the
//! Sepsis-3 composite, plus the pipeline that runs them per encounter.

pub mod comorbidity;
pub mod infection;
pub mod pipeline;
pub mod sepsis;
pub mod sirs;

pub use pipeline::{EncounterEvaluation, ScoringEngine};
