//! Temporal rule engine for clinical cohort definitions.
//!
//! Scores encounters against the Charlson and Elixhauser comorbidity
//! indices, the SIRS criteria, antibiotic/culture suspicion of infection and
//! Sepsis-3, with configurable windows and parallel cohort evaluation.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use algorithm::{EncounterEvaluation, ScoringEngine};
pub use config::{EngineConfig, MatchWindow};
pub use error::{Error, Result};
pub use models::{Cohort, CohortRecords, EncounterBundle, OutputTables};
