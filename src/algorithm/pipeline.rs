//! Per-encounter evaluation pipeline and the parallel cohort driver
//!
//! Within an encounter the steps run in a fixed order: code classification,
//! SIRS, infection matching, then the composite classification that consumes
//! the matches. Encounters share nothing but the read-only code tables, so
//! the cohort is evaluated in parallel.

use chrono::NaiveDateTime;
use indicatif::ParallelProgressIterator;
use log::info;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{EngineConfig, MatchWindow, hours_delta};
use crate::error::Result;
use crate::models::encounter::{EncounterBundle, EncounterId};
use crate::utils::logging::progress;

use super::comorbidity::CodeClassifier;
use super::comorbidity::charlson::{CharlsonCategory, CharlsonScore};
use super::comorbidity::elixhauser::{ElixhauserCategory, ElixhauserScore};
use super::infection::{InfectionMatch, match_encounter};
use super::sepsis::{SepsisCriteria, SepsisRecord, classify_encounter};
use super::sirs::{self, SirsInputs, SirsScore};

/// Everything derived for one encounter
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterEvaluation {
    /// Encounter identifier
    pub encounter_id: EncounterId,
    /// Charlson index
    pub charlson: CharlsonScore,
    /// Elixhauser count and van Walraven score
    pub elixhauser: ElixhauserScore,
    /// Windowed SIRS inputs
    pub sirs_inputs: SirsInputs,
    /// SIRS criteria
    pub sirs: SirsScore,
    /// One matching outcome per administration
    pub infections: Vec<InfectionMatch>,
    /// Composite Sepsis-3 record
    pub sepsis: SepsisRecord,
    /// Diagnoses mapping to no Charlson category
    pub unmapped_charlson: usize,
    /// Diagnoses mapping to no Elixhauser category
    pub unmapped_elixhauser: usize,
}

/// Compiled tables plus configuration; cheap to clone and share
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: EngineConfig,
    window: MatchWindow,
    criteria: SepsisCriteria,
    charlson: Arc<CodeClassifier<CharlsonCategory>>,
    elixhauser: Arc<CodeClassifier<ElixhauserCategory>>,
}

impl ScoringEngine {
    /// Validate the configuration and compile the code tables
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let charlson = Arc::new(CodeClassifier::<CharlsonCategory>::compile()?);
        let elixhauser = Arc::new(CodeClassifier::<ElixhauserCategory>::compile()?);
        info!("Compiled comorbidity code tables in {:?}", start.elapsed());

        Ok(Self {
            window: config.culture_window(),
            criteria: SepsisCriteria::from_config(&config),
            config,
            charlson,
            elixhauser,
        })
    }

    /// Engine configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one encounter; a pure function of the bundle
    #[must_use]
    pub fn evaluate(&self, bundle: &EncounterBundle) -> EncounterEvaluation {
        let encounter = &bundle.encounter;

        let charlson = CharlsonScore::from_flags(
            self.charlson.classify(&bundle.diagnoses),
            encounter.age_years,
        );
        let elixhauser = ElixhauserScore::from_flags(self.elixhauser.classify(&bundle.diagnoses));

        let sirs_start = encounter
            .admit_time
            .checked_add_signed(hours_delta(self.config.sirs_window_start_hours))
            .unwrap_or(NaiveDateTime::MIN);
        let sirs_end = encounter
            .admit_time
            .checked_add_signed(hours_delta(self.config.sirs_window_end_hours))
            .unwrap_or(NaiveDateTime::MAX);
        let sirs_inputs = SirsInputs::aggregate(&bundle.observations, sirs_start, sirs_end);
        let sirs = sirs::evaluate(&sirs_inputs);

        let infections = match_encounter(&bundle.administrations, &bundle.specimens, &self.window);
        let sepsis = classify_encounter(
            encounter.id,
            &infections,
            &bundle.organ_scores,
            &self.criteria,
        );

        EncounterEvaluation {
            encounter_id: encounter.id,
            charlson,
            elixhauser,
            sirs_inputs,
            sirs,
            infections,
            sepsis,
            unmapped_charlson: self.charlson.unmapped_count(&bundle.diagnoses),
            unmapped_elixhauser: self.elixhauser.unmapped_count(&bundle.diagnoses),
        }
    }

    /// Evaluate a cohort in parallel; results keep the input order
    pub fn evaluate_cohort(
        &self,
        bundles: &[EncounterBundle],
        show_progress: bool,
    ) -> Result<Vec<EncounterEvaluation>> {
        let threads = self.config.effective_worker_threads();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        info!(
            "Evaluating {} encounters with {threads} threads",
            bundles.len()
        );

        let start = Instant::now();
        let evaluations: Vec<EncounterEvaluation> = pool.install(|| {
            if show_progress {
                let pb = progress::create_main_progress_bar(
                    bundles.len() as u64,
                    Some("Evaluating encounters"),
                );
                let evaluations: Vec<EncounterEvaluation> = bundles
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(|bundle| self.evaluate(bundle))
                    .collect();
                progress::finish_progress_bar(&pb, Some("Evaluation complete"));
                evaluations
            } else {
                bundles.par_iter().map(|bundle| self.evaluate(bundle)).collect()
            }
        });

        let septic = evaluations.iter().filter(|e| e.sepsis.sepsis()).count();
        info!(
            "Evaluated {} encounters in {:?} ({septic} classified as sepsis)",
            evaluations.len(),
            start.elapsed()
        );
        Ok(evaluations)
    }
}
