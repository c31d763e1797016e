use anyhow::{Context, bail};
use cohort_rules::models::records::{
    AdministrationRecord, DiagnosisRecord, EncounterRecord, ObservationRecord, OrganScoreRecord,
    SpecimenRecord,
};
use cohort_rules::utils::logging::{create_spinner, finish_progress_bar};
use cohort_rules::utils::{generate_cohort, read_optional_records, validate_directory, write_records};
use cohort_rules::{Cohort, CohortRecords, EngineConfig, OutputTables, ScoringEngine};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

const SYNTHETIC_ENCOUNTERS: usize = 1_000;
const SYNTHETIC_SEED: u64 = 42;

struct Args {
    input_dir: Option<PathBuf>,
    output_dir: PathBuf,
    config_path: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        input_dir: None,
        output_dir: PathBuf::from("output"),
        config_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .map(PathBuf::from)
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag.as_str() {
            "--input" => args.input_dir = Some(value()?),
            "--output" => args.output_dir = value()?,
            "--config" => args.config_path = Some(value()?),
            other => bail!("unknown argument '{other}' (expected --input, --output or --config)"),
        }
    }
    Ok(args)
}

fn load_cohort(dir: &Path, config: &EngineConfig) -> anyhow::Result<Cohort> {
    validate_directory(dir)?;
    let records = CohortRecords {
        encounters: read_optional_records::<EncounterRecord>(&dir.join("encounters.parquet"))?,
        diagnoses: read_optional_records::<DiagnosisRecord>(&dir.join("diagnoses.parquet"))?,
        administrations: read_optional_records::<AdministrationRecord>(
            &dir.join("administrations.parquet"),
        )?,
        specimens: read_optional_records::<SpecimenRecord>(&dir.join("specimens.parquet"))?,
        observations: read_optional_records::<ObservationRecord>(
            &dir.join("observations.parquet"),
        )?,
        organ_scores: read_optional_records::<OrganScoreRecord>(
            &dir.join("organ_scores.parquet"),
        )?,
    };
    Ok(records.into_cohort(config))
}

fn write_outputs(dir: &Path, tables: &OutputTables) -> anyhow::Result<()> {
    let spinner = create_spinner(Some("Writing output tables"));
    write_records(&dir.join("index_scores.parquet"), &tables.index_scores)?;
    write_records(&dir.join("sirs.parquet"), &tables.sirs)?;
    write_records(&dir.join("infections.parquet"), &tables.infections)?;
    write_records(&dir.join("sepsis.parquet"), &tables.sepsis)?;
    finish_progress_bar(&spinner, Some("Output tables written"));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let start = Instant::now();

    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    info!("{config}");

    let cohort = match &args.input_dir {
        Some(dir) => load_cohort(dir, &config)
            .with_context(|| format!("loading cohort from {}", dir.display()))?,
        None => {
            info!("No --input given, generating a synthetic cohort");
            generate_cohort(SYNTHETIC_ENCOUNTERS, SYNTHETIC_SEED)
        }
    };

    let engine = ScoringEngine::new(config.clone()).context("building scoring engine")?;
    let bundles = cohort.assemble();
    let evaluations = engine.evaluate_cohort(&bundles, true)?;

    let tables = OutputTables::from_evaluations(&evaluations, config.sirs_positive_threshold);
    write_outputs(&args.output_dir, &tables)
        .with_context(|| format!("writing results to {}", args.output_dir.display()))?;

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
