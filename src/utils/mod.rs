//! Utility modules: Parquet IO, logging and the synthetic cohort

pub mod io;
pub mod logging;
pub mod synthetic;

pub use io::{
    ParquetRecord, read_optional_records, read_records, validate_directory, write_records,
};
pub use synthetic::generate_cohort;
