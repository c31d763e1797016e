//! IO utilities for Parquet tables

pub mod parquet;

pub use self::parquet::{
    ParquetRecord, read_optional_records, read_records, validate_directory, write_records,
};
