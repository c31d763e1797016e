//! Parquet file operations
//!
//! Flat input records and output rows travel through Parquet. Conversion
//! between serde types and Arrow record batches goes through `serde_arrow`,
//! so any record type with serde derives can be read or written here.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::{Error, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// A flat row type that can be written to Parquet
///
/// Chrono values serialize as strings, which `serde_arrow` cannot trace from
/// the type alone, so the schema is traced from a sample row instead.
pub trait ParquetRecord: Serialize + DeserializeOwned {
    /// A row with every optional field set
    fn schema_sample() -> Self;
}

/// Arrow fields for a record type, traced from its schema sample
///
/// The schema does not depend on the rows being written, so empty tables and
/// tables whose optional columns are all null get the same columns.
pub fn record_fields<T: ParquetRecord>() -> Result<Vec<FieldRef>> {
    Ok(Vec::<FieldRef>::from_samples(
        &[T::schema_sample()],
        TracingOptions::default().allow_null_fields(true),
    )?)
}

/// Convert records into a single record batch
pub fn to_record_batch<T: ParquetRecord>(records: &[T]) -> Result<RecordBatch> {
    let fields = record_fields::<T>()?;
    Ok(serde_arrow::to_record_batch(&fields, &records)?)
}

/// Convert a record batch back into records
pub fn from_record_batch<T: DeserializeOwned>(batch: &RecordBatch) -> Result<Vec<T>> {
    Ok(serde_arrow::from_record_batch(batch)?)
}

/// Read every row of a Parquet file as records of type `T`
///
/// # Arguments
/// * `path` - Path to the Parquet file
///
/// # Errors
/// Returns an error if the file cannot be opened, is not valid Parquet, or
/// its columns do not fit `T`
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let start = Instant::now();
    log_operation_start("Reading", path);

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(from_record_batch::<T>(&batch?)?);
    }

    log_operation_complete("read", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

/// Read a table that may be absent; a missing file yields no rows
pub fn read_optional_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if path.is_file() {
        read_records(path)
    } else {
        log_warning("Input table not found, treating as empty", Some(path));
        Ok(Vec::new())
    }
}

/// Write records to a Snappy-compressed Parquet file, replacing it if present
///
/// # Arguments
/// * `path` - Destination file
/// * `records` - Rows to write; an empty slice writes a schema-only file
pub fn write_records<T: ParquetRecord>(path: &Path, records: &[T]) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing", path);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let batch = to_record_batch(records)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, records.len(), Some(start.elapsed()));
    Ok(())
}

/// Check that a directory exists before reading tables from it
pub fn validate_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::config(format!(
            "Input directory does not exist: {}",
            dir.display()
        )))
    }
}
