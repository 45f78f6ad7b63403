//! Generic parquet decoding: file → record batches → typed rows.
//!
//! Column-to-field binding follows the serde names on the row type, so the
//! renames in [`super::model`] are what tie the structs to the export schema.

use std::fs::File;
use std::path::Path;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;

use super::{ArtifactError, ArtifactResult};

/// Read every row of a parquet file into typed records.
pub(super) fn read_rows<T>(name: &str, path: &Path) -> ArtifactResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| malformed(name, "open", e))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| malformed(name, "parquet metadata", e))?
        .build()
        .map_err(|e| malformed(name, "parquet reader", e))?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| malformed(name, "record batch", e))?;
        let mut decoded: Vec<T> =
            serde_arrow::from_record_batch(&batch).map_err(|e| malformed(name, "decode", e))?;
        rows.append(&mut decoded);
    }
    Ok(rows)
}

fn malformed(name: &str, stage: &str, err: impl std::fmt::Display) -> ArtifactError {
    ArtifactError::Malformed {
        name: name.to_string(),
        message: format!("{stage}: {err}"),
    }
}
