// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::constant::SUPPORTED_TABLE_FORMATS;
use crate::error::MaskError;

fn create_table_file<P: AsRef<Path>>(path: P) -> Result<File, MaskError> {
    File::create(&path).map_err(|err| {
        MaskError::TableError(format!(
            "Failed to create table file {} ({})",
            path.as_ref().display(),
            err
        ))
    })
}

/// Write a table to a delimited text file with a header row
fn write_table_delimited<P: AsRef<Path>>(
    df: &mut DataFrame,
    path: P,
    separator: u8,
) -> Result<(), MaskError> {
    let mut output = create_table_file(&path)?;

    CsvWriter::new(&mut output)
        .include_header(true)
        .with_separator(separator)
        .finish(df)
        .map_err(|err| MaskError::TableError(format!("Failed to write delimited table ({})", err)))
}

/// Write a table to a parquet file
fn write_table_pq<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<(), MaskError> {
    let mut output = create_table_file(&path)?;

    ParquetWriter::new(&mut output)
        .finish(df)
        .map(|_| ())
        .map_err(|err| MaskError::TableError(format!("Failed to write parquet table ({})", err)))
}

/// Write a DataFrame to disk with the format chosen by file extension
///
/// # Arguments
///
/// * `df` - A DataFrame
/// * `path` - Output path ending in csv, tsv, txt, parquet, or pq
///
/// # Examples
///
/// ```no_run
/// use polars::prelude::*;
/// use maskit_core::io::write_table;
///
/// let column = vec![Column::new("iou".into(), [0.5, 0.75, 1.0])];
/// let mut df: DataFrame = DataFrame::new(column).unwrap();
///
/// write_table(&mut df, "comparison.csv").unwrap()
/// ```
pub fn write_table<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<(), MaskError> {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("csv") => write_table_delimited(df, path, b','),
        Some("tsv") | Some("txt") => write_table_delimited(df, path, b'\t'),
        Some("parquet") | Some("pq") => write_table_pq(df, path),
        _ => Err(MaskError::TableError(format!(
            "Table path has an invalid extension. Must be one of: {}",
            SUPPORTED_TABLE_FORMATS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn table() -> DataFrame {
        DataFrame::new(vec![
            Column::new("reference".into(), ["mask_frame_0.png", "Overall"]),
            Column::new("iou".into(), [0.5, 0.5]),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_table_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.csv");

        write_table(&mut table(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("reference,iou"));
        assert!(contents.contains("Overall,0.5"));
    }

    #[test]
    fn test_write_table_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.TSV");

        write_table(&mut table(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("reference\tiou"));
    }

    #[test]
    fn test_write_table_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.pq");

        write_table(&mut table(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_write_table_invalid_extension() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["comparison.json", "comparison"] {
            let result = write_table(&mut table(), dir.path().join(name));
            assert!(matches!(result, Err(MaskError::TableError(_))));
        }
    }
}
