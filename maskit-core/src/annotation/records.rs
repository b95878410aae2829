// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::annotation::ShapeKind;
use crate::error::MaskError;

/// A single annotated shape as exported by the annotation tool
///
/// Missing fields fall back to frame 0, no points, and polygon type. An
/// explicit `null` type is kept as `None` and later ignored like any other
/// unknown type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShapeRecord {
    #[serde(default)]
    pub frame: i64,

    #[serde(default)]
    pub points: Vec<f64>,

    #[serde(rename = "type", default = "default_kind")]
    pub kind: Option<ShapeKind>,
}

fn default_kind() -> Option<ShapeKind> {
    Some(ShapeKind::Polygon)
}

impl ShapeRecord {
    /// Shape kind with `null` mapped to unknown
    pub fn kind(&self) -> ShapeKind {
        self.kind.unwrap_or(ShapeKind::Unknown)
    }
}

/// A top-level entry of an annotation export holding an optional shape list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationEntry {
    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,
}

/// Parse annotation json text into a flat list of shape records in input order
///
/// # Examples
///
/// ```
/// use maskit_core::annotation::{parse_annotations, ShapeKind};
///
/// let records = parse_annotations(r#"[
///     {"version": "1.0", "shapes": [{"frame": 3, "points": [0, 0, 4, 0, 4, 4]}]},
///     {"tags": []}
/// ]"#).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].frame, 3);
/// assert_eq!(records[0].kind(), ShapeKind::Polygon);
/// ```
pub fn parse_annotations(contents: &str) -> Result<Vec<ShapeRecord>, MaskError> {
    let entries: Vec<AnnotationEntry> = serde_json::from_str(contents)
        .map_err(|err| MaskError::AnnotationReadError(err.to_string()))?;

    Ok(entries.into_iter().flat_map(|entry| entry.shapes).collect())
}

/// Read annotation json from disk into a flat list of shape records
///
/// # Arguments
///
/// * `path` - Path to an exported annotations json file
///
/// ```no_run
/// use maskit_core::annotation::read_annotations;
/// let records = read_annotations("annotations.json");
/// ```
pub fn read_annotations<P: AsRef<Path>>(path: P) -> Result<Vec<ShapeRecord>, MaskError> {
    let file = File::open(&path).map_err(|err| {
        MaskError::NoFileError(format!("{} ({})", path.as_ref().display(), err))
    })?;

    let entries: Vec<AnnotationEntry> = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| MaskError::AnnotationReadError(err.to_string()))?;

    Ok(entries.into_iter().flat_map(|entry| entry.shapes).collect())
}
