// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::annotation::{Draw, Shape, ShapeRecord, SkippedShape, read_annotations};
use crate::constant::DEFAULT_CANVAS_SIZE;
use crate::error::MaskError;
use crate::im::MaskBuffer;
use crate::ut::path::ensure_directory;

/// Settings for converting an annotation export into frame masks
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl BuildConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        BuildConfig {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            width: DEFAULT_CANVAS_SIZE.0,
            height: DEFAULT_CANVAS_SIZE.1,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Counts of what happened to each shape record while rasterizing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeTally {
    pub drawn: usize,
    pub ignored: usize,
    pub skipped: Vec<SkippedShape>,
}

/// Summary of a completed build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub written: Vec<PathBuf>,
    pub tally: ShapeTally,
}

/// Per-frame binary canvases of a fixed size
///
/// A canvas is allocated the first time a frame index is referenced, even
/// if none of that frame's shapes end up being drawn.
///
/// # Examples
///
/// ```
/// use maskit_core::annotation::{FrameMasks, parse_annotations};
///
/// let records = parse_annotations(r#"[{"shapes": [
///     {"frame": 1, "points": [0, 0, 2, 0, 2, 2, 0, 2]},
///     {"frame": 4, "points": [0, 0]}
/// ]}]"#).unwrap();
///
/// let (masks, tally) = FrameMasks::from_records(&records, 8, 8);
///
/// assert_eq!(masks.len(), 2);
/// assert_eq!(masks.get(1).unwrap().count_foreground(), 9);
/// assert_eq!(masks.get(4).unwrap().count_foreground(), 0);
/// assert_eq!(tally.skipped.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameMasks {
    width: u32,
    height: u32,
    frames: BTreeMap<i64, MaskBuffer>,
}

impl FrameMasks {
    pub fn new(width: u32, height: u32) -> Self {
        FrameMasks {
            width,
            height,
            frames: BTreeMap::new(),
        }
    }

    /// Rasterize shape records in input order onto their frame canvases
    ///
    /// # Arguments
    ///
    /// * `records` - Shape records in annotation order
    /// * `width` - Canvas width
    /// * `height` - Canvas height
    pub fn from_records(records: &[ShapeRecord], width: u32, height: u32) -> (Self, ShapeTally) {
        let mut masks = FrameMasks::new(width, height);
        let mut tally = ShapeTally::default();

        for record in records {
            let canvas = masks.canvas(record.frame);

            match Shape::from_record(record) {
                Ok(Some(shape)) => {
                    shape.draw(canvas);
                    tally.drawn += 1;
                }
                Ok(None) => tally.ignored += 1,
                Err(reason) => tally.skipped.push(SkippedShape {
                    frame: record.frame,
                    kind: record.kind(),
                    points: record.points.clone(),
                    reason,
                }),
            }
        }

        (masks, tally)
    }

    /// Canvas for a frame, allocating a zero canvas on first use
    pub fn canvas(&mut self, frame: i64) -> &mut MaskBuffer {
        let (width, height) = (self.width, self.height);
        self.frames
            .entry(frame)
            .or_insert_with(|| MaskBuffer::zeros(width, height))
    }

    pub fn get(&self, frame: i64) -> Option<&MaskBuffer> {
        self.frames.get(&frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame indices and canvases in ascending frame order
    pub fn iter(&self) -> impl Iterator<Item = (&i64, &MaskBuffer)> {
        self.frames.iter()
    }

    /// Output file name for a frame, e.g. `mask_frame_3_1500x1500.png`
    pub fn file_name(&self, frame: i64) -> String {
        format!("mask_frame_{}_{}x{}.png", frame, self.width, self.height)
    }

    /// Write every frame canvas into a directory, creating it if needed
    ///
    /// Files written before a failing write are left in place.
    pub fn save<P: AsRef<Path>>(&self, directory: P) -> Result<Vec<PathBuf>, MaskError> {
        let directory = ensure_directory(directory)?;
        let mut written = Vec::with_capacity(self.len());

        for (frame, canvas) in self.iter() {
            let path = directory.join(self.file_name(*frame));
            canvas.save(&path)?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Convert an annotation export into one mask image per frame
///
/// Malformed shapes are skipped and reported in the returned tally. An
/// unreadable or malformed annotation file aborts the run.
///
/// ```no_run
/// use maskit_core::annotation::{BuildConfig, create_masks_from_annotations};
///
/// let config = BuildConfig::new("annotations.json", "grouped_masks").with_size(1500, 1500);
/// let report = create_masks_from_annotations(&config).unwrap();
/// ```
pub fn create_masks_from_annotations(config: &BuildConfig) -> Result<BuildReport, MaskError> {
    let records = read_annotations(&config.input)?;

    let (masks, tally) = FrameMasks::from_records(&records, config.width, config.height);
    let written = masks.save(&config.output)?;

    Ok(BuildReport { written, tally })
}
