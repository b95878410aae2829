// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::fmt;

use enum_dispatch::enum_dispatch;
use serde::Deserialize;

use crate::annotation::ShapeRecord;
use crate::constant::{FOREGROUND, POLYLINE_THICKNESS};
use crate::cv::{draw_polyline, fill_ellipse, fill_polygon};
use crate::im::MaskBuffer;

/// Rasterize a shape onto a frame canvas
#[enum_dispatch]
pub trait Draw {
    fn draw(&self, canvas: &mut MaskBuffer);
}

/// Annotation shape types understood by the mask builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Polygon,
    Polyline,
    Ellipse,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShapeKind::Polygon => write!(f, "polygon"),
            ShapeKind::Polyline => write!(f, "polyline"),
            ShapeKind::Ellipse => write!(f, "ellipse"),
            ShapeKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A closed polygon filled with foreground
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<[i32; 2]>,
}

impl Draw for Polygon {
    fn draw(&self, canvas: &mut MaskBuffer) {
        fill_polygon(canvas, &self.points, FOREGROUND);
    }
}

/// An open path stroked with foreground
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<[i32; 2]>,
    pub thickness: u32,
}

impl Draw for Polyline {
    fn draw(&self, canvas: &mut MaskBuffer) {
        draw_polyline(canvas, &self.points, self.thickness, FOREGROUND);
    }
}

/// A full (0 to 360 degree) filled ellipse
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: [i32; 2],
    pub axes: [i32; 2],
    pub angle: f64,
}

impl Draw for Ellipse {
    fn draw(&self, canvas: &mut MaskBuffer) {
        fill_ellipse(canvas, self.center, self.axes, self.angle, FOREGROUND);
    }
}

/// A validated shape ready to be drawn
#[enum_dispatch(Draw)]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polygon,
    Polyline,
    Ellipse,
}

/// Why a shape record was left off its frame
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    InvalidPoints,
    TooFewPoints { required: usize, found: usize },
    NegativeAxes,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::InvalidPoints => write!(f, "invalid or empty points array"),
            SkipReason::TooFewPoints { required, found } => {
                write!(f, "insufficient points ({} of {} required)", found, required)
            }
            SkipReason::NegativeAxes => write!(f, "negative ellipse axes"),
        }
    }
}

/// A shape record that could not be drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShape {
    pub frame: i64,
    pub kind: ShapeKind,
    pub points: Vec<f64>,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Skipping {} on frame {} with {}: {:?}",
            self.kind, self.frame, self.reason, self.points
        )
    }
}

impl Shape {
    /// Validate a shape record and convert it into a drawable shape
    ///
    /// Coordinates are truncated toward zero. Returns `Ok(None)` for
    /// unknown shape types, which are ignored without a diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// use maskit_core::annotation::{Shape, ShapeKind, ShapeRecord, SkipReason};
    ///
    /// let record = ShapeRecord { frame: 0, points: vec![1.9, 2.0, 5.0, 2.0, 5.0, 6.0], kind: Some(ShapeKind::Polygon) };
    /// assert!(matches!(Shape::from_record(&record), Ok(Some(Shape::Polygon(_)))));
    ///
    /// let record = ShapeRecord { frame: 0, points: vec![1.0, 2.0, 3.0], kind: Some(ShapeKind::Polygon) };
    /// assert_eq!(Shape::from_record(&record), Err(SkipReason::InvalidPoints));
    /// ```
    pub fn from_record(record: &ShapeRecord) -> Result<Option<Shape>, SkipReason> {
        let values = &record.points;

        if values.is_empty() || values.len() % 2 != 0 {
            return Err(SkipReason::InvalidPoints);
        }

        let points: Vec<[i32; 2]> = values
            .chunks_exact(2)
            .map(|xy| [xy[0] as i32, xy[1] as i32])
            .collect();

        match record.kind() {
            ShapeKind::Polygon => {
                if points.len() < 3 {
                    return Err(SkipReason::TooFewPoints {
                        required: 3,
                        found: points.len(),
                    });
                }

                Ok(Some(Shape::Polygon(Polygon { points })))
            }
            ShapeKind::Polyline => {
                if points.len() < 2 {
                    return Err(SkipReason::TooFewPoints {
                        required: 2,
                        found: points.len(),
                    });
                }

                Ok(Some(Shape::Polyline(Polyline {
                    points,
                    thickness: POLYLINE_THICKNESS,
                })))
            }
            ShapeKind::Ellipse => {
                if values.len() < 4 {
                    return Err(SkipReason::TooFewPoints {
                        required: 4,
                        found: values.len(),
                    });
                }

                let axes = [values[2] as i32, values[3] as i32];

                if axes[0] < 0 || axes[1] < 0 {
                    return Err(SkipReason::NegativeAxes);
                }

                Ok(Some(Shape::Ellipse(Ellipse {
                    center: [values[0] as i32, values[1] as i32],
                    axes,
                    angle: values.get(4).map(|a| a.trunc()).unwrap_or(0.0),
                })))
            }
            ShapeKind::Unknown => Ok(None),
        }
    }
}
