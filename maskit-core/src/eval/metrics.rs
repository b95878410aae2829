// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::Path;

use crate::constant::BINARY_THRESHOLD;
use crate::error::MaskError;
use crate::im::MaskBuffer;

/// Pixel-wise agreement between a reference and a candidate mask
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaskMetrics {
    pub iou: f64,
    pub accuracy: f64,
}

impl MaskMetrics {
    pub const ZERO: MaskMetrics = MaskMetrics {
        iou: 0.0,
        accuracy: 0.0,
    };

    /// Compute IoU and pixel accuracy between two masks
    ///
    /// The candidate is resized to the reference dimensions when they differ
    /// and both are binarized at a fixed threshold of 127 before comparison.
    ///
    /// # Examples
    ///
    /// ```
    /// use maskit_core::im::MaskBuffer;
    /// use maskit_core::eval::MaskMetrics;
    ///
    /// let reference = MaskBuffer::new(2, 2, vec![255, 255, 0, 0]).unwrap();
    /// let candidate = MaskBuffer::new(2, 2, vec![255, 0, 0, 0]).unwrap();
    ///
    /// let metrics = MaskMetrics::compute(&reference, &candidate).unwrap();
    /// assert_eq!(metrics.iou, 0.5);
    /// assert_eq!(metrics.accuracy, 0.75);
    /// ```
    pub fn compute(reference: &MaskBuffer, candidate: &MaskBuffer) -> Result<Self, MaskError> {
        let reference = reference.threshold(BINARY_THRESHOLD);

        let candidate = if candidate.shape() != reference.shape() {
            candidate.resize(reference.width(), reference.height())?
        } else {
            candidate.clone()
        }
        .threshold(BINARY_THRESHOLD);

        Self::from_binary(&reference, &candidate)
    }

    /// Compute IoU and pixel accuracy between two same-sized masks
    ///
    /// Any non-zero pixel is foreground. An empty union gives an IoU of 0.0
    /// and an empty grid gives an accuracy of 0.0.
    pub fn from_binary(reference: &MaskBuffer, candidate: &MaskBuffer) -> Result<Self, MaskError> {
        if reference.shape() != candidate.shape() {
            return Err(MaskError::BufferSizeError);
        }

        let mut intersection = 0usize;
        let mut union = 0usize;
        let mut agree = 0usize;

        for (&r, &c) in reference.iter().zip(candidate.iter()) {
            let r = r != 0;
            let c = c != 0;

            intersection += (r && c) as usize;
            union += (r || c) as usize;
            agree += (r == c) as usize;
        }

        let iou = if union > 0 {
            intersection as f64 / union as f64
        } else {
            0.0
        };

        let accuracy = if reference.is_empty() {
            0.0
        } else {
            agree as f64 / reference.len() as f64
        };

        Ok(MaskMetrics { iou, accuracy })
    }
}

/// Metrics for a pair of mask files along with the reason they were zeroed
#[derive(Debug, Clone, PartialEq)]
pub struct PairMetrics {
    pub metrics: MaskMetrics,
    pub error: Option<MaskError>,
}

impl PairMetrics {
    /// Check if metrics were replaced by zeros after a load failure
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Compare a candidate mask file against a reference mask file
///
/// A mask that cannot be read yields zero IoU and accuracy together with the
/// error that caused it rather than failing the comparison.
///
/// ```no_run
/// use maskit_core::eval::compare_masks;
/// let pair = compare_masks("reference.png", "candidate.png");
/// println!("IoU = {:.4}", pair.metrics.iou);
/// ```
pub fn compare_masks<P: AsRef<Path>, Q: AsRef<Path>>(reference: P, candidate: Q) -> PairMetrics {
    let computed = MaskBuffer::open(reference).and_then(|reference| {
        let candidate = MaskBuffer::open(candidate)?;
        MaskMetrics::compute(&reference, &candidate)
    });

    match computed {
        Ok(metrics) => PairMetrics {
            metrics,
            error: None,
        },
        Err(err) => PairMetrics {
            metrics: MaskMetrics::ZERO,
            error: Some(err),
        },
    }
}
