// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use crate::constant::{CANDIDATE_FRAME_OFFSET, CANDIDATE_PREFIX, CANDIDATE_SUFFIX};

/// Maps a reference mask file name to the expected candidate file name
///
/// Any `Fn(&str) -> Option<String>` closure is a valid naming strategy.
///
/// # Examples
///
/// ```
/// use maskit_core::eval::CandidateNaming;
///
/// let same_name = |reference: &str| Some(reference.to_string());
/// assert_eq!(same_name.candidate_name("mask_frame_0.png"), Some("mask_frame_0.png".to_string()));
/// ```
pub trait CandidateNaming {
    fn candidate_name(&self, reference: &str) -> Option<String>;
}

impl<F> CandidateNaming for F
where
    F: Fn(&str) -> Option<String>,
{
    fn candidate_name(&self, reference: &str) -> Option<String> {
        self(reference)
    }
}

/// Candidate named `<prefix><frame + offset><suffix>` from the reference frame index
///
/// # Examples
///
/// ```
/// use maskit_core::eval::{CandidateNaming, FrameOffsetNaming};
///
/// let naming = FrameOffsetNaming::default();
/// assert_eq!(
///     naming.candidate_name("mask_frame_4_1500x1500.png"),
///     Some("mejorada_recortada_0301-5_mascara.png".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOffsetNaming {
    pub prefix: String,
    pub suffix: String,
    pub offset: i64,
}

impl Default for FrameOffsetNaming {
    fn default() -> Self {
        FrameOffsetNaming {
            prefix: CANDIDATE_PREFIX.to_string(),
            suffix: CANDIDATE_SUFFIX.to_string(),
            offset: CANDIDATE_FRAME_OFFSET,
        }
    }
}

impl CandidateNaming for FrameOffsetNaming {
    fn candidate_name(&self, reference: &str) -> Option<String> {
        let frame = reference_frame(reference)?.checked_add(self.offset)?;
        Some(format!("{}{}{}", self.prefix, frame, self.suffix))
    }
}

/// Frame index encoded as the third `_`-separated token of a reference name
///
/// Anything from the first `.` in that token onward is dropped, so both
/// `mask_frame_12_1500x1500.png` and `mask_frame_12.png` give 12.
///
/// # Examples
///
/// ```
/// use maskit_core::eval::reference_frame;
///
/// assert_eq!(reference_frame("mask_frame_12_1500x1500.png"), Some(12));
/// assert_eq!(reference_frame("mask_frame_12.png"), Some(12));
/// assert_eq!(reference_frame("mask_frame.png"), None);
/// ```
pub fn reference_frame(name: &str) -> Option<i64> {
    name.split('_')
        .nth(2)?
        .split('.')
        .next()?
        .parse::<i64>()
        .ok()
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_reference_frame_invalid() {
        assert_eq!(reference_frame("mask_frame_abc.png"), None);
        assert_eq!(reference_frame("mask_frame_.png"), None);
        assert_eq!(reference_frame("mask"), None);
    }

    #[test]
    fn test_frame_offset_naming_custom() {
        let naming = FrameOffsetNaming {
            prefix: "pred_".to_string(),
            suffix: ".npy".to_string(),
            offset: 0,
        };

        assert_eq!(
            naming.candidate_name("mask_frame_7_10x10.png"),
            Some("pred_7.npy".to_string())
        );
        assert_eq!(naming.candidate_name("mask_frame_x.png"), None);
    }

    #[test]
    fn test_frame_offset_naming_negative_offset() {
        let naming = FrameOffsetNaming {
            offset: -1,
            ..FrameOffsetNaming::default()
        };

        assert_eq!(
            naming.candidate_name("mask_frame_0.png"),
            Some("mejorada_recortada_0301--1_mascara.png".to_string())
        );
    }
}
