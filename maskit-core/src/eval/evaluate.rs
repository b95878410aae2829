// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::constant::{OVERALL_KEY, REFERENCE_PREFIX, REFERENCE_SUFFIX};
use crate::error::MaskError;
use crate::eval::{CandidateNaming, FrameOffsetNaming, MaskMetrics, compare_masks};
use crate::ut::path::collect_file_names;

/// Directories and naming strategy for a batch comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig<N = FrameOffsetNaming> {
    pub references: PathBuf,
    pub candidates: PathBuf,
    pub naming: N,
}

impl CompareConfig<FrameOffsetNaming> {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(references: P, candidates: Q) -> Self {
        CompareConfig {
            references: references.as_ref().to_path_buf(),
            candidates: candidates.as_ref().to_path_buf(),
            naming: FrameOffsetNaming::default(),
        }
    }
}

impl<N: CandidateNaming> CompareConfig<N> {
    /// Swap in a different candidate naming strategy
    pub fn with_naming<M: CandidateNaming>(self, naming: M) -> CompareConfig<M> {
        CompareConfig {
            references: self.references,
            candidates: self.candidates,
            naming,
        }
    }
}

/// A reference mask and the candidate mask found for it
#[derive(Debug, Clone, PartialEq)]
pub struct MaskPair {
    pub reference_name: String,
    pub candidate_name: String,
    pub reference: PathBuf,
    pub candidate: PathBuf,
}

/// A reference mask without a matching candidate
///
/// `expected` is None when no candidate name could be derived at all.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingPair {
    pub reference_name: String,
    pub expected: Option<String>,
}

/// Reference masks split by whether a candidate was found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaskPairs {
    pub matched: Vec<MaskPair>,
    pub missing: Vec<MissingPair>,
}

/// Match every reference mask to its candidate in sorted reference order
///
/// # Arguments
///
/// * `config` - Reference directory, candidate directory and naming strategy
pub fn collect_mask_pairs<N: CandidateNaming>(
    config: &CompareConfig<N>,
) -> Result<MaskPairs, MaskError> {
    let references = collect_file_names(&config.references, REFERENCE_PREFIX, REFERENCE_SUFFIX)?;

    let mut pairs = MaskPairs::default();

    for reference_name in references {
        match config.naming.candidate_name(&reference_name) {
            Some(candidate_name) => {
                let candidate = config.candidates.join(&candidate_name);

                if candidate.exists() {
                    pairs.matched.push(MaskPair {
                        reference: config.references.join(&reference_name),
                        candidate,
                        reference_name,
                        candidate_name,
                    });
                } else {
                    pairs.missing.push(MissingPair {
                        reference_name,
                        expected: Some(candidate_name),
                    });
                }
            }
            None => pairs.missing.push(MissingPair {
                reference_name,
                expected: None,
            }),
        }
    }

    Ok(pairs)
}

/// Metrics recorded for one compared pair
#[derive(Debug, Clone, PartialEq)]
pub struct PairResult {
    pub reference_name: String,
    pub candidate_name: String,
    pub metrics: MaskMetrics,
}

/// Accumulated per-pair metrics with an overall mean
///
/// # Examples
///
/// ```
/// use maskit_core::eval::{Evaluation, MaskMetrics};
///
/// let mut evaluation = Evaluation::default();
/// evaluation.push("mask_frame_0.png", "a.png", MaskMetrics { iou: 1.0, accuracy: 1.0 });
/// evaluation.push("mask_frame_1.png", "b.png", MaskMetrics { iou: 0.5, accuracy: 0.9 });
///
/// let overall = evaluation.overall();
/// assert_eq!(overall.iou, 0.75);
/// assert!((overall.accuracy - 0.95).abs() < 1e-12);
/// assert_eq!(evaluation.to_map().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    results: Vec<PairResult>,
}

impl Evaluation {
    /// Record metrics for a compared pair
    pub fn push<S: Into<String>, T: Into<String>>(
        &mut self,
        reference_name: S,
        candidate_name: T,
        metrics: MaskMetrics,
    ) {
        self.results.push(PairResult {
            reference_name: reference_name.into(),
            candidate_name: candidate_name.into(),
            metrics,
        });
    }

    /// Compare a matched pair and record its metrics
    ///
    /// Returns the load error when the pair was recorded with zeroed metrics.
    pub fn record(&mut self, pair: &MaskPair) -> Option<MaskError> {
        let compared = compare_masks(&pair.reference, &pair.candidate);

        self.push(
            pair.reference_name.as_str(),
            pair.candidate_name.as_str(),
            compared.metrics,
        );

        compared.error
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Recorded pairs in comparison order
    pub fn iter(&self) -> impl Iterator<Item = &PairResult> {
        self.results.iter()
    }

    /// Metrics for a reference mask by file name
    pub fn get(&self, reference_name: &str) -> Option<&MaskMetrics> {
        self.results
            .iter()
            .find(|result| result.reference_name == reference_name)
            .map(|result| &result.metrics)
    }

    /// Arithmetic mean of IoU and accuracy over all recorded pairs
    pub fn overall(&self) -> MaskMetrics {
        if self.results.is_empty() {
            return MaskMetrics::ZERO;
        }

        let n = self.results.len() as f64;
        let (iou, accuracy) = self.results.iter().fold((0.0, 0.0), |(iou, acc), r| {
            (iou + r.metrics.iou, acc + r.metrics.accuracy)
        });

        MaskMetrics {
            iou: iou / n,
            accuracy: accuracy / n,
        }
    }

    /// Reference file name to metrics, plus the overall mean under `Overall`
    pub fn to_map(&self) -> BTreeMap<String, MaskMetrics> {
        let mut map: BTreeMap<String, MaskMetrics> = self
            .results
            .iter()
            .map(|result| (result.reference_name.clone(), result.metrics))
            .collect();

        map.insert(OVERALL_KEY.to_string(), self.overall());
        map
    }

    /// Tabulate pairs with a trailing `Overall` row
    pub fn to_dataframe(&self) -> Result<DataFrame, MaskError> {
        let overall = self.overall();

        let mut references: Vec<String> = Vec::with_capacity(self.len() + 1);
        let mut candidates: Vec<String> = Vec::with_capacity(self.len() + 1);
        let mut ious: Vec<f64> = Vec::with_capacity(self.len() + 1);
        let mut accuracies: Vec<f64> = Vec::with_capacity(self.len() + 1);

        for result in self.results.iter() {
            references.push(result.reference_name.clone());
            candidates.push(result.candidate_name.clone());
            ious.push(result.metrics.iou);
            accuracies.push(result.metrics.accuracy);
        }

        references.push(OVERALL_KEY.to_string());
        candidates.push(String::new());
        ious.push(overall.iou);
        accuracies.push(overall.accuracy);

        DataFrame::new(vec![
            Column::new("reference".into(), references),
            Column::new("candidate".into(), candidates),
            Column::new("iou".into(), ious),
            Column::new("accuracy".into(), accuracies),
        ])
        .map_err(|err| MaskError::TableError(err.to_string()))
    }
}

/// Outcome of a full batch comparison
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub evaluation: Evaluation,
    pub missing: Vec<MissingPair>,
    pub degraded: Vec<(String, MaskError)>,
}

/// Compare every reference mask in a directory against its candidate
///
/// Missing candidates are excluded from the overall mean. Unreadable masks
/// are included with zero metrics and listed as degraded.
///
/// ```no_run
/// use maskit_core::eval::{CompareConfig, evaluate_directories};
///
/// let config = CompareConfig::new("grouped_masks", "predictions");
/// let report = evaluate_directories(&config).unwrap();
/// println!("{:?}", report.evaluation.overall());
/// ```
pub fn evaluate_directories<N: CandidateNaming>(
    config: &CompareConfig<N>,
) -> Result<EvaluationReport, MaskError> {
    evaluate_directories_with(config, |_, _| {})
}

/// Compare every reference mask in a directory, reporting each scored pair
///
/// `on_pair` runs after every matched pair is recorded and receives the
/// recorded result along with the total number of matched pairs.
///
/// # Arguments
///
/// * `config` - Reference directory, candidate directory and naming strategy
/// * `on_pair` - Called once per compared pair in sorted reference order
pub fn evaluate_directories_with<N, F>(
    config: &CompareConfig<N>,
    mut on_pair: F,
) -> Result<EvaluationReport, MaskError>
where
    N: CandidateNaming,
    F: FnMut(&PairResult, usize),
{
    let pairs = collect_mask_pairs(config)?;
    let total = pairs.matched.len();

    let mut report = EvaluationReport {
        missing: pairs.missing,
        ..EvaluationReport::default()
    };

    for pair in pairs.matched.iter() {
        if let Some(err) = report.evaluation.record(pair) {
            report.degraded.push((pair.reference_name.clone(), err));
        }

        if let Some(result) = report.evaluation.results.last() {
            on_pair(result, total);
        }
    }

    Ok(report)
}
