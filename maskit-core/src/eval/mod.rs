mod evaluate;
mod metrics;
mod naming;

pub use evaluate::{
    CompareConfig, Evaluation, EvaluationReport, MaskPair, MaskPairs, MissingPair, PairResult,
    collect_mask_pairs, evaluate_directories, evaluate_directories_with,
};
pub use metrics::{MaskMetrics, PairMetrics, compare_masks};
pub use naming::{CandidateNaming, FrameOffsetNaming, reference_frame};
