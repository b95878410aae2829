// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::{Path, PathBuf};

use clap::Args;
use kdam::{Bar, BarExt};

use maskit_core::constant;
use maskit_core::eval::{CompareConfig, FrameOffsetNaming, evaluate_directories_with};
use maskit_core::io::write_table;
use maskit_core::ut;

#[derive(Debug, Args)]
#[command(about = "Score candidate masks against reference masks with IoU and pixel accuracy.")]
pub struct CompareArgs {
    #[arg(short = 'r', long, help = "Reference mask directory.", required = true)]
    pub references: Option<String>,

    #[arg(short = 'c', long, help = "Candidate mask directory.", required = true)]
    pub candidates: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Optional output table (.csv, .tsv, .txt, .parquet, .pq)."
    )]
    pub output: Option<String>,

    #[arg(long, help = "Candidate file name prefix.", default_value = constant::CANDIDATE_PREFIX)]
    pub candidate_prefix: String,

    #[arg(long, help = "Candidate file name suffix.", default_value = constant::CANDIDATE_SUFFIX)]
    pub candidate_suffix: String,

    #[arg(
        long,
        help = "Offset added to the reference frame index to name its candidate.",
        default_value_t = constant::CANDIDATE_FRAME_OFFSET,
        allow_negative_numbers = true
    )]
    pub frame_offset: i64,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn compare(args: &CompareArgs) {
    let (Some(references), Some(candidates)) =
        (args.references.as_ref(), args.candidates.as_ref())
    else {
        eprintln!("[maskit::compare] ERROR: Both reference and candidate directories must be provided.");
        std::process::exit(1);
    };

    for (label, directory) in [("Reference", references), ("Candidate", candidates)] {
        if !Path::new(directory).is_dir() {
            eprintln!(
                "[maskit::compare] ERROR: {} directory {} does not exist.",
                label, directory
            );
            std::process::exit(1);
        }
    }

    let output = args.output.as_ref().map(PathBuf::from);

    if let Some(output) = output.as_ref() {
        validate_table_path(output);
    }

    let config = CompareConfig::new(references, candidates).with_naming(FrameOffsetNaming {
        prefix: args.candidate_prefix.clone(),
        suffix: args.candidate_suffix.clone(),
        offset: args.frame_offset,
    });

    let mut pb: Option<Bar> = None;

    let report = evaluate_directories_with(&config, |_, total| {
        let bar = pb.get_or_insert_with(|| {
            ut::track::progress_bar(total, "Comparing masks", args.verbose)
        });
        let _ = bar.update(1);
    })
    .unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if args.verbose && pb.is_some() {
        println!()
    }

    let evaluation = &report.evaluation;

    ut::track::progress_log(
        &format!(
            "Detected {} reference masks with {} matching candidates.",
            ut::track::thousands_format(evaluation.len() + report.missing.len()),
            ut::track::thousands_format(evaluation.len())
        ),
        args.verbose,
    );

    for missing in report.missing.iter() {
        match missing.expected.as_ref() {
            Some(expected) => ut::track::progress_warn(&format!(
                "Candidate mask {} for {} not found, skipping.",
                expected, missing.reference_name
            )),
            None => ut::track::progress_warn(&format!(
                "No frame index found in {}, skipping.",
                missing.reference_name
            )),
        }
    }

    for (reference_name, err) in report.degraded.iter() {
        ut::track::progress_warn(&format!(
            "Zero scores recorded for {}. {}",
            reference_name, err
        ));
    }

    for result in evaluation.iter() {
        println!(
            "Comparing {} (reference mask) with {} (candidate mask):",
            result.reference_name, result.candidate_name
        );
        println!(
            "    IoU = {:.4}, Accuracy = {:.4}",
            result.metrics.iou, result.metrics.accuracy
        );
    }

    let overall = evaluation.overall();

    println!(
        "Overall comparison: IoU = {:.4}, Accuracy = {:.4}",
        overall.iou, overall.accuracy
    );

    if let Some(output) = output.as_ref() {
        let mut df = evaluation.to_dataframe().unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

        write_table(&mut df, output).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

        ut::track::progress_log(
            &format!("Comparison table written to {}.", output.display()),
            args.verbose,
        );
    }

    ut::track::progress_log(
        &format!(
            "Complete. {} pairs compared, {} missing, {} unreadable.",
            ut::track::thousands_format(evaluation.len()),
            ut::track::thousands_format(report.missing.len()),
            ut::track::thousands_format(report.degraded.len())
        ),
        args.verbose,
    );
}

fn validate_table_path(output: &Path) {
    let extension = output
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    let valid = extension
        .as_deref()
        .is_some_and(|ext| constant::SUPPORTED_TABLE_FORMATS.contains(&ext));

    if !valid {
        eprintln!(
            "[maskit::compare] ERROR: Invalid table extension. Must be one of: {:?}.",
            constant::SUPPORTED_TABLE_FORMATS
        );
        std::process::exit(1);
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            eprintln!(
                "[maskit::compare] ERROR: Invalid table path. Parent directory of output file path does not exist."
            );
            std::process::exit(1);
        }
    }
}
