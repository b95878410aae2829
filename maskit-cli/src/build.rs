// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::PathBuf;

use clap::Args;

use maskit_core::annotation::{BuildConfig, create_masks_from_annotations};
use maskit_core::constant::DEFAULT_CANVAS_SIZE;
use maskit_core::ut;

#[derive(Debug, Args)]
#[command(about = "Rasterize annotated shapes into one binary mask per frame.")]
pub struct BuildArgs {
    #[arg(short = 'i', long, help = "Annotations json file.", required = true)]
    pub input: Option<String>,

    #[arg(short = 'o', long, help = "Output mask directory.", required = true)]
    pub output: Option<String>,

    #[arg(long, help = "Mask width in pixels.", default_value_t = DEFAULT_CANVAS_SIZE.0)]
    pub width: u32,

    #[arg(long, help = "Mask height in pixels.", default_value_t = DEFAULT_CANVAS_SIZE.1)]
    pub height: u32,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn build(args: &BuildArgs) {
    let (Some(input), Some(output)) = (args.input.as_ref(), args.output.as_ref()) else {
        eprintln!("[maskit::build] ERROR: Both an input and an output path must be provided.");
        std::process::exit(1);
    };

    let input = PathBuf::from(input);
    let output = PathBuf::from(output);

    if !input.is_file() {
        eprintln!(
            "[maskit::build] ERROR: Annotations file {} does not exist.",
            input.display()
        );
        std::process::exit(1);
    }

    if output.exists() && !output.is_dir() {
        eprintln!(
            "[maskit::build] ERROR: Output path {} exists and is not a directory.",
            output.display()
        );
        std::process::exit(1);
    }

    if args.width == 0 || args.height == 0 {
        eprintln!("[maskit::build] ERROR: Width and height must be positive integers.");
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!("Reading annotations from {}.", input.display()),
        args.verbose,
    );

    let config = BuildConfig::new(&input, &output).with_size(args.width, args.height);

    let report = create_masks_from_annotations(&config).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    for skipped in report.tally.skipped.iter() {
        ut::track::progress_warn(&skipped.to_string());
    }

    ut::track::progress_log(
        &format!(
            "Complete. {} masks ({}x{}) written to {}. {} shapes drawn, {} skipped, {} ignored.",
            ut::track::thousands_format(report.written.len()),
            config.width,
            config.height,
            config.output.display(),
            ut::track::thousands_format(report.tally.drawn),
            ut::track::thousands_format(report.tally.skipped.len()),
            ut::track::thousands_format(report.tally.ignored),
        ),
        args.verbose,
    );
}
