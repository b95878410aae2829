// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use clap::{Parser, Subcommand};
use maskit_cli::{build, compare};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Build(build::BuildArgs),
    Compare(compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Build(build_args)) => build::build(build_args),
        Some(Commands::Compare(compare_args)) => compare::compare(compare_args),
        None => {}
    }
}
