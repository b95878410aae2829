#![allow(clippy::all)]
use clap::{Parser, Subcommand};
use clap_markdown;

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
    clap_markdown::print_help_markdown::<Cli>();
}
