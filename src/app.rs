//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the training pipeline
//! - writes the coefficient bundle
//! - prints the run summary

use clap::Parser;

use crate::cli::{Command, ShowArgs, TrainArgs};
use crate::domain::TrainConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fare` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fare` and `fare --seed 7` to behave like `fare train ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Train(args) => handle_train(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_train(args: TrainArgs) -> Result<(), AppError> {
    let config = train_config_from_args(&args);
    let run = pipeline::run_train(&config)?;

    crate::io::write_bundle_json(&config.output_path, &run.bundle)?;
    println!("{}", crate::report::format_run_summary(&run, &config));

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let bundle = crate::io::read_bundle_json(&args.bundle)?;
    println!("{}", crate::report::format_bundle(&bundle));
    Ok(())
}

pub fn train_config_from_args(args: &TrainArgs) -> TrainConfig {
    TrainConfig {
        data_path: args.data.clone(),
        sample_count: args.samples,
        seed: args.seed,
        output_path: args.output.clone(),
    }
}

/// Rewrite argv so `fare` defaults to `fare train`.
///
/// Rules:
/// - `fare`                     -> `fare train`
/// - `fare --seed 7 ...`        -> `fare train --seed 7 ...`
/// - `fare --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("train".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "train" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "train flags".
    if arg1.starts_with('-') {
        argv.insert(1, "train".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_train() {
        assert_eq!(rewrite_args(argv(&["fare"])), argv(&["fare", "train"]));
    }

    #[test]
    fn leading_flag_becomes_train_flags() {
        assert_eq!(
            rewrite_args(argv(&["fare", "--seed", "7"])),
            argv(&["fare", "train", "--seed", "7"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["fare", "show", "bundle.json"])),
            argv(&["fare", "show", "bundle.json"])
        );
        assert_eq!(rewrite_args(argv(&["fare", "--help"])), argv(&["fare", "--help"]));
        assert_eq!(rewrite_args(argv(&["fare", "-V"])), argv(&["fare", "-V"]));
    }

    #[test]
    fn config_carries_all_args() {
        let args = TrainArgs {
            data: Some("Clean_Dataset.csv".into()),
            samples: 500,
            seed: 9,
            output: "out.json".into(),
        };
        let config = train_config_from_args(&args);
        assert_eq!(config.data_path.as_deref(), Some(std::path::Path::new("Clean_Dataset.csv")));
        assert_eq!(config.sample_count, 500);
        assert_eq!(config.seed, 9);
        assert_eq!(config.output_path, std::path::PathBuf::from("out.json"));
    }
}
