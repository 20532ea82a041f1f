//! Command-line parsing for the fare model trainer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the training/distillation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fare", version, about = "Flight fare model trainer & coefficient distiller")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train candidate models and distill the winner into a coefficient bundle.
    Train(TrainArgs),
    /// Pretty-print a previously written coefficient bundle.
    Show(ShowArgs),
}

/// Options for a training run.
#[derive(Debug, Parser, Clone)]
pub struct TrainArgs {
    /// Path to the Kaggle Clean_Dataset.csv export. If omitted, a fixed
    /// search path (and the FARE_DATASET environment variable) is tried, and
    /// the run falls back to synthetic data when nothing is found.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Number of synthetic samples to generate when no real dataset is found.
    #[arg(short = 'n', long, default_value_t = 15_000)]
    pub samples: usize,

    /// Random seed (split shuffle, ensemble bootstraps, synthetic generation).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Where to write the coefficient bundle.
    #[arg(short = 'o', long, default_value = "model_coefficients.json")]
    pub output: PathBuf,
}

/// Options for inspecting a saved bundle.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Bundle JSON produced by `fare train`.
    #[arg(default_value = "model_coefficients.json")]
    pub bundle: PathBuf,
}
