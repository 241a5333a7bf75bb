//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// ID3 decision trees for categorical CSV datasets: build, inspect and classify
#[derive(Parser, Debug)]
#[command(name = "id3tree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (layered over the global config)
    #[arg(short, long, global = true, env = "ID3TREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Dataset selection shared by all training commands.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// CSV dataset, first line is the header
    #[arg(value_hint = ValueHint::FilePath)]
    pub dataset: PathBuf,

    /// Label column (default: config value, else last column)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Feature to split on, repeatable; order decides gain ties (default: all other columns)
    #[arg(short = 'f', long = "feature")]
    pub features: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the tree and print it
    Tree {
        #[command(flatten)]
        data: DatasetArgs,

        /// Hide fallback labels of internal nodes
        #[arg(long)]
        no_fallback: bool,
    },

    /// Classify one sample
    Predict {
        #[command(flatten)]
        data: DatasetArgs,

        /// Sample value as FEATURE=VALUE, repeatable
        #[arg(short, long = "sample", value_parser = parse_key_val, required = true)]
        sample: Vec<(String, String)>,

        /// Show the decision path and fallback reason
        #[arg(short, long)]
        explain: bool,
    },

    /// Accuracy on the training set or a separate test set
    Evaluate {
        #[command(flatten)]
        data: DatasetArgs,

        /// Labeled test set with the same columns
        #[arg(long, value_hint = ValueHint::FilePath)]
        test: Option<PathBuf>,
    },

    /// Information gain of each feature over the whole dataset
    Gains {
        #[command(flatten)]
        data: DatasetArgs,
    },

    /// Print the tree as IF/THEN rules
    Rules {
        #[command(flatten)]
        data: DatasetArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
    /// Write the template to the global config location
    Init,
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid FEATURE=VALUE: no '=' found in '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid FEATURE=VALUE: empty feature in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
