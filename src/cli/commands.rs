//! Command dispatch

use std::collections::BTreeMap;
use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::TrainedModel;
use crate::cli::args::{Cli, Commands, ConfigCommands, DatasetArgs};
use crate::cli::output;
use crate::cli::render::TreeRender;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Dataset, FallbackReason, Outcome, Sample};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Tree { data, no_fallback } => cmd_tree(&container, data, *no_fallback),
        Commands::Predict {
            data,
            sample,
            explain,
        } => cmd_predict(&container, data, sample, *explain),
        Commands::Evaluate { data, test } => cmd_evaluate(&container, data, test.as_deref()),
        Commands::Gains { data } => cmd_gains(&container, data),
        Commands::Rules { data } => cmd_rules(&container, data),
        Commands::Config { command } => cmd_config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load(container: &ServiceContainer, data: &DatasetArgs) -> CliResult<Dataset> {
    let path = container.resolve_dataset(&data.dataset);
    let target = data
        .target
        .as_deref()
        .or(container.settings.target.as_deref());
    Ok(container.classifier.load_dataset(&path, target)?)
}

fn train(container: &ServiceContainer, data: &DatasetArgs) -> CliResult<(Dataset, TrainedModel)> {
    let dataset = load(container, data)?;
    let model = container
        .classifier
        .train(&dataset, Some(data.features.as_slice()))?;
    Ok((dataset, model))
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, data: &DatasetArgs, no_fallback: bool) -> CliResult<()> {
    let (dataset, model) = train(container, data)?;
    let show_fallback = container.settings.show_fallback && !no_fallback;

    output::header(&format!(
        "ID3 tree: {} rows, target '{}', depth {}, {} leaves",
        dataset.len(),
        model.target,
        model.tree.depth(),
        model.tree.leaf_count()
    ));
    output::info(model.tree.to_term_tree(show_fallback).to_string().trim_end());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_predict(
    container: &ServiceContainer,
    data: &DatasetArgs,
    pairs: &[(String, String)],
    explain: bool,
) -> CliResult<()> {
    let (_, model) = train(container, data)?;
    let sample = build_sample(pairs, &model.target)?;

    if !explain {
        output::info(container.classifier.predict(&model, &sample));
        return Ok(());
    }

    let prediction = container.classifier.explain(&model, &sample);
    for step in &prediction.path {
        output::detail(&format!("{} = {}", step.feature, step.value));
    }
    if let Outcome::Fallback { feature, reason } = &prediction.outcome {
        let why = match reason {
            FallbackReason::Missing => format!("sample has no value for '{}'", feature),
            FallbackReason::Unseen(value) => {
                format!("value '{}' of '{}' not seen in training", value, feature)
            }
        };
        output::warning(&format!("{}, using fallback", why));
    }
    output::action("Predicted", &prediction.label);
    Ok(())
}

/// Collect `FEATURE=VALUE` pairs into a sample.
///
/// A feature given twice is rejected. A value for `target` is dropped with a warning.
fn build_sample(pairs: &[(String, String)], target: &str) -> CliResult<Sample> {
    let mut sample = Sample::new();
    for (feature, value) in pairs {
        if sample.insert(feature.clone(), value.clone()).is_some() {
            return Err(CliError::InvalidArgs(format!(
                "feature '{}' given more than once",
                feature
            )));
        }
    }
    if sample.remove(target).is_some() {
        output::warning(&format!("ignoring target column '{}' in sample", target));
    }
    Ok(sample)
}

#[instrument(skip(container))]
fn cmd_evaluate(
    container: &ServiceContainer,
    data: &DatasetArgs,
    test: Option<&std::path::Path>,
) -> CliResult<()> {
    let (training, model) = train(container, data)?;
    let eval_set = match test {
        Some(path) => {
            let path = container.resolve_dataset(path);
            container
                .classifier
                .load_dataset(&path, Some(&model.target))?
        }
        None => training,
    };

    let evaluation = container.classifier.evaluate(&model, &eval_set)?;
    output::header(&format!(
        "Accuracy: {}/{} ({:.1}%)",
        evaluation.correct,
        evaluation.total,
        evaluation.accuracy() * 100.0
    ));

    let mut by_actual: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for ((actual, predicted), count) in &evaluation.confusion {
        by_actual
            .entry(actual.as_str())
            .or_default()
            .push(format!("{}×{}", count, predicted));
    }
    for (actual, cells) in by_actual {
        output::detail(&format!("{} → {}", actual, cells.join(", ")));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_gains(container: &ServiceContainer, data: &DatasetArgs) -> CliResult<()> {
    let dataset = load(container, data)?;
    let gains = container
        .classifier
        .gains(&dataset, Some(data.features.as_slice()))?;
    let width = gains.iter().map(|g| g.feature.len()).max().unwrap_or(0);
    for g in gains {
        output::info(&format!("{:<width$}  {:.4}", g.feature, g.gain, width = width));
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_rules(container: &ServiceContainer, data: &DatasetArgs) -> CliResult<()> {
    let (_, model) = train(container, data)?;
    for rule in container.classifier.rules(&model) {
        output::info(&rule);
    }
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(container.settings.to_toml()?.trim_end()),
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => return Err(CliError::Usage("no config directory on this platform".into())),
        },
        ConfigCommands::Init => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("no config directory on this platform".into()))?;
            container.init_config(&path)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
