//! Command dispatch: one handler per subcommand

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{render_exports, Selection, Validation};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Check { file }) => cmd_check(container, file),
        Some(Commands::Fmt { file, write }) => cmd_fmt(container, file, *write),
        Some(Commands::Resolve { file, form, .. }) if !form.is_empty() => {
            cmd_resolve_form(container, file, form)
        }
        Some(Commands::Resolve {
            file, selections, ..
        }) => cmd_resolve(container, file, selections),
        Some(Commands::Options { file, coordinates }) => cmd_options(container, file, coordinates),
        Some(Commands::Tree { file }) => cmd_tree(container, file),
        Some(Commands::Config { command }) => cmd_config(container, command),
        None => Ok(()),
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    match container.configuration_service.check(file)? {
        Validation::Ok => {
            output::success(&file.display());
            Ok(())
        }
        Validation::Warning(msg) => {
            output::warning(&format!("{}: {}", file.display(), msg));
            Ok(())
        }
        Validation::Error(msg) => Err(CliError::InvalidData(format!("{}: {}", file.display(), msg))),
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_fmt(container: &ServiceContainer, file: &Path, write: bool) -> CliResult<()> {
    let canonical = container.configuration_service.format(file, write)?;
    if write {
        output::action("Formatted", &file.display());
    } else {
        print!("{}", canonical);
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_resolve(
    container: &ServiceContainer,
    file: &Path,
    selections: &[(String, usize)],
) -> CliResult<()> {
    let selection: Selection = selections.iter().cloned().collect();
    if selection.len() != selections.len() {
        return Err(CliError::InvalidArgs(
            "variable selected more than once".to_string(),
        ));
    }
    let values = container.configuration_service.resolve(file, &selection)?;
    debug!("resolved {} of {} selections", values.len(), selection.len());
    print!("{}", render_exports(&values, &container.settings.export_prefix));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_resolve_form(
    container: &ServiceContainer,
    file: &Path,
    fields: &[(String, String)],
) -> CliResult<()> {
    let form: BTreeMap<String, String> = fields.iter().cloned().collect();
    if form.len() != fields.len() {
        return Err(CliError::InvalidArgs(
            "form field given more than once".to_string(),
        ));
    }
    let values = container.configuration_service.resolve_form(
        file,
        &form,
        &container.settings.parameter_name,
    )?;
    debug!("resolved {} variables from {} form fields", values.len(), form.len());
    print!("{}", render_exports(&values, &container.settings.export_prefix));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_options(container: &ServiceContainer, file: &Path, coordinates: &[usize]) -> CliResult<()> {
    for option in container.configuration_service.options(file, coordinates)? {
        output::info(&option);
    }
    Ok(())
}

fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    print!("{}", container.configuration_service.tree(file)?);
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Settings files (lowest to highest precedence)");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", existence(&path))),
                None => output::detail("global: (no config directory)"),
            }
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("determine current directory", e))?;
            output::detail(&format!("local:  {}", existence(&local_config_path(&cwd))));
            output::detail("env:    CHOICETREE_*");
        }
    }
    Ok(())
}

fn existence(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found)", path.display())
    }
}
