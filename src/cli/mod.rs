//! CLI module for vaultmap

mod args;

pub use args::{Args, Command};

use crate::analysis::Analyzer;
use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::logging;
use crate::output::{write_json, NoteConfig, NoteWriter, TemplateEngine};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    let verbose = matches!(args.command, Command::Generate { verbose: true, .. });
    logging::init(verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the config file given on the command line, or the default one if present
fn load_config(config: Option<&Path>) -> Result<Config> {
    match config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn require_dir(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::PathNotFound(path));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path));
    }
    Ok(path)
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            project_root,
            vault_path,
            config,
            exclude_dirs,
            exclude,
            include_package_init,
            format,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            let format = format.as_deref().map(OutputFormat::parse).transpose()?;
            cfg.merge_cli(exclude_dirs, exclude, include_package_init, format);
            cfg.validate()?;

            let project_root = require_dir(project_root)?;
            let vault_root = require_dir(vault_path)?.canonicalize()?;

            debug!(
                project = %project_root.display(),
                vault = %vault_root.display(),
                format = ?cfg.output.format,
                exclude_dirs = ?cfg.analysis.exclude_dirs,
                exclude = ?cfg.analysis.exclude,
                "starting generation"
            );

            let mut analyzer = Analyzer::new(&cfg.analysis)?.with_verbose(verbose);
            let analysis = analyzer.analyze(&project_root)?;

            if analysis.files.is_empty() {
                warn!(project = %analysis.root.display(), "no Python files found");
            }
            if !analysis.diagnostics.is_empty() {
                warn!(count = analysis.diagnostics.len(), "some files were skipped");
            }

            match cfg.output.format {
                OutputFormat::Markdown => {
                    let mut writer = NoteWriter::new(NoteConfig {
                        vault_root,
                        extension: cfg.output.extension.clone(),
                        colors: cfg.colors.clone(),
                    })?;
                    if let Some(template) = &cfg.output.template {
                        writer = writer.with_engine(TemplateEngine::from_file(template)?);
                    }

                    let report = writer.write_all(&analysis)?;
                    info!("{}", report.summary());
                }
                OutputFormat::Json => {
                    let path = write_json(&analysis, &vault_root)?;
                    info!("JSON written to: {}", path.display());
                }
            }

            Ok(())
        }

        Command::Inspect {
            project_root,
            file,
            config,
            include_package_init,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(Vec::new(), Vec::new(), include_package_init, None);
            cfg.validate()?;

            let project_root = require_dir(project_root)?;
            let mut analyzer = Analyzer::new(&cfg.analysis)?;
            let analysis = analyzer.analyze(&project_root)?;

            let json = match file {
                Some(relative) => {
                    let entry = analysis.file(&relative).ok_or_else(|| Error::UnknownFile {
                        file: relative.clone(),
                        root: analysis.root.clone(),
                    })?;
                    serde_json::to_string_pretty(entry)?
                }
                None => serde_json::to_string_pretty(&analysis)?,
            };
            println!("{}", json);

            Ok(())
        }

        Command::Version => {
            println!("vaultmap {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
