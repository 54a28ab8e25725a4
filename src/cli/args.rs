//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate Obsidian dependency notes from Python codebases
#[derive(Parser, Debug)]
#[command(name = "vaultmap")]
#[command(about = "Generate Obsidian dependency notes from Python codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one dependency note per Python file into a vault
    Generate {
        /// Root of the Python project
        project_root: PathBuf,

        /// Vault directory the notes are written into
        vault_path: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory names to skip (can be repeated)
        #[arg(long = "exclude-dir")]
        exclude_dirs: Vec<String>,

        /// Glob patterns to exclude, relative to the project root (can be repeated)
        #[arg(long)]
        exclude: Vec<String>,

        /// Treat __init__.py files as package modules
        #[arg(long)]
        include_package_init: bool,

        /// Output format (markdown, json)
        #[arg(long)]
        format: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the module catalog and dependency records as JSON
    Inspect {
        /// Root of the Python project
        project_root: PathBuf,

        /// Only show the record for this file (relative to the project root)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat __init__.py files as package modules
        #[arg(long)]
        include_package_init: bool,
    },

    /// Show version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["vaultmap", "generate", "./proj", "./vault"]).unwrap();
        match args.command {
            Command::Generate {
                project_root,
                vault_path,
                config,
                exclude_dirs,
                format,
                include_package_init,
                verbose,
                ..
            } => {
                assert_eq!(project_root, PathBuf::from("./proj"));
                assert_eq!(vault_path, PathBuf::from("./vault"));
                assert!(config.is_none());
                assert!(exclude_dirs.is_empty());
                assert!(format.is_none());
                assert!(!include_package_init);
                assert!(!verbose);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_options() {
        let args = Args::try_parse_from([
            "vaultmap", "generate", "./proj", "./vault",
            "--config", "custom.toml",
            "--exclude-dir", "build",
            "--exclude-dir", "dist",
            "--exclude", "scripts/*",
            "--include-package-init",
            "--format", "json",
            "--verbose",
        ])
        .unwrap();

        match args.command {
            Command::Generate {
                config,
                exclude_dirs,
                exclude,
                include_package_init,
                format,
                verbose,
                ..
            } => {
                assert_eq!(config, Some(PathBuf::from("custom.toml")));
                assert_eq!(exclude_dirs, vec!["build".to_string(), "dist".to_string()]);
                assert_eq!(exclude, vec!["scripts/*".to_string()]);
                assert!(include_package_init);
                assert_eq!(format.as_deref(), Some("json"));
                assert!(verbose);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_vault() {
        assert!(Args::try_parse_from(["vaultmap", "generate", "./proj"]).is_err());
    }

    #[test]
    fn test_inspect_file() {
        let args = Args::try_parse_from(["vaultmap", "inspect", "./proj", "--file", "base/a.py"]).unwrap();
        match args.command {
            Command::Inspect { project_root, file, .. } => {
                assert_eq!(project_root, PathBuf::from("./proj"));
                assert_eq!(file, Some(PathBuf::from("base/a.py")));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = Args::try_parse_from(["vaultmap", "version"]).unwrap();
        assert!(matches!(args.command, Command::Version));
    }
}
