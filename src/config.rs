use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "vaultmap.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub colors: ColorConfig,
}

/// Analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names skipped wherever they appear in a path
    pub exclude_dirs: Vec<String>,
    /// Glob patterns matched against paths relative to the project root
    pub exclude: Vec<String>,
    /// Treat `__init__.py` as a package module instead of skipping it
    pub include_package_init: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Extension of generated note files, without the dot
    pub extension: String,
    /// Custom Tera template for notes; the built-in one is used when unset
    pub template: Option<PathBuf>,
}

/// Node colors keyed by top-level folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Color used when a folder has no entry
    pub default: String,
    pub folders: BTreeMap<String, String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// Parse a format name as given on the command line
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::config_validation(format!("unknown output format: {}", other))),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![".venv".to_string()],
            exclude: Vec::new(),
            include_package_init: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            extension: "md".to_string(),
            template: None,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        let folders = [
            ("base", "#f8b195"),
            ("bots", "#f67280"),
            ("utils", "#c06c84"),
            ("root", "#355c7d"),
        ]
        .into_iter()
        .map(|(folder, color)| (folder.to_string(), color.to_string()))
        .collect();

        Self {
            default: "#355c7d".to_string(),
            folders,
        }
    }
}

impl ColorConfig {
    /// Look up the color for a top-level folder
    pub fn color_for(&self, folder: &str) -> &str {
        self.folders
            .get(folder)
            .map(String::as_str)
            .unwrap_or(self.default.as_str())
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file if it exists, otherwise use defaults.
    ///
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        exclude_dirs: Vec<String>,
        exclude: Vec<String>,
        include_package_init: bool,
        format: Option<OutputFormat>,
    ) {
        for dir in exclude_dirs {
            if !self.analysis.exclude_dirs.contains(&dir) {
                self.analysis.exclude_dirs.push(dir);
            }
        }

        if !exclude.is_empty() {
            self.analysis.exclude.extend(exclude);
        }

        if include_package_init {
            self.analysis.include_package_init = true;
        }

        if let Some(fmt) = format {
            self.output.format = fmt;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.extension.is_empty() {
            return Err(Error::config_validation("output extension must not be empty"));
        }

        if self.output.extension.contains('.') {
            return Err(Error::config_validation(
                "output extension must not contain a dot",
            ));
        }

        if let Some(template) = &self.output.template {
            if !template.is_file() {
                return Err(Error::PathNotFound(template.clone()));
            }
        }

        if self.colors.default.trim().is_empty() {
            return Err(Error::config_validation("default color must not be empty"));
        }

        if let Some((folder, _)) = self
            .colors
            .folders
            .iter()
            .find(|(_, color)| color.trim().is_empty())
        {
            return Err(Error::config_validation(format!(
                "color for folder '{}' must not be empty",
                folder
            )));
        }

        for pattern in &self.analysis.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
