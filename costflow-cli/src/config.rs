//! Configuration file loading for costflow.
//!
//! Discovers and loads `costflow.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use costflow_domain::DEFAULT_TOP_CATEGORIES;
use costflow_render::TEMPLATE_FILE_NAME;
use fs_err as fs;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "costflow.toml";

/// Top-level configuration from costflow.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostflowConfig {
    /// Diagram shape.
    pub diagram: DiagramConfig,

    /// Extra raw name → label entries, layered over the built-in labels.
    pub labels: BTreeMap<String, String>,

    /// Formatted file settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    /// Middle-column node count, `Others` included.
    pub top_categories: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Template spliced by `--formatted`.
    pub template: Option<Utf8PathBuf>,

    /// Directory receiving the formatted file.
    pub out_dir: Option<Utf8PathBuf>,
}

/// Discover the costflow.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a costflow.toml config file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<CostflowConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<CostflowConfig> {
    let config: CostflowConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<CostflowConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(CostflowConfig::default()),
    }
}

/// Settings for one run after CLI arguments were laid over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub top_categories: usize,
    pub labels: BTreeMap<String, String>,
    pub template: Utf8PathBuf,
    pub out_dir: Utf8PathBuf,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: CostflowConfig,
}

impl ConfigMerger {
    pub fn new(config: CostflowConfig) -> Self {
        Self { config }
    }

    /// CLI values win; unset values fall back to the file, then to built-in defaults.
    pub fn merge_args(
        self,
        cli_top_categories: Option<usize>,
        cli_template: Option<&Utf8Path>,
        cli_out_dir: Option<&Utf8Path>,
    ) -> MergedConfig {
        MergedConfig {
            top_categories: cli_top_categories
                .or(self.config.diagram.top_categories)
                .unwrap_or(DEFAULT_TOP_CATEGORIES),
            labels: self.config.labels,
            template: cli_template
                .map(Utf8Path::to_path_buf)
                .or(self.config.output.template)
                .unwrap_or_else(|| Utf8PathBuf::from(TEMPLATE_FILE_NAME)),
            out_dir: cli_out_dir
                .map(Utf8Path::to_path_buf)
                .or(self.config.output.out_dir)
                .unwrap_or_else(|| Utf8PathBuf::from(".")),
        }
    }
}
