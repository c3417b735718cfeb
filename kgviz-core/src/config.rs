use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::KgvizError;

/// Highlight color for nodes with no incident edges.
pub const DEFAULT_UNCONNECTED_COLOR: &str = "#ff6666";

/// Color applied to elements outside a node's neighborhood.
pub const DEFAULT_DIM_COLOR: &str = "#eee";

/// Where a batch run reads from and writes to.
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    pub sources_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub processed_log: PathBuf,
    pub graph_config: PathBuf,
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sources_dir: PathBuf::from("sources"),
            graphs_dir: PathBuf::from("graphs"),
            processed_log: PathBuf::from("processed_files.txt"),
            graph_config: PathBuf::from("graph-config.json"),
            log_level: "info".to_string(),
        }
    }
}

impl RunConfig {
    /// Layer defaults, an optional TOML file and `KGVIZ_*` env vars.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let s = Config::builder()
            .set_default("sources_dir", defaults.sources_dir.to_string_lossy().into_owned())?
            .set_default("graphs_dir", defaults.graphs_dir.to_string_lossy().into_owned())?
            .set_default("processed_log", defaults.processed_log.to_string_lossy().into_owned())?
            .set_default("graph_config", defaults.graph_config.to_string_lossy().into_owned())?
            .set_default("log_level", defaults.log_level.as_str())?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("KGVIZ"))
            .build()?;
        s.try_deserialize()
    }
}

/// Visual settings shared by every generated page.
///
/// Read from the graph config JSON file. Keys keep their camelCase
/// spelling, so this goes through `serde_json` rather than `config`
/// (which folds keys to lowercase).
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualConfig {
    pub background_color: String,
    pub node: NodeStyle,
    pub edge: EdgeStyle,
    #[serde(default = "default_unconnected_color")]
    pub unconnected_color: String,
    #[serde(default = "default_dim_color")]
    pub dim_color: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub default_size: f64,
    pub default_color: String,
    pub label_color: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    pub default_size: f64,
    pub default_color: String,
}

fn default_unconnected_color() -> String {
    DEFAULT_UNCONNECTED_COLOR.to_string()
}

fn default_dim_color() -> String {
    DEFAULT_DIM_COLOR.to_string()
}

impl VisualConfig {
    pub fn from_json(path: &Path, raw: &[u8]) -> Result<Self, KgvizError> {
        serde_json::from_slice(raw).map_err(|source| KgvizError::VisualConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the graph config. A missing file is an error.
    pub async fn load(path: &Path) -> Result<Self, KgvizError> {
        let raw = tokio::fs::read(path).await?;
        Self::from_json(path, &raw)
    }
}
