use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KgvizError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source error in {file}: {source}")]
    Source {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Graph config error in {}: {source}", path.display())]
    VisualConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
