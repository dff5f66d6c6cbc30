//! Error types for fusion-core

use fusion_ast::NodeId;
use fusion_source_map::SourceMapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    /// The import lowering produced no replacement for an eligible import.
    #[error("Import lowering returned no replacement for module \"{module}\"")]
    LoweringContractViolation { module: String },

    #[error("Source map error: {0}")]
    SourceMap(#[from] SourceMapError),

    #[error("Node {0} is not part of the syntax tree")]
    UnknownNode(NodeId),

    #[error("Invalid plugin configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid file pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid plugin options: {0}")]
    Options(#[from] serde_json::Error),
}

impl FusionError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FusionError>;
