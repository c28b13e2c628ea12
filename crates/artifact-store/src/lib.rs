//! Artifact Store
//!
//! Loads the trained stage predictors, feature lists, and decision
//! thresholds from a local directory. Everything is resolved once at load
//! time into a read-only [`ArtifactSet`]; missing optional artifacts fall
//! back to hardcoded defaults.

mod pipeline;
mod store;

pub use pipeline::{DimensionMismatch, LogisticPipeline};
pub use store::{
    ArtifactSet, Stage1Artifact, Stage2Artifact, Stage3Artifact, DEFAULT_THRESHOLD,
    STAGE1_DEFAULT_FEATURES, STAGE2_DEFAULT_FEATURES, STAGE3_DEFAULT_FEATURES,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// None of the expected artifact files were present
    #[error("no artifacts found in {}", dir.display())]
    NoArtifacts { dir: PathBuf },

    /// An artifact file exists but could not be read
    #[error("failed to read artifact {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// An artifact file exists but does not parse
    #[error("malformed artifact {file}: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}
