//! Artifact Loading and Resolution

use crate::pipeline::LogisticPipeline;
use crate::ArtifactError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Stage 1 feature names used when no feature-list artifact is present
pub const STAGE1_DEFAULT_FEATURES: [&str; 6] = [
    "AGE",
    "PTGENDER",
    "PTEDUCAT",
    "FAQ",
    "EcogPtMem",
    "EcogPtTotal",
];

/// Stage 2 feature names used when no feature-list artifact is present
pub const STAGE2_DEFAULT_FEATURES: [&str; 2] = ["Stage1_Prob", "APOE4"];

/// Stage 3 feature names used when no feature-list artifact is present
pub const STAGE3_DEFAULT_FEATURES: [&str; 5] =
    ["Stage2_Prob", "PTAU", "ABETA42", "ABETA40", "NFL"];

/// Decision threshold used when no threshold artifact is present
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Clinical screening stage artifact
#[derive(Debug, Clone)]
pub struct Stage1Artifact {
    pub pipeline: Option<LogisticPipeline>,
    pub features: Vec<String>,
    pub threshold: f64,
}

/// Genetic stratification stage artifact
#[derive(Debug, Clone)]
pub struct Stage2Artifact {
    pub pipeline: Option<LogisticPipeline>,
    pub features: Vec<String>,
    pub threshold: f64,
}

/// Biomarker confirmation stage artifact
///
/// The final stage carries no decision threshold: its label comes from the
/// fixed risk cut-points applied to its output probability.
#[derive(Debug, Clone)]
pub struct Stage3Artifact {
    pub pipeline: Option<LogisticPipeline>,
    pub features: Vec<String>,
}

/// The complete set of loaded artifacts, read-only after load
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub stage1: Stage1Artifact,
    pub stage2: Stage2Artifact,
    pub stage3: Stage3Artifact,
}

/// Threshold artifacts are JSON objects with a single `threshold` field
#[derive(Debug, Deserialize)]
struct ThresholdSpec {
    threshold: f64,
}

impl ArtifactSet {
    /// Load all artifacts from a directory
    ///
    /// Each of the 8 expected files is independently optional: missing
    /// feature lists and thresholds fall back to defaults, and a missing
    /// pipeline leaves the stage unloadable until prediction time. Only a
    /// directory with zero artifacts fails outright.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let mut found = 0usize;

        let stage1_pipeline: Option<LogisticPipeline> =
            load_optional(dir, "stage1_pipeline.json", &mut found)?;
        let stage2_pipeline: Option<LogisticPipeline> =
            load_optional(dir, "stage2_pipeline.json", &mut found)?;
        let stage3_pipeline: Option<LogisticPipeline> =
            load_optional(dir, "stage3_pipeline.json", &mut found)?;

        let stage1_features: Option<Vec<String>> =
            load_optional(dir, "stage1_features.json", &mut found)?;
        let stage2_features: Option<Vec<String>> =
            load_optional(dir, "stage2_features.json", &mut found)?;
        let stage3_features: Option<Vec<String>> =
            load_optional(dir, "stage3_features.json", &mut found)?;

        let stage1_threshold: Option<ThresholdSpec> =
            load_optional(dir, "stage1_threshold.json", &mut found)?;
        let stage2_threshold: Option<ThresholdSpec> =
            load_optional(dir, "stage2_threshold.json", &mut found)?;

        if found == 0 {
            return Err(ArtifactError::NoArtifacts {
                dir: dir.to_path_buf(),
            });
        }

        let set = Self {
            stage1: Stage1Artifact {
                pipeline: stage1_pipeline,
                features: stage1_features
                    .unwrap_or_else(|| default_features(&STAGE1_DEFAULT_FEATURES)),
                threshold: stage1_threshold
                    .map(|t| t.threshold)
                    .unwrap_or(DEFAULT_THRESHOLD),
            },
            stage2: Stage2Artifact {
                pipeline: stage2_pipeline,
                features: stage2_features
                    .unwrap_or_else(|| default_features(&STAGE2_DEFAULT_FEATURES)),
                threshold: stage2_threshold
                    .map(|t| t.threshold)
                    .unwrap_or(DEFAULT_THRESHOLD),
            },
            stage3: Stage3Artifact {
                pipeline: stage3_pipeline,
                features: stage3_features
                    .unwrap_or_else(|| default_features(&STAGE3_DEFAULT_FEATURES)),
            },
        };

        info!(
            found,
            stage1 = set.stage1.pipeline.is_some(),
            stage2 = set.stage2.pipeline.is_some(),
            stage3 = set.stage3.pipeline.is_some(),
            "loaded cascade artifacts from {}",
            dir.display()
        );

        Ok(set)
    }
}

fn default_features(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Read and parse one artifact file if it exists
fn load_optional<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    found: &mut usize,
) -> Result<Option<T>, ArtifactError> {
    let path = dir.join(file);
    if !path.exists() {
        debug!("artifact {file} not present, using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
        file: file.to_string(),
        source,
    })?;
    let value = serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed {
        file: file.to_string(),
        source,
    })?;

    *found += 1;
    Ok(Some(value))
}
