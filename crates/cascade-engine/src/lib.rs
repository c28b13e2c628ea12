//! Cascade Inference Engine
//!
//! Runs the fixed three-stage screening cascade: clinical features feed
//! genetic stratification, which feeds biomarker confirmation. Each stage's
//! output probability becomes an input feature of the next stage.

mod engine;
mod result;

pub use engine::CascadeEngine;
pub use result::{CascadeResult, RiskCategory, RiskLabel};

use thiserror::Error;

/// Errors during cascade prediction
#[derive(Debug, Clone, Error)]
pub enum CascadeError {
    /// The stage's predictor artifact was never loaded
    #[error("stage {stage} predictor artifact is not loaded")]
    MissingPredictor { stage: usize },

    /// The stage's predictor invocation or feature assembly failed
    #[error("stage {stage} prediction failed: {reason}")]
    Prediction { stage: usize, reason: String },
}

impl CascadeError {
    /// The 1-based index of the stage that failed
    pub fn stage(&self) -> usize {
        match self {
            CascadeError::MissingPredictor { stage } => *stage,
            CascadeError::Prediction { stage, .. } => *stage,
        }
    }
}
