//! Serialized Scored Predictors
//!
//! Each stage predictor is a standard-scaler + logistic-regression pipeline
//! exported by the offline training step. The store treats it as an opaque
//! scorer: feature vector in, positive-class probability out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Feature vector does not match the pipeline's trained dimensionality
#[derive(Debug, Clone, Error)]
#[error("feature vector has {actual} features, pipeline expects {expected}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// A trained scaler + logistic regression pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticPipeline {
    /// Per-feature means subtracted before scoring
    pub scaler_mean: Vec<f64>,
    /// Per-feature standard deviations divided out before scoring
    pub scaler_scale: Vec<f64>,
    /// Logistic regression coefficients, one per feature
    pub coefficients: Vec<f64>,
    /// Logistic regression intercept
    pub intercept: f64,
}

impl LogisticPipeline {
    /// Score a feature vector, returning the positive-class probability
    pub fn predict_probability(&self, features: &[f64]) -> Result<f64, DimensionMismatch> {
        let expected = self.coefficients.len();
        if features.len() != expected
            || self.scaler_mean.len() != expected
            || self.scaler_scale.len() != expected
        {
            return Err(DimensionMismatch {
                expected,
                actual: features.len(),
            });
        }

        let mut z = self.intercept;
        for i in 0..expected {
            let scale = if self.scaler_scale[i].abs() < f64::EPSILON {
                1.0
            } else {
                self.scaler_scale[i]
            };
            z += self.coefficients[i] * (features[i] - self.scaler_mean[i]) / scale;
        }

        Ok(sigmoid(z))
    }

    /// Number of features this pipeline was trained on
    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
