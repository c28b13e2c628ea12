//! Risk Model Selection
//!
//! The serving layer picks exactly one prediction path at startup and
//! injects it into the router state. There is no runtime flag: the two
//! variants share a single `predict` surface.

use artifact_store::ArtifactSet;
use cascade_engine::{CascadeEngine, CascadeError, CascadeResult};
use fallback::HeuristicPredictor;
use patient_data::{CoercionError, PatientRecord};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced by either prediction path
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Cascade(#[from] CascadeError),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

/// The prediction path serving requests
pub enum RiskModel {
    /// Trained three-stage cascade
    Cascade(CascadeEngine),
    /// Deterministic heuristic scoring
    Heuristic(HeuristicPredictor),
}

impl RiskModel {
    /// Select the model for this process
    ///
    /// Tries to load trained artifacts; any load failure downgrades to the
    /// heuristic predictor rather than refusing to start.
    pub fn select(artifacts_dir: &Path) -> Self {
        match ArtifactSet::load(artifacts_dir) {
            Ok(set) => {
                info!("trained cascade artifacts loaded, serving real predictions");
                RiskModel::Cascade(CascadeEngine::new(set))
            }
            Err(e) => {
                warn!("could not load model artifacts: {e}; serving heuristic predictions");
                RiskModel::Heuristic(HeuristicPredictor::new())
            }
        }
    }

    /// Score one patient record
    pub fn predict(&self, record: &PatientRecord) -> Result<CascadeResult, ModelError> {
        match self {
            RiskModel::Cascade(engine) => Ok(engine.predict(record)?),
            RiskModel::Heuristic(heuristic) => Ok(heuristic.predict(record)?),
        }
    }

    /// Tag reported to clients alongside each prediction
    pub fn model_type(&self) -> &'static str {
        match self {
            RiskModel::Cascade(_) => "real",
            RiskModel::Heuristic(_) => "mock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_type_tags() {
        let heuristic = RiskModel::Heuristic(HeuristicPredictor::new());
        assert_eq!(heuristic.model_type(), "mock");
    }

    #[test]
    fn test_select_falls_back_without_artifacts() {
        let model = RiskModel::select(Path::new("/nonexistent/models"));
        assert!(matches!(model, RiskModel::Heuristic(_)));
        assert_eq!(model.model_type(), "mock");
    }

    #[test]
    fn test_heuristic_path_predicts() {
        let model = RiskModel::Heuristic(HeuristicPredictor::new());
        let result = model.predict(&PatientRecord::new()).unwrap();
        assert_eq!(result.top_factors.len(), 3);
    }
}
