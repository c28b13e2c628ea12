//! Cascade Engine Implementation

use crate::result::{CascadeResult, RiskCategory, RiskLabel};
use crate::CascadeError;
use artifact_store::{ArtifactSet, LogisticPipeline};
use patient_data::{fields, normalize_apoe4, normalize_gender, AttrValue, PatientRecord};
use tracing::debug;

/// Runs the three screening stages in fixed order over a loaded artifact set
///
/// The engine holds no mutable state: artifacts are read-only after load,
/// so one engine may serve concurrent predictions without synchronization.
pub struct CascadeEngine {
    artifacts: ArtifactSet,
}

impl CascadeEngine {
    /// Create an engine over a loaded artifact set
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    /// Run the full cascade for one patient record
    ///
    /// A failure at any stage aborts the whole cascade; no partial result
    /// is returned.
    pub fn predict(&self, record: &PatientRecord) -> Result<CascadeResult, CascadeError> {
        let mut patient = record.clone();

        // Normalize the two mixed-type attributes up front. Gender defaults
        // to "Male" and APOE4 to 0 when absent, matching the training data
        // conventions.
        let gender = patient
            .get(fields::PTGENDER)
            .cloned()
            .unwrap_or_else(|| AttrValue::from("Male"));
        patient.set(fields::PTGENDER, normalize_gender(gender));

        let apoe4 = patient
            .get(fields::APOE4)
            .cloned()
            .unwrap_or(AttrValue::Null);
        patient.set(fields::APOE4, normalize_apoe4(apoe4));

        // Stage 1: clinical screening
        let stage1 = &self.artifacts.stage1;
        let x1 = build_vector(&patient, &stage1.features, 1)?;
        let stage1_prob = run_stage(1, stage1.pipeline.as_ref(), &x1)?;
        let stage1_risk = threshold_label(stage1_prob, stage1.threshold);
        debug!(stage1_prob, threshold = stage1.threshold, "stage 1 complete");

        // Stage 2: genetic stratification, fed by the stage 1 probability
        let stage2 = &self.artifacts.stage2;
        let mut genetic_input = PatientRecord::new();
        genetic_input.set(fields::STAGE1_PROB, stage1_prob);
        if let Some(value) = patient.get(fields::APOE4).cloned() {
            genetic_input.set(fields::APOE4, value);
        }
        let x2 = build_vector(&genetic_input, &stage2.features, 2)?;
        let stage2_prob = run_stage(2, stage2.pipeline.as_ref(), &x2)?;
        let stage2_risk = threshold_label(stage2_prob, stage2.threshold);
        debug!(stage2_prob, threshold = stage2.threshold, "stage 2 complete");

        // Stage 3: biomarker confirmation, fed by the stage 2 probability
        let stage3 = &self.artifacts.stage3;
        let mut biomarker_input = PatientRecord::new();
        biomarker_input.set(fields::STAGE2_PROB, stage2_prob);
        for field in [fields::PTAU, fields::ABETA42, fields::ABETA40, fields::NFL] {
            if let Some(value) = patient.get(field).cloned() {
                biomarker_input.set(field, value);
            }
        }
        let x3 = build_vector(&biomarker_input, &stage3.features, 3)?;
        let stage3_prob = run_stage(3, stage3.pipeline.as_ref(), &x3)?;
        debug!(stage3_prob, "stage 3 complete");

        // The final label comes from fixed cut-points on the stage 3
        // probability, never from a loaded threshold. Stage 3 has no label
        // of its own: it reports the final category.
        let final_risk_category = RiskCategory::from_probability(stage3_prob);

        Ok(CascadeResult {
            final_risk_score: stage3_prob,
            final_risk_category,
            stage1_prob,
            stage2_prob,
            stage3_prob,
            stage1_risk,
            stage2_risk,
            stage3_risk: final_risk_category.into(),
            top_factors: top_factors(&patient),
        })
    }
}

/// Assemble a stage's feature vector in artifact order, defaulting missing
/// attributes to 0
fn build_vector(
    record: &PatientRecord,
    features: &[String],
    stage: usize,
) -> Result<Vec<f64>, CascadeError> {
    features
        .iter()
        .map(|name| {
            record
                .numeric_or(name, 0.0)
                .map_err(|e| CascadeError::Prediction {
                    stage,
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn run_stage(
    stage: usize,
    pipeline: Option<&LogisticPipeline>,
    features: &[f64],
) -> Result<f64, CascadeError> {
    let pipeline = pipeline.ok_or(CascadeError::MissingPredictor { stage })?;
    pipeline
        .predict_probability(features)
        .map_err(|e| CascadeError::Prediction {
            stage,
            reason: e.to_string(),
        })
}

fn threshold_label(prob: f64, threshold: f64) -> RiskLabel {
    if prob >= threshold {
        RiskLabel::Elevated
    } else {
        RiskLabel::Low
    }
}

/// Fixed-composition risk drivers: FAQ, APOE4 count, pTau-217
///
/// Sentinels distinguish "not supplied" from an explicit zero, so they key
/// off attribute presence in the (normalized) record rather than the
/// defaulted feature vector.
fn top_factors(patient: &PatientRecord) -> [String; 3] {
    let display = |field: &str, sentinel: &str| {
        patient
            .get(field)
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
            .unwrap_or_else(|| sentinel.to_string())
    };

    [
        format!("FAQ Score: {}", display(fields::FAQ, "N/A")),
        format!("APOE4 Count: {}", display(fields::APOE4, "0")),
        format!("pTau-217: {}", display(fields::PTAU, "Not provided")),
    ]
}
