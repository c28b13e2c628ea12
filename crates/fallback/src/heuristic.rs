//! Closed-Form Risk Scoring

use cascade_engine::{CascadeResult, RiskCategory, RiskLabel};
use patient_data::{fields, normalize_apoe4, AttrValue, CoercionError, PatientRecord};
use tracing::debug;

/// Additive point-based risk scorer with no learned parameters
///
/// The scoring table and the derived sub-score formulas are kept exactly as
/// the production service shipped them; downstream consumers rely on the
/// exact values when no trained model is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPredictor;

impl HeuristicPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Score one patient record
    pub fn predict(&self, record: &PatientRecord) -> Result<CascadeResult, CoercionError> {
        let age = record.numeric_or(fields::AGE, 65.0)?;
        let faq = record.numeric_or(fields::FAQ, 0.0)?;
        let ecog_mem = record.numeric_or(fields::ECOG_PT_MEM, 1.0)?;
        let ptau = record.numeric_or(fields::PTAU, 0.0)?;
        let apoe4 = match normalize_apoe4(
            record.get(fields::APOE4).cloned().unwrap_or(AttrValue::Null),
        ) {
            AttrValue::Number(n) => n,
            _ => 0.0,
        };

        let mut score = 15.0;
        if age > 75.0 {
            score += 20.0;
        } else if age > 65.0 {
            score += 10.0;
        }
        score += faq * 1.5;
        score += (ecog_mem - 1.0) * 10.0;
        score += apoe4 * 12.0;
        if ptau > 0.6 {
            score += 20.0;
        } else if ptau > 0.3 {
            score += 10.0;
        }
        let score = score.round().min(100.0);
        debug!(score, "heuristic risk score computed");

        let stage3_prob = score / 100.0;
        let final_risk_category = RiskCategory::from_probability(stage3_prob);

        let stage1_risk = if score < 30.0 {
            RiskLabel::Low
        } else if score < 60.0 {
            RiskLabel::Elevated
        } else {
            RiskLabel::High
        };
        let stage2_risk = if apoe4 > 0.0 {
            RiskLabel::Elevated
        } else {
            RiskLabel::Low
        };
        let stage3_risk = if ptau > 0.5 {
            RiskLabel::Elevated
        } else if ptau > 0.0 {
            RiskLabel::Normal
        } else {
            RiskLabel::NotTested
        };

        let ptau_factor = if ptau > 0.0 {
            ptau.to_string()
        } else {
            "Not provided".to_string()
        };

        Ok(CascadeResult {
            final_risk_score: stage3_prob,
            final_risk_category,
            stage1_prob: (score * 0.8).min(95.0) / 100.0,
            stage2_prob: (score * 0.9).min(98.0) / 100.0,
            stage3_prob,
            stage1_risk,
            stage2_risk,
            stage3_risk,
            top_factors: [
                format!("FAQ Score: {faq}"),
                format!("APOE4 Count: {apoe4}"),
                format!("pTau-217: {ptau_factor}"),
            ],
        })
    }
}
