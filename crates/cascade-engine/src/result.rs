//! Cascade Output Records

use serde::{Deserialize, Serialize};

/// Final risk category from the fixed cut-points on the stage 3 probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Elevated,
    High,
}

impl RiskCategory {
    /// Categorize a stage 3 probability
    ///
    /// Cut-points are inclusive on the lower end: 0.4 is Elevated and 0.7
    /// is High.
    pub fn from_probability(prob: f64) -> Self {
        if prob >= 0.7 {
            RiskCategory::High
        } else if prob >= 0.4 {
            RiskCategory::Elevated
        } else {
            RiskCategory::Low
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Elevated => "Elevated",
            RiskCategory::High => "High",
        }
    }
}

/// Per-stage risk label
///
/// `Normal` and `Not Tested` only appear on the heuristic fallback path,
/// which grades the biomarker stage by pTau availability rather than by a
/// model probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Elevated,
    High,
    Normal,
    #[serde(rename = "Not Tested")]
    NotTested,
}

impl RiskLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Elevated => "Elevated",
            RiskLabel::High => "High",
            RiskLabel::Normal => "Normal",
            RiskLabel::NotTested => "Not Tested",
        }
    }
}

impl From<RiskCategory> for RiskLabel {
    fn from(category: RiskCategory) -> Self {
        match category {
            RiskCategory::Low => RiskLabel::Low,
            RiskCategory::Elevated => RiskLabel::Elevated,
            RiskCategory::High => RiskLabel::High,
        }
    }
}

/// Complete output of one prediction, created fresh per call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeResult {
    pub final_risk_score: f64,
    pub final_risk_category: RiskCategory,
    pub stage1_prob: f64,
    pub stage2_prob: f64,
    pub stage3_prob: f64,
    pub stage1_risk: RiskLabel,
    pub stage2_risk: RiskLabel,
    pub stage3_risk: RiskLabel,
    /// Human-readable drivers, always exactly FAQ, APOE4, pTau in order
    pub top_factors: [String; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_points_inclusive_lower_bounds() {
        assert_eq!(RiskCategory::from_probability(0.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_probability(0.39999), RiskCategory::Low);
        assert_eq!(RiskCategory::from_probability(0.4), RiskCategory::Elevated);
        assert_eq!(RiskCategory::from_probability(0.69999), RiskCategory::Elevated);
        assert_eq!(RiskCategory::from_probability(0.7), RiskCategory::High);
        assert_eq!(RiskCategory::from_probability(1.0), RiskCategory::High);
    }

    #[test]
    fn test_not_tested_serializes_with_space() {
        let json = serde_json::to_string(&RiskLabel::NotTested).unwrap();
        assert_eq!(json, r#""Not Tested""#);
    }

    #[test]
    fn test_result_serializes_expected_fields() {
        let result = CascadeResult {
            final_risk_score: 0.42,
            final_risk_category: RiskCategory::Elevated,
            stage1_prob: 0.3,
            stage2_prob: 0.5,
            stage3_prob: 0.42,
            stage1_risk: RiskLabel::Low,
            stage2_risk: RiskLabel::Elevated,
            stage3_risk: RiskLabel::Elevated,
            top_factors: [
                "FAQ Score: 8".to_string(),
                "APOE4 Count: 1".to_string(),
                "pTau-217: 0.45".to_string(),
            ],
        };

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["final_risk_category"], "Elevated");
        assert_eq!(json["top_factors"].as_array().unwrap().len(), 3);
        assert_eq!(json["stage1_risk"], "Low");
    }
}
