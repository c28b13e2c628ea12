//! Prediction Route

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cascade_engine::CascadeResult;
use patient_data::{fields, PatientRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::AppState;

/// Request body for the predict endpoint
///
/// Every field is optional. Demographic and assessment fields fall back to
/// the intake-form defaults; biomarkers and FAQ stay absent when omitted so
/// the engine can tell "not supplied" apart from an explicit zero.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub education: Option<f64>,
    pub faq: Option<f64>,
    pub ecog_mem: Option<f64>,
    pub ecog_total: Option<f64>,
    pub genotype: Option<String>,
    pub ptau217: Option<f64>,
    pub ab42: Option<f64>,
    pub ab40: Option<f64>,
    pub nfl: Option<f64>,
}

impl PredictRequest {
    /// Map the request body onto a patient attribute record
    pub fn into_record(self) -> PatientRecord {
        let mut record = PatientRecord::new();
        record.set(fields::AGE, self.age.unwrap_or(65.0));
        record.set(
            fields::PTGENDER,
            self.gender.unwrap_or_else(|| "Male".to_string()),
        );
        record.set(fields::PTEDUCAT, self.education.unwrap_or(16.0));
        record.set(fields::ECOG_PT_MEM, self.ecog_mem.unwrap_or(1.0));
        record.set(fields::ECOG_PT_TOTAL, self.ecog_total.unwrap_or(1.0));

        if let Some(faq) = self.faq {
            record.set(fields::FAQ, faq);
        }
        if let Some(genotype) = self.genotype {
            record.set(fields::APOE4, genotype);
        }
        let biomarkers = [
            (fields::PTAU, self.ptau217),
            (fields::ABETA42, self.ab42),
            (fields::ABETA40, self.ab40),
            (fields::NFL, self.nfl),
        ];
        for (field, value) in biomarkers {
            if let Some(value) = value {
                record.set(field, value);
            }
        }

        record
    }
}

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: CascadeResult,
    pub model_type: &'static str,
}

/// Failure response envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Score a patient
pub async fn post_predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let record = request.into_record();

    match state.model.predict(&record) {
        Ok(prediction) => Json(PredictResponse {
            success: true,
            prediction,
            model_type: state.model.model_type(),
        })
        .into_response(),
        Err(e) => {
            warn!("prediction failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patient_data::AttrValue;

    #[test]
    fn test_empty_request_applies_defaults() {
        let record = PredictRequest::default().into_record();
        assert_eq!(record.get(fields::AGE), Some(&AttrValue::Number(65.0)));
        assert_eq!(
            record.get(fields::PTGENDER),
            Some(&AttrValue::Text("Male".to_string()))
        );
        assert_eq!(record.get(fields::PTEDUCAT), Some(&AttrValue::Number(16.0)));
        assert_eq!(record.get(fields::ECOG_PT_MEM), Some(&AttrValue::Number(1.0)));
        // Optional markers stay absent rather than defaulting to zero
        assert!(record.get(fields::FAQ).is_none());
        assert!(record.get(fields::PTAU).is_none());
        assert!(record.get(fields::APOE4).is_none());
    }

    #[test]
    fn test_genotype_maps_to_apoe4_attribute() {
        let request = PredictRequest {
            genotype: Some("3/4".to_string()),
            ..Default::default()
        };
        let record = request.into_record();
        assert_eq!(
            record.get(fields::APOE4),
            Some(&AttrValue::Text("3/4".to_string()))
        );
    }

    #[test]
    fn test_biomarkers_map_to_canonical_names() {
        let request = PredictRequest {
            ptau217: Some(0.45),
            ab42: Some(15.2),
            ab40: Some(180.5),
            nfl: Some(22.0),
            ..Default::default()
        };
        let record = request.into_record();
        assert_eq!(record.get(fields::PTAU), Some(&AttrValue::Number(0.45)));
        assert_eq!(record.get(fields::ABETA42), Some(&AttrValue::Number(15.2)));
        assert_eq!(record.get(fields::ABETA40), Some(&AttrValue::Number(180.5)));
        assert_eq!(record.get(fields::NFL), Some(&AttrValue::Number(22.0)));
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: PredictRequest = serde_json::from_str(
            r#"{"age": 72, "gender": "Female", "ecogMem": 2.5, "ecogTotal": 2.0, "ptau217": 0.45}"#,
        )
        .unwrap();
        assert_eq!(request.age, Some(72.0));
        assert_eq!(request.ecog_mem, Some(2.5));
        assert_eq!(request.ptau217, Some(0.45));
    }
}
