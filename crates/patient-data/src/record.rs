//! Patient Attribute Records

use crate::CoercionError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical attribute names used by the screening cascade
pub mod fields {
    pub const AGE: &str = "AGE";
    pub const PTGENDER: &str = "PTGENDER";
    pub const PTEDUCAT: &str = "PTEDUCAT";
    pub const FAQ: &str = "FAQ";
    pub const ECOG_PT_MEM: &str = "EcogPtMem";
    pub const ECOG_PT_TOTAL: &str = "EcogPtTotal";
    pub const APOE4: &str = "APOE4";
    pub const PTAU: &str = "PTAU";
    pub const ABETA42: &str = "ABETA42";
    pub const ABETA40: &str = "ABETA40";
    pub const NFL: &str = "NFL";

    /// Cascade-internal feature carrying the stage 1 probability into stage 2
    pub const STAGE1_PROB: &str = "Stage1_Prob";
    /// Cascade-internal feature carrying the stage 2 probability into stage 3
    pub const STAGE2_PROB: &str = "Stage2_Prob";
}

/// A single raw attribute value as it arrives from the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Explicit null in the payload
    Null,
    /// Numeric value (integers widen to f64)
    Number(f64),
    /// Free-form string, e.g. a gender label or APOE genotype
    Text(String),
}

impl AttrValue {
    /// Whether this value carries actual content
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Mapping from attribute name to raw value
///
/// Absent and null attributes are interchangeable for feature building:
/// both degrade to the caller-supplied default instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord(HashMap<String, AttrValue>);

impl PatientRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Get the raw value for an attribute
    pub fn get(&self, field: &str) -> Option<&AttrValue> {
        self.0.get(field)
    }

    /// Whether the attribute was supplied with a non-null value
    pub fn is_provided(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| !v.is_null())
    }

    /// Read an attribute as a number
    ///
    /// Absent and null values yield `None`. Numeric strings coerce; any
    /// other string is a [`CoercionError`].
    pub fn numeric(&self, field: &str) -> Result<Option<f64>, CoercionError> {
        match self.0.get(field) {
            None | Some(AttrValue::Null) => Ok(None),
            Some(AttrValue::Number(n)) => Ok(Some(*n)),
            Some(AttrValue::Text(s)) => {
                s.trim()
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| CoercionError::NonNumeric {
                        field: field.to_string(),
                        value: s.clone(),
                    })
            }
        }
    }

    /// Read an attribute as a number, defaulting when absent or null
    pub fn numeric_or(&self, field: &str, default: f64) -> Result<f64, CoercionError> {
        Ok(self.numeric(field)?.unwrap_or(default))
    }
}

impl FromIterator<(String, AttrValue)> for PatientRecord {
    fn from_iter<I: IntoIterator<Item = (String, AttrValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_defaults_when_absent() {
        let record = PatientRecord::new();
        assert_eq!(record.numeric(fields::PTAU).unwrap(), None);
        assert_eq!(record.numeric_or(fields::PTAU, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_numeric_defaults_when_null() {
        let mut record = PatientRecord::new();
        record.set(fields::NFL, AttrValue::Null);
        assert_eq!(record.numeric_or(fields::NFL, 0.0).unwrap(), 0.0);
        assert!(!record.is_provided(fields::NFL));
    }

    #[test]
    fn test_numeric_string_coerces() {
        let mut record = PatientRecord::new();
        record.set(fields::AGE, "72.5");
        assert_eq!(record.numeric_or(fields::AGE, 0.0).unwrap(), 72.5);
    }

    #[test]
    fn test_non_numeric_string_is_error() {
        let mut record = PatientRecord::new();
        record.set(fields::AGE, "seventy-two");
        let err = record.numeric(fields::AGE).unwrap_err();
        assert!(err.to_string().contains("AGE"));
    }

    #[test]
    fn test_attr_value_deserializes_mixed_types() {
        let record: PatientRecord =
            serde_json::from_str(r#"{"AGE": 72, "PTGENDER": "Female", "PTAU": null}"#).unwrap();
        assert_eq!(record.get(fields::AGE), Some(&AttrValue::Number(72.0)));
        assert_eq!(
            record.get(fields::PTGENDER),
            Some(&AttrValue::Text("Female".to_string()))
        );
        assert_eq!(record.get(fields::PTAU), Some(&AttrValue::Null));
    }

    #[test]
    fn test_number_displays_without_trailing_zero() {
        assert_eq!(AttrValue::Number(8.0).to_string(), "8");
        assert_eq!(AttrValue::Number(2.5).to_string(), "2.5");
    }
}
