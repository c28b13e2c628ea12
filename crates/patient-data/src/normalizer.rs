//! Feature Normalization
//!
//! Pure, total functions converting raw attribute values into the numeric
//! encodings the cascade stages expect. Both are idempotent: feeding a
//! previously normalized value back in returns it unchanged.

use crate::record::AttrValue;

/// Normalize a gender attribute to its binary encoding
///
/// String values map to 1 for "male" (case-insensitive) and 0 for anything
/// else. Numeric and null values pass through unchanged.
pub fn normalize_gender(value: AttrValue) -> AttrValue {
    match value {
        AttrValue::Text(s) => {
            let male = s.trim().eq_ignore_ascii_case("male");
            AttrValue::Number(if male { 1.0 } else { 0.0 })
        }
        other => other,
    }
}

/// Normalize an APOE genotype attribute to its ε4 allele count
///
/// A genotype string such as "3/4" maps to the number of '4' characters it
/// contains. Numeric values pass through unchanged; null maps to 0.
pub fn normalize_apoe4(value: AttrValue) -> AttrValue {
    match value {
        AttrValue::Text(s) => AttrValue::Number(s.matches('4').count() as f64),
        AttrValue::Null => AttrValue::Number(0.0),
        number => number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gender_strings() {
        assert_eq!(normalize_gender("Male".into()), AttrValue::Number(1.0));
        assert_eq!(normalize_gender("male".into()), AttrValue::Number(1.0));
        assert_eq!(normalize_gender("MALE".into()), AttrValue::Number(1.0));
        assert_eq!(normalize_gender("Female".into()), AttrValue::Number(0.0));
        assert_eq!(normalize_gender("other".into()), AttrValue::Number(0.0));
    }

    #[test]
    fn test_gender_numeric_passthrough() {
        assert_eq!(normalize_gender(AttrValue::Number(1.0)), AttrValue::Number(1.0));
        assert_eq!(normalize_gender(AttrValue::Number(0.0)), AttrValue::Number(0.0));
    }

    #[test]
    fn test_apoe4_genotype_strings() {
        assert_eq!(normalize_apoe4("3/3".into()), AttrValue::Number(0.0));
        assert_eq!(normalize_apoe4("3/4".into()), AttrValue::Number(1.0));
        assert_eq!(normalize_apoe4("4/4".into()), AttrValue::Number(2.0));
        assert_eq!(normalize_apoe4("".into()), AttrValue::Number(0.0));
    }

    #[test]
    fn test_apoe4_null_defaults_to_zero() {
        assert_eq!(normalize_apoe4(AttrValue::Null), AttrValue::Number(0.0));
    }

    #[test]
    fn test_apoe4_numeric_passthrough() {
        assert_eq!(normalize_apoe4(AttrValue::Number(2.0)), AttrValue::Number(2.0));
    }

    proptest! {
        #[test]
        fn prop_gender_idempotent(s in ".*") {
            let once = normalize_gender(AttrValue::Text(s));
            let twice = normalize_gender(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_gender_numeric_unchanged(n in -1e9f64..1e9) {
            prop_assert_eq!(normalize_gender(AttrValue::Number(n)), AttrValue::Number(n));
        }

        #[test]
        fn prop_apoe4_idempotent(s in ".*") {
            let once = normalize_apoe4(AttrValue::Text(s));
            let twice = normalize_apoe4(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_apoe4_numeric_unchanged(n in -1e9f64..1e9) {
            prop_assert_eq!(normalize_apoe4(AttrValue::Number(n)), AttrValue::Number(n));
        }
    }
}
