use crate::CoreError;

/// Floating point type used for every filter bound.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Parse user-entered text as a finite number.
///
/// Surrounding whitespace is ignored. Empty input, garbage, `NaN` and the
/// infinities are all rejected so that a bad keystroke never reaches a bound.
pub fn parse_real(input: &str, what: &'static str) -> Result<Real, CoreError> {
    let trimmed = input.trim();
    let value: Real = trimmed.parse().map_err(|_| CoreError::InvalidNumber {
        input: input.to_string(),
    })?;
    ensure_finite(value, what)
}

/// Shortest display form of a bound (`10`, `-2.5`, `0.125`).
pub fn format_real(v: Real) -> String {
    if v == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{v}")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_bounds_parse_back(v in -1.0e6_f64..1.0e6_f64) {
            let text = format_real(v);
            let parsed = parse_real(&text, "bound").unwrap();
            prop_assert_eq!(parsed, v);
        }
    }
}
