use thiserror::Error;

/// Failures raised while setting up or integrating a run.
///
/// Every failure is local and synchronous; a failed run produces no output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A caller-supplied run parameter is out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// An input for which the model is undefined (zero speed, NaN, ...).
    #[error("degenerate input: {0}")]
    Degenerate(String),
}

impl SimError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate(reason.into())
    }
}

pub type SimResult<T> = Result<T, SimError>;

/// Rejects non-finite or non-positive reals.
pub(crate) fn require_positive(name: &'static str, value: f64) -> SimResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(
            name,
            format!("expected a finite positive value, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_values_pass_through() {
        assert_eq!(require_positive("resolution", 0.5), Ok(0.5));
    }

    #[test]
    fn rejects_zero_negative_and_nan() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = require_positive("resolution", value).unwrap_err();
            assert!(matches!(
                err,
                SimError::InvalidArgument {
                    name: "resolution",
                    ..
                }
            ));
        }
    }
}
