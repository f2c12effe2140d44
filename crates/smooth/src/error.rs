//! Error types for the canopy-smooth crate.

/// Error type for all fallible operations in the canopy-smooth crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SmoothError {
    /// Returned when an input series has no points.
    #[error("input series is empty")]
    EmptyInput,

    /// Returned when paired inputs have different lengths.
    #[error("{field} has length {got}, expected {expected}")]
    LengthMismatch {
        /// Name of the mismatched input.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when an input that must be finite contains NaN or infinity.
    #[error("non-finite value in {field}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        field: &'static str,
    },

    /// Returned when abscissae are not in ascending order.
    #[error("x must be ascending: x[{index}] is smaller than the value before it")]
    Unsorted {
        /// First index at which the order is violated.
        index: usize,
    },

    /// Returned when spline knots repeat.
    #[error("spline knots must be strictly increasing: x[{index}] repeats the knot before it")]
    DuplicateKnot {
        /// Index of the repeated knot.
        index: usize,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_input() {
        assert_eq!(SmoothError::EmptyInput.to_string(), "input series is empty");
    }

    #[test]
    fn error_length_mismatch() {
        let e = SmoothError::LengthMismatch {
            field: "y",
            expected: 5,
            got: 4,
        };
        assert_eq!(e.to_string(), "y has length 4, expected 5");
    }

    #[test]
    fn error_non_finite_input() {
        let e = SmoothError::NonFiniteInput { field: "x" };
        assert_eq!(e.to_string(), "non-finite value in x");
    }

    #[test]
    fn error_unsorted() {
        let e = SmoothError::Unsorted { index: 3 };
        assert_eq!(e.to_string(), "x must be ascending: x[3] is smaller than the value before it");
    }

    #[test]
    fn error_duplicate_knot() {
        let e = SmoothError::DuplicateKnot { index: 1 };
        assert_eq!(
            e.to_string(),
            "spline knots must be strictly increasing: x[1] repeats the knot before it"
        );
    }

    #[test]
    fn error_invalid_config() {
        let e = SmoothError::InvalidConfig {
            reason: "frac must be in (0, 1]".to_string(),
        };
        assert_eq!(e.to_string(), "invalid configuration: frac must be in (0, 1]");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SmoothError>();
    }
}
