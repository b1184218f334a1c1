//! Tests for error types in the benchmarking harness.
//!
//! This module tests error variants that are actually raised by the current
//! pipeline stages to ensure proper error handling and reporting.

use layerbench::errors::{
    ConfigError, FormatError, HarnessError, ModelError, ParsingError, ValidationError,
};
use layerbench::model::DenseLayer;
use layerbench::scenario::DenseScenarioConfig;

#[cfg(test)]
mod format_error_tests {
    use super::*;

    #[test]
    fn byte_length_mismatch_reports_all_counts() {
        let error = FormatError::ByteLengthMismatch {
            expected: 16,
            actual: 15,
            element_count: 4,
        };
        let message = error.to_string();
        assert!(message.contains("16"));
        assert!(message.contains("15"));
        assert!(message.contains("4 f32 elements"));
    }
}

#[cfg(test)]
mod model_error_tests {
    use super::*;

    #[test]
    fn dense_weight_size_is_validated() {
        let result = DenseLayer::new(4, 4, vec![0.0; 15], None, false);
        assert!(matches!(
            result,
            Err(ModelError::DenseWeightSizeMismatch {
                expected: 16,
                actual: 15,
                ..
            })
        ));
    }

    #[test]
    fn bias_size_is_validated() {
        let result = DenseLayer::new(2, 3, vec![0.0; 6], Some(vec![0.0; 2]), false);
        assert!(matches!(
            result,
            Err(ModelError::BiasSizeMismatch {
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let result = DenseLayer::new(0, 3, vec![], None, false);
        assert!(matches!(result, Err(ModelError::InvalidLayerDimensions)));
    }
}

#[cfg(test)]
mod config_error_tests {
    use super::*;

    #[test]
    fn invalid_dimension_names_the_field() {
        let config = DenseScenarioConfig {
            dim: 0,
            ..Default::default()
        };
        let result = config.validate();
        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "dim"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(DenseScenarioConfig::default().validate().is_ok());
    }
}

#[cfg(test)]
mod harness_error_tests {
    use super::*;

    #[test]
    fn stage_errors_convert_into_harness_error() {
        let parsing: HarnessError = ParsingError::TokenCountMismatch {
            expected: 8,
            actual: 7,
            num_variants: 2,
            output_element_count: 4,
        }
        .into();
        assert!(matches!(parsing, HarnessError::Parsing(_)));

        let validation: HarnessError = ValidationError::ToleranceExceeded {
            variant_index: 1,
            element_index: 3,
            expected: 1.0,
            actual: 2.0,
            deviation: 1.0,
        }
        .into();
        assert!(matches!(validation, HarnessError::Validation(_)));
    }

    #[test]
    fn tolerance_error_message_identifies_the_failure() {
        let error = ValidationError::ToleranceExceeded {
            variant_index: 2,
            element_index: 17,
            expected: 1.5,
            actual: 1.75,
            deviation: 0.25,
        };
        let message = error.to_string();
        assert!(message.contains("Variant 2"));
        assert!(message.contains("element 17"));
        assert!(message.contains("0.25"));
    }
}
