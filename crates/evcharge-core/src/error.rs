use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the model artifact.
///
/// Every variant is fatal for prediction: there is no fallback model and no
/// default value.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("model artifact is corrupt: {path}: {reason}")]
    ArtifactCorrupt { path: PathBuf, reason: String },

    #[error("model feature schema mismatch: expected [{}], artifact declares [{}]", expected.join(", "), found.join(", "))]
    EncodingMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("I/O error reading model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    #[must_use]
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArtifactCorrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Rejected raw input at the form or CLI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("hour must be within 0..=23, got {0}")]
    HourOutOfRange(i64),

    #[error("month must be within 1..=12, got {0}")]
    MonthOutOfRange(i64),

    #[error("unknown day of week: {0:?}")]
    UnknownDay(String),

    #[error("unknown day type: {0:?} (expected Weekday or Weekend)")]
    UnknownDayType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_mismatch_lists_both_schemas() {
        let error = ModelError::EncodingMismatch {
            expected: vec!["hour".into(), "month".into()],
            found: vec!["month".into(), "hour".into()],
        };
        assert_eq!(
            error.to_string(),
            "model feature schema mismatch: expected [hour, month], artifact declares [month, hour]"
        );
    }

    #[test]
    fn corrupt_constructor_keeps_path_and_reason() {
        let error = ModelError::corrupt("model.json", "trailing comma");
        assert!(matches!(
            &error,
            ModelError::ArtifactCorrupt { path, reason }
                if path.as_os_str() == "model.json" && reason == "trailing comma"
        ));
    }
}
