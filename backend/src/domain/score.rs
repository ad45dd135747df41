//! Scores and the per-student score view.

use serde::Serialize;
use serde_json::json;

use super::{Error, NumericInput, SubjectId};

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;
/// Highest accepted score.
pub const MAX_SCORE: f64 = 10.0;

/// Validation failures for score input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreValidationError {
    /// No score was supplied.
    #[error("score is required")]
    Missing,
    /// The input was not a finite number.
    #[error("score must be a number")]
    NotNumeric {
        /// Rejected text.
        value: String,
    },
    /// The number lies outside `[0, 10]`.
    #[error("score must be between 0 and 10")]
    OutOfRange {
        /// Rejected value.
        value: f64,
    },
}

impl From<ScoreValidationError> for Error {
    fn from(err: ScoreValidationError) -> Self {
        let details = match &err {
            ScoreValidationError::Missing => json!({ "field": "score", "code": "missing_score" }),
            ScoreValidationError::NotNumeric { value } => {
                json!({ "field": "score", "code": "score_not_numeric", "value": value })
            }
            ScoreValidationError::OutOfRange { value } => json!({
                "field": "score",
                "code": "score_out_of_range",
                "value": value,
                "min": MIN_SCORE,
                "max": MAX_SCORE,
            }),
        };
        Error::invalid_request(err.to_string()).with_details(details)
    }
}

/// A score within `[0, 10]`.
///
/// # Examples
/// ```
/// use gradebook::domain::{NumericInput, ScoreValue};
///
/// assert_eq!(ScoreValue::parse(Some(&NumericInput::from("8.5"))).unwrap().get(), 8.5);
/// assert!(ScoreValue::parse(Some(&NumericInput::from(10.5))).is_err());
/// assert!(ScoreValue::parse(None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScoreValue(f64);

impl ScoreValue {
    /// Parse required form input.
    pub fn parse(raw: Option<&NumericInput>) -> Result<Self, ScoreValidationError> {
        let input = raw
            .filter(|input| !input.is_blank())
            .ok_or(ScoreValidationError::Missing)?;
        let value = input
            .as_f64()
            .ok_or_else(|| ScoreValidationError::NotNumeric { value: input.raw() })?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ScoreValidationError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Raw value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// One row of a student's score view: every subject, scored or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    /// Subject key.
    pub subject_id: SubjectId,
    /// Subject code.
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
    /// Subject credits.
    pub credits: i32,
    /// `None` when the student has no score for this subject.
    pub score: Option<f64>,
}
