//! Subjects and their validated inputs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Error, NumericInput};

/// Credits assigned when the form leaves the field blank.
pub const DEFAULT_CREDITS: i32 = 3;

/// Validation failures for subject inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectValidationError {
    /// Subject ids are positive database keys.
    #[error("subject id must be a positive integer")]
    InvalidId {
        /// Rejected value.
        value: i64,
    },
    /// Subject code was blank once trimmed.
    #[error("subject code must not be empty")]
    EmptyCode,
    /// Subject name was blank once trimmed.
    #[error("subject name must not be empty")]
    EmptyName,
    /// Credits were not a whole number.
    #[error("credits must be an integer")]
    CreditsNotInteger {
        /// Rejected text.
        value: String,
    },
    /// Credits were zero or negative.
    #[error("credits must be greater than zero")]
    CreditsNotPositive {
        /// Rejected value.
        value: i64,
    },
}

impl From<SubjectValidationError> for Error {
    fn from(err: SubjectValidationError) -> Self {
        let details = match &err {
            SubjectValidationError::InvalidId { value } => {
                json!({ "field": "subjectId", "code": "invalid_id", "value": value })
            }
            SubjectValidationError::EmptyCode => {
                json!({ "field": "subjectCode", "code": "empty_subject_code" })
            }
            SubjectValidationError::EmptyName => {
                json!({ "field": "subjectName", "code": "empty_subject_name" })
            }
            SubjectValidationError::CreditsNotInteger { value } => {
                json!({ "field": "credits", "code": "credits_not_integer", "value": value })
            }
            SubjectValidationError::CreditsNotPositive { value } => {
                json!({ "field": "credits", "code": "credits_not_positive", "value": value })
            }
        };
        Error::invalid_request(err.to_string()).with_details(details)
    }
}

/// Primary key of a subject row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct SubjectId(i32);

impl SubjectId {
    /// Validate a raw id.
    pub fn new(value: i64) -> Result<Self, SubjectValidationError> {
        i32::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(SubjectValidationError::InvalidId { value })
    }

    /// Raw database value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for SubjectId {
    type Error = SubjectValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectId> for i32 {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive credit count.
///
/// # Examples
/// ```
/// use gradebook::domain::{Credits, NumericInput};
///
/// assert_eq!(Credits::parse(None).unwrap().get(), 3);
/// assert_eq!(Credits::parse(Some(&NumericInput::from("4"))).unwrap().get(), 4);
/// assert!(Credits::parse(Some(&NumericInput::from("0"))).is_err());
/// assert!(Credits::parse(Some(&NumericInput::from(2.5))).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credits(i32);

impl Credits {
    /// Parse optional form input, defaulting blanks to [`DEFAULT_CREDITS`].
    pub fn parse(raw: Option<&NumericInput>) -> Result<Self, SubjectValidationError> {
        let Some(input) = raw.filter(|input| !input.is_blank()) else {
            return Ok(Self(DEFAULT_CREDITS));
        };
        let value = input
            .as_i64()
            .ok_or_else(|| SubjectValidationError::CreditsNotInteger { value: input.raw() })?;
        if value <= 0 {
            return Err(SubjectValidationError::CreditsNotPositive { value });
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| SubjectValidationError::CreditsNotInteger { value: input.raw() })
    }

    /// Raw value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Raw subject form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectDraft {
    /// Required, unique.
    pub subject_code: String,
    /// Required.
    pub subject_name: String,
    /// Optional; defaults to [`DEFAULT_CREDITS`].
    pub credits: Option<NumericInput>,
}

/// Validated subject contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDefinition {
    subject_code: String,
    subject_name: String,
    credits: Credits,
}

impl SubjectDefinition {
    /// Validate a draft.
    pub fn try_from_draft(draft: &SubjectDraft) -> Result<Self, SubjectValidationError> {
        let subject_code = draft.subject_code.trim();
        if subject_code.is_empty() {
            return Err(SubjectValidationError::EmptyCode);
        }
        let subject_name = draft.subject_name.trim();
        if subject_name.is_empty() {
            return Err(SubjectValidationError::EmptyName);
        }
        Ok(Self {
            subject_code: subject_code.to_owned(),
            subject_name: subject_name.to_owned(),
            credits: Credits::parse(draft.credits.as_ref())?,
        })
    }

    /// Trimmed code.
    pub fn subject_code(&self) -> &str {
        &self.subject_code
    }

    /// Trimmed name.
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Credits.
    pub fn credits(&self) -> Credits {
        self.credits
    }
}

/// A stored subject row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Primary key.
    pub id: SubjectId,
    /// Unique code, e.g. `CS101`.
    pub subject_code: String,
    /// Display name.
    pub subject_name: String,
    /// Credit count.
    pub credits: i32,
}

/// Entry in the subject picker: a structured id with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectChoice {
    /// Subject to submit back.
    pub id: SubjectId,
    /// `CODE - Name`, for display only.
    pub label: String,
}

impl From<&Subject> for SubjectChoice {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id,
            label: format!("{} - {}", subject.subject_code, subject.subject_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(code: &str, name: &str, credits: Option<NumericInput>) -> SubjectDraft {
        SubjectDraft {
            subject_code: code.to_owned(),
            subject_name: name.to_owned(),
            credits,
        }
    }

    #[rstest]
    #[case(None, 3)]
    #[case(Some(NumericInput::from("")), 3)]
    #[case(Some(NumericInput::from("5")), 5)]
    #[case(Some(NumericInput::from(2.0)), 2)]
    fn credits_accepts_positive_integers(
        #[case] raw: Option<NumericInput>,
        #[case] expected: i32,
    ) {
        let credits = Credits::parse(raw.as_ref()).expect("valid credits");
        assert_eq!(credits.get(), expected);
    }

    #[rstest]
    #[case(NumericInput::from("0"))]
    #[case(NumericInput::from("-2"))]
    #[case(NumericInput::from(-1.0))]
    fn credits_rejects_non_positive(#[case] raw: NumericInput) {
        assert!(matches!(
            Credits::parse(Some(&raw)),
            Err(SubjectValidationError::CreditsNotPositive { .. })
        ));
    }

    #[rstest]
    #[case(NumericInput::from("3.5"))]
    #[case(NumericInput::from("three"))]
    #[case(NumericInput::from(1.5))]
    #[case(NumericInput::from("99999999999"))]
    fn credits_rejects_non_integers(#[case] raw: NumericInput) {
        assert!(matches!(
            Credits::parse(Some(&raw)),
            Err(SubjectValidationError::CreditsNotInteger { .. })
        ));
    }

    #[rstest]
    fn definition_trims_code_and_name() {
        let definition =
            SubjectDefinition::try_from_draft(&draft(" CS101 ", " Intro ", None)).expect("valid");
        assert_eq!(definition.subject_code(), "CS101");
        assert_eq!(definition.subject_name(), "Intro");
        assert_eq!(definition.credits().get(), DEFAULT_CREDITS);
    }

    #[rstest]
    #[case(draft("  ", "Intro", None), SubjectValidationError::EmptyCode)]
    #[case(draft("CS101", "", None), SubjectValidationError::EmptyName)]
    fn definition_requires_code_and_name(
        #[case] input: SubjectDraft,
        #[case] expected: SubjectValidationError,
    ) {
        assert_eq!(SubjectDefinition::try_from_draft(&input), Err(expected));
    }

    #[rstest]
    fn choice_label_combines_code_and_name() {
        let subject = Subject {
            id: SubjectId::new(2).expect("positive"),
            subject_code: "MA201".to_owned(),
            subject_name: "2D Geometry".to_owned(),
            credits: 4,
        };
        let choice = SubjectChoice::from(&subject);
        assert_eq!(choice.id.get(), 2);
        assert_eq!(choice.label, "MA201 - 2D Geometry");
    }

    #[rstest]
    fn credit_errors_carry_field_details() {
        let error = Error::from(SubjectValidationError::CreditsNotPositive { value: 0 });
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "credits", "code": "credits_not_positive", "value": 0 }))
        );
    }
}
