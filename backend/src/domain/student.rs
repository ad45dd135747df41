//! Student records and the validated inputs used to write them.
//!
//! Raw form values arrive as [`StudentDraft`] / [`PersonalDetailsDraft`] and
//! are validated into [`StudentProfile`] / [`PersonalDetails`] before any
//! repository is called.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Date format accepted for `date_of_birth`.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for student inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// Student ids are positive database keys.
    #[error("student id must be a positive integer")]
    InvalidId {
        /// Rejected value.
        value: i64,
    },
    /// Full name was blank once trimmed.
    #[error("full name must not be empty")]
    EmptyFullName,
    /// Date of birth was present but not a `YYYY-MM-DD` calendar date.
    #[error("date of birth must use the YYYY-MM-DD format")]
    InvalidDateOfBirth {
        /// Rejected text.
        value: String,
    },
}

impl StudentValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "studentId",
            Self::EmptyFullName => "fullName",
            Self::InvalidDateOfBirth { .. } => "dateOfBirth",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::EmptyFullName => "empty_full_name",
            Self::InvalidDateOfBirth { .. } => "invalid_date",
        }
    }
}

impl From<StudentValidationError> for Error {
    fn from(err: StudentValidationError) -> Self {
        let details = match &err {
            StudentValidationError::InvalidId { value } => {
                json!({ "field": err.field(), "code": err.code(), "value": value })
            }
            StudentValidationError::InvalidDateOfBirth { value } => {
                json!({ "field": err.field(), "code": err.code(), "value": value })
            }
            StudentValidationError::EmptyFullName => {
                json!({ "field": err.field(), "code": err.code() })
            }
        };
        Error::invalid_request(err.to_string()).with_details(details)
    }
}

/// Primary key of a student row.
///
/// # Examples
/// ```
/// use gradebook::domain::StudentId;
///
/// assert_eq!(StudentId::new(7).unwrap().get(), 7);
/// assert!(StudentId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct StudentId(i32);

impl StudentId {
    /// Validate a raw id.
    pub fn new(value: i64) -> Result<Self, StudentValidationError> {
        i32::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(StudentValidationError::InvalidId { value })
    }

    /// Raw database value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StudentId> for i32 {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-way outcome of reading a date-of-birth field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthDateInput {
    /// Missing or blank.
    Absent,
    /// Present but not a calendar date in `YYYY-MM-DD` form.
    Invalid(String),
    /// A valid calendar date.
    Valid(NaiveDate),
}

impl BirthDateInput {
    /// Classify raw form text.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::BirthDateInput;
    ///
    /// assert_eq!(BirthDateInput::parse(Some("  ")), BirthDateInput::Absent);
    /// assert!(matches!(BirthDateInput::parse(Some("2005-02-30")), BirthDateInput::Invalid(_)));
    /// assert!(matches!(BirthDateInput::parse(Some("2005-02-28")), BirthDateInput::Valid(_)));
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim).filter(|text| !text.is_empty()) else {
            return Self::Absent;
        };
        match NaiveDate::parse_from_str(text, BIRTH_DATE_FORMAT) {
            Ok(date) => Self::Valid(date),
            Err(_) => Self::Invalid(text.to_owned()),
        }
    }

    /// Turn the classification into the stored value, rejecting `Invalid`.
    pub fn into_date(self) -> Result<Option<NaiveDate>, StudentValidationError> {
        match self {
            Self::Absent => Ok(None),
            Self::Valid(date) => Ok(Some(date)),
            Self::Invalid(value) => Err(StudentValidationError::InvalidDateOfBirth { value }),
        }
    }
}

/// Trim optional text and collapse blanks to `None`.
pub(crate) fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn required_full_name(raw: &str) -> Result<String, StudentValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StudentValidationError::EmptyFullName);
    }
    Ok(trimmed.to_owned())
}

/// Raw teacher-facing student form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    /// Required.
    pub full_name: String,
    /// Optional.
    pub class_name: Option<String>,
    /// Optional.
    pub email: Option<String>,
    /// Optional `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    /// Optional.
    pub address: Option<String>,
}

/// Validated student profile written by teachers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    full_name: String,
    class_name: Option<String>,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
}

impl StudentProfile {
    /// Validate a draft.
    pub fn try_from_draft(draft: &StudentDraft) -> Result<Self, StudentValidationError> {
        Ok(Self {
            full_name: required_full_name(&draft.full_name)?,
            class_name: optional_text(draft.class_name.as_deref()),
            email: optional_text(draft.email.as_deref()),
            date_of_birth: BirthDateInput::parse(draft.date_of_birth.as_deref()).into_date()?,
            address: optional_text(draft.address.as_deref()),
        })
    }

    /// Trimmed full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Class, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Birth date, if any.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Raw student self-service form. Class name is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetailsDraft {
    /// Required.
    pub full_name: String,
    /// Optional.
    pub email: Option<String>,
    /// Optional `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    /// Optional.
    pub address: Option<String>,
}

/// Validated subset of a profile that a student may edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalDetails {
    full_name: String,
    email: Option<String>,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
}

impl PersonalDetails {
    /// Validate a draft.
    pub fn try_from_draft(draft: &PersonalDetailsDraft) -> Result<Self, StudentValidationError> {
        Ok(Self {
            full_name: required_full_name(&draft.full_name)?,
            email: optional_text(draft.email.as_deref()),
            date_of_birth: BirthDateInput::parse(draft.date_of_birth.as_deref()).into_date()?,
            address: optional_text(draft.address.as_deref()),
        })
    }

    /// Trimmed full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Email, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Birth date, if any.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// A stored student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Primary key.
    pub id: StudentId,
    /// Display name.
    pub full_name: String,
    /// Class label.
    pub class_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Serialised as `YYYY-MM-DD`.
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address.
    pub address: Option<String>,
}
