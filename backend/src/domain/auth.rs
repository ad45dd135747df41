//! Authentication primitives: login credentials and the session variant.
//!
//! Inbound adapters build [`LoginCredentials`] from raw strings before talking
//! to the login service, and carry the resulting [`Session`] in the cookie.
//! Every use-case starts by asking the session for the role it needs.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{Error, StudentId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(err: LoginValidationError) -> Self {
        let (field, code) = match err {
            LoginValidationError::EmptyUsername => ("username", "empty_username"),
            LoginValidationError::EmptyPassword => ("password", "empty_password"),
        };
        Error::invalid_request(err.to_string())
            .with_details(serde_json::json!({ "field": field, "code": code }))
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is zeroed on drop.
///
/// # Examples
/// ```
/// use gradebook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("  gv01 ", "secret").unwrap();
/// assert_eq!(creds.username(), "gv01");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Account role stored alongside each login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full read/write over students, subjects and scores.
    Teacher,
    /// Read access to their own record plus a profile subset.
    Student,
}

impl Role {
    /// Stored column value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Parse a stored column value, ignoring case and surrounding spaces.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is calling.
///
/// Serialised into the private session cookie as an internally tagged value,
/// e.g. `{"kind":"student","username":"sv07","studentId":7}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Session {
    /// No login has happened (or it was cleared).
    #[default]
    Unauthenticated,
    /// A logged-in teacher.
    Teacher {
        /// Login name.
        username: String,
    },
    /// A logged-in student linked to their student record.
    Student {
        /// Login name.
        username: String,
        /// Linked student record.
        student_id: StudentId,
    },
}

const LOGIN_REQUIRED: &str = "login required";
const TEACHERS_ONLY: &str = "only teachers may perform this action";
const STUDENTS_ONLY: &str = "only students may use this action";

impl Session {
    /// Username of the caller, if logged in.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated => None,
            Self::Teacher { username } | Self::Student { username, .. } => Some(username),
        }
    }

    /// Role of the caller, if logged in.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Unauthenticated => None,
            Self::Teacher { .. } => Some(Role::Teacher),
            Self::Student { .. } => Some(Role::Student),
        }
    }

    /// Linked student record for student sessions.
    pub fn student_id(&self) -> Option<StudentId> {
        match self {
            Self::Student { student_id, .. } => Some(*student_id),
            _ => None,
        }
    }

    /// Whether any account is logged in.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    /// Fail with `unauthorized` unless someone is logged in.
    pub fn require_authenticated(&self) -> Result<(), Error> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::unauthorized(LOGIN_REQUIRED))
        }
    }

    /// Fail unless the caller is a logged-in teacher.
    ///
    /// # Examples
    /// ```
    /// use gradebook::domain::{ErrorCode, Session, StudentId};
    ///
    /// let student = Session::Student {
    ///     username: "sv07".into(),
    ///     student_id: StudentId::new(7).unwrap(),
    /// };
    /// let err = student.require_teacher().unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Forbidden);
    /// ```
    pub fn require_teacher(&self) -> Result<(), Error> {
        self.require_authenticated()?;
        match self {
            Self::Teacher { .. } => Ok(()),
            _ => Err(Error::forbidden(TEACHERS_ONLY)),
        }
    }

    /// Fail unless the caller is a logged-in student; yields their record id.
    pub fn require_student(&self) -> Result<StudentId, Error> {
        self.require_authenticated()?;
        self.student_id()
            .ok_or_else(|| Error::forbidden(STUDENTS_ONLY))
    }
}
