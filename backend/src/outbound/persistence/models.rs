//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types revalidate
//! ids and roles so a corrupt row surfaces as a query error.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::ports::{AccountRecord, RepositoryError};
use crate::domain::{
    PersonalDetails, Role, ScoreRow, Student, StudentId, StudentProfile, Subject,
    SubjectDefinition, SubjectId,
};

use super::schema::{students, subjects, users};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Login lookup row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct AccountRow {
    pub username: String,
    pub password: String,
    pub role: String,
    pub student_id: Option<i32>,
}

impl TryFrom<AccountRow> for AccountRecord {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role).ok_or_else(|| {
            RepositoryError::query(format!(
                "account {} has unknown role '{}'",
                row.username, row.role
            ))
        })?;
        let student_id = row.student_id.map(student_id_from_row).transpose()?;
        Ok(Self {
            username: row.username,
            password: row.password,
            role,
            student_id,
        })
    }
}

/// Insertable student account linked to a freshly created student.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewAccountRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub student_id: i32,
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub full_name: String,
    pub class_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

impl TryFrom<StudentRow> for Student {
    type Error = RepositoryError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: student_id_from_row(row.id)?,
            full_name: row.full_name,
            class_name: row.class_name,
            email: row.email,
            date_of_birth: row.date_of_birth,
            address: row.address,
        })
    }
}

/// Insert and full-replace shape for teacher edits. `None` writes `NULL`.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct StudentProfileRow<'a> {
    pub full_name: &'a str,
    pub class_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<&'a str>,
}

impl<'a> From<&'a StudentProfile> for StudentProfileRow<'a> {
    fn from(profile: &'a StudentProfile) -> Self {
        Self {
            full_name: profile.full_name(),
            class_name: profile.class_name(),
            email: profile.email(),
            date_of_birth: profile.date_of_birth(),
            address: profile.address(),
        }
    }
}

/// Student self-edit changeset; `class_name` is deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PersonalDetailsRow<'a> {
    pub full_name: &'a str,
    pub email: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<&'a str>,
}

impl<'a> From<&'a PersonalDetails> for PersonalDetailsRow<'a> {
    fn from(details: &'a PersonalDetails) -> Self {
        Self {
            full_name: details.full_name(),
            email: details.email(),
            date_of_birth: details.date_of_birth(),
            address: details.address(),
        }
    }
}

// ---------------------------------------------------------------------------
// Subjects
// ---------------------------------------------------------------------------

/// Row struct for reading from the subjects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = subjects)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub(crate) struct SubjectRow {
    pub id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
}

impl TryFrom<SubjectRow> for Subject {
    type Error = RepositoryError;

    fn try_from(row: SubjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subject_id_from_row(row.id)?,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            credits: row.credits,
        })
    }
}

/// Insert and update shape for subjects.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = subjects)]
pub(crate) struct SubjectDefinitionRow<'a> {
    pub subject_code: &'a str,
    pub subject_name: &'a str,
    pub credits: i32,
}

impl<'a> From<&'a SubjectDefinition> for SubjectDefinitionRow<'a> {
    fn from(definition: &'a SubjectDefinition) -> Self {
        Self {
            subject_code: definition.subject_code(),
            subject_name: definition.subject_name(),
            credits: definition.credits().get(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// One row of the subjects-left-join-scores view.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ScoreViewRow {
    pub subject_id: i32,
    pub subject_code: String,
    pub subject_name: String,
    pub credits: i32,
    pub score: Option<f64>,
}

impl TryFrom<ScoreViewRow> for ScoreRow {
    type Error = RepositoryError;

    fn try_from(row: ScoreViewRow) -> Result<Self, Self::Error> {
        Ok(Self {
            subject_id: subject_id_from_row(row.subject_id)?,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            credits: row.credits,
            score: row.score,
        })
    }
}

// ---------------------------------------------------------------------------
// Id helpers
// ---------------------------------------------------------------------------

pub(crate) fn student_id_from_row(raw: i32) -> Result<StudentId, RepositoryError> {
    StudentId::new(i64::from(raw))
        .map_err(|err| RepositoryError::query(format!("stored student id: {err}")))
}

pub(crate) fn subject_id_from_row(raw: i32) -> Result<SubjectId, RepositoryError> {
    SubjectId::new(i64::from(raw))
        .map_err(|err| RepositoryError::query(format!("stored subject id: {err}")))
}

/// Convert `LAST_INSERT_ID()` into a 64-bit signed id.
pub(crate) fn inserted_id(raw: u64) -> Result<i64, RepositoryError> {
    i64::try_from(raw)
        .map_err(|_| RepositoryError::query(format!("inserted id {raw} is out of range")))
}
