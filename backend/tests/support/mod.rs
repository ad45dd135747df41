//! Shared fixtures for integration tests.
//!
//! [`InMemoryGradebook`] implements every repository port over a mutex-held
//! snapshot that mirrors the MySQL schema's constraints: unique usernames and
//! subject codes, cascading deletes and foreign keys on scores.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;

use gradebook::Trace;
use gradebook::domain::password::hash_password;
use gradebook::domain::ports::{
    AccountRecord, AccountRepository, NewStudentAccount, RepositoryError, ScoreRepository,
    StudentRepository, SubjectRepository,
};
use gradebook::domain::{
    AccountLoginService, NodeInfo, OwnProfileService, PersonalDetails, Role, ScoreBookService,
    ScoreRow, ScoreValue, Student, StudentId, StudentProfile, StudentRosterService, Subject,
    SubjectCatalogueService, SubjectDefinition, SubjectId, WriteGate,
};
use gradebook::inbound::http::api_routes;
use gradebook::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use gradebook::inbound::http::state::{HttpState, HttpStatePorts};
use gradebook::inbound::http::validation::{json_config, path_config};

#[derive(Default)]
struct Tables {
    accounts: Vec<AccountRecord>,
    students: BTreeMap<i32, Student>,
    subjects: BTreeMap<i32, Subject>,
    scores: BTreeMap<(i32, i32), f64>,
    next_student_id: i32,
    next_subject_id: i32,
}

/// In-memory stand-in for the gradebook database.
#[derive(Default)]
pub struct InMemoryGradebook {
    tables: Mutex<Tables>,
    rollbacks: AtomicUsize,
}

impl InMemoryGradebook {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add a teacher login with a salted password.
    pub fn with_teacher(self, username: &str, password: &str) -> Self {
        self.tables().accounts.push(AccountRecord {
            username: username.to_owned(),
            password: hash_password(password).expect("hashable"),
            role: Role::Teacher,
            student_id: None,
        });
        self
    }

    /// Add a login whose password column still holds plaintext.
    pub fn with_legacy_account(
        self,
        username: &str,
        password: &str,
        role: Role,
        student_id: Option<StudentId>,
    ) -> Self {
        self.tables().accounts.push(AccountRecord {
            username: username.to_owned(),
            password: password.to_owned(),
            role,
            student_id,
        });
        self
    }

    /// Number of student rows.
    pub fn student_count(&self) -> usize {
        self.tables().students.len()
    }

    /// Student inserts undone because the login could not be created.
    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::Relaxed)
    }

    /// Stored score for the pair, if any.
    pub fn score(&self, student: i32, subject: i32) -> Option<f64> {
        self.tables().scores.get(&(student, subject)).copied()
    }

    /// Stored password column for `username`.
    pub fn stored_password(&self, username: &str) -> Option<String> {
        self.tables()
            .accounts
            .iter()
            .find(|account| account.username == username)
            .map(|account| account.password.clone())
    }
}

fn student_from_profile(id: StudentId, profile: &StudentProfile) -> Student {
    Student {
        id,
        full_name: profile.full_name().to_owned(),
        class_name: profile.class_name().map(str::to_owned),
        email: profile.email().map(str::to_owned),
        date_of_birth: profile.date_of_birth(),
        address: profile.address().map(str::to_owned),
    }
}

fn subject_from_definition(id: SubjectId, definition: &SubjectDefinition) -> Subject {
    Subject {
        id,
        subject_code: definition.subject_code().to_owned(),
        subject_name: definition.subject_name().to_owned(),
        credits: definition.credits().get(),
    }
}

#[async_trait]
impl AccountRepository for InMemoryGradebook {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        Ok(self
            .tables()
            .accounts
            .iter()
            .find(|account| account.username == username)
            .cloned())
    }
}

#[async_trait]
impl StudentRepository for InMemoryGradebook {
    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        Ok(self.tables().students.values().cloned().collect())
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        Ok(self.tables().students.get(&id.get()).cloned())
    }

    async fn create_with_account(
        &self,
        profile: &StudentProfile,
        account: &NewStudentAccount,
    ) -> Result<StudentId, RepositoryError> {
        let mut tables = self.tables();
        // Same order as the SQL transaction: student row first, then the
        // login; a duplicate username rolls the student row back.
        tables.next_student_id += 1;
        let id = StudentId::new(i64::from(tables.next_student_id))
            .map_err(|err| RepositoryError::query(err.to_string()))?;
        tables
            .students
            .insert(id.get(), student_from_profile(id, profile));
        if tables
            .accounts
            .iter()
            .any(|existing| existing.username == account.username)
        {
            tables.students.remove(&id.get());
            self.rollbacks.fetch_add(1, Ordering::Relaxed);
            return Err(RepositoryError::conflict("users.username"));
        }
        tables.accounts.push(AccountRecord {
            username: account.username.clone(),
            password: account.password_hash.clone(),
            role: Role::Student,
            student_id: Some(id),
        });
        Ok(id)
    }

    async fn update(
        &self,
        id: StudentId,
        profile: &StudentProfile,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables();
        let Some(row) = tables.students.get_mut(&id.get()) else {
            return Ok(false);
        };
        *row = student_from_profile(id, profile);
        Ok(true)
    }

    async fn update_personal_details(
        &self,
        id: StudentId,
        details: &PersonalDetails,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables();
        let Some(row) = tables.students.get_mut(&id.get()) else {
            return Ok(false);
        };
        row.full_name = details.full_name().to_owned();
        row.email = details.email().map(str::to_owned);
        row.date_of_birth = details.date_of_birth();
        row.address = details.address().map(str::to_owned);
        Ok(true)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables();
        let removed = tables.students.remove(&id.get()).is_some();
        if removed {
            tables
                .accounts
                .retain(|account| account.student_id != Some(id));
            tables.scores.retain(|(student, _), _| *student != id.get());
        }
        Ok(removed)
    }
}

#[async_trait]
impl SubjectRepository for InMemoryGradebook {
    async fn list(&self) -> Result<Vec<Subject>, RepositoryError> {
        Ok(self.tables().subjects.values().cloned().collect())
    }

    async fn find(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        Ok(self.tables().subjects.get(&id.get()).cloned())
    }

    async fn create(&self, definition: &SubjectDefinition) -> Result<SubjectId, RepositoryError> {
        let mut tables = self.tables();
        if tables
            .subjects
            .values()
            .any(|subject| subject.subject_code == definition.subject_code())
        {
            return Err(RepositoryError::conflict("subjects.subject_code"));
        }
        tables.next_subject_id += 1;
        let id = SubjectId::new(i64::from(tables.next_subject_id))
            .map_err(|err| RepositoryError::query(err.to_string()))?;
        tables
            .subjects
            .insert(id.get(), subject_from_definition(id, definition));
        Ok(id)
    }

    async fn update(
        &self,
        id: SubjectId,
        definition: &SubjectDefinition,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables();
        if tables.subjects.values().any(|subject| {
            subject.id != id && subject.subject_code == definition.subject_code()
        }) {
            return Err(RepositoryError::conflict("subjects.subject_code"));
        }
        let Some(row) = tables.subjects.get_mut(&id.get()) else {
            return Ok(false);
        };
        *row = subject_from_definition(id, definition);
        Ok(true)
    }

    async fn delete(&self, id: SubjectId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables();
        let removed = tables.subjects.remove(&id.get()).is_some();
        if removed {
            tables.scores.retain(|(_, subject), _| *subject != id.get());
        }
        Ok(removed)
    }
}

#[async_trait]
impl ScoreRepository for InMemoryGradebook {
    async fn upsert(
        &self,
        student: StudentId,
        subject: SubjectId,
        score: ScoreValue,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables();
        if !tables.students.contains_key(&student.get())
            || !tables.subjects.contains_key(&subject.get())
        {
            return Err(RepositoryError::missing_reference("scores foreign key"));
        }
        tables
            .scores
            .insert((student.get(), subject.get()), score.get());
        Ok(())
    }

    async fn scores_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<ScoreRow>, RepositoryError> {
        let tables = self.tables();
        Ok(tables
            .subjects
            .values()
            .map(|subject| ScoreRow {
                subject_id: subject.id,
                subject_code: subject.subject_code.clone(),
                subject_name: subject.subject_name.clone(),
                credits: subject.credits,
                score: tables.scores.get(&(student.get(), subject.id.get())).copied(),
            })
            .collect())
    }
}

/// Handler state wiring the real services over `store`.
pub fn http_state(store: &Arc<InMemoryGradebook>, gate: WriteGate) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            login: Arc::new(AccountLoginService::new(store.clone())),
            students: Arc::new(StudentRosterService::new(store.clone(), gate)),
            subjects: Arc::new(SubjectCatalogueService::new(store.clone(), gate)),
            scores: Arc::new(ScoreBookService::new(store.clone(), gate)),
            own_profile: Arc::new(OwnProfileService::new(store.clone(), store.clone(), gate)),
        },
        NodeInfo::from(gate),
    )
}

/// The production route table behind a plain-HTTP session cookie.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
    };
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session.middleware())
                .configure(api_routes),
        )
}

/// The session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}
