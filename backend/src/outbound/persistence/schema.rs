//! Diesel table definitions for the MySQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `diesel
//! print-schema` against a migrated database regenerates them.

diesel::table! {
    /// Login accounts. Student accounts link to their record.
    users (id) {
        id -> Integer,
        /// Unique login name.
        username -> Varchar,
        /// Salted digest, or plaintext for legacy rows.
        password -> Varchar,
        /// `teacher` or `student`.
        role -> Varchar,
        student_id -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Student records.
    students (id) {
        id -> Integer,
        full_name -> Varchar,
        class_name -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        date_of_birth -> Nullable<Date>,
        address -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Subject catalogue.
    subjects (id) {
        id -> Integer,
        /// Unique code such as `CS101`.
        subject_code -> Varchar,
        subject_name -> Varchar,
        credits -> Integer,
    }
}

diesel::table! {
    /// One score per student and subject.
    scores (student_id, subject_id) {
        student_id -> Integer,
        subject_id -> Integer,
        score -> Double,
    }
}

diesel::joinable!(users -> students (student_id));
diesel::joinable!(scores -> students (student_id));
diesel::joinable!(scores -> subjects (subject_id));

diesel::allow_tables_to_appear_in_same_query!(users, students, subjects, scores);
