//! Actix middleware shared by every route.
//!
//! Only request tracing lives here; session handling is configured in
//! [`crate::inbound::http::session_config`] because it applies to the API
//! scope alone.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
