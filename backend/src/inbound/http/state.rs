//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::NodeInfo;
use crate::domain::ports::{LoginService, OwnProfile, ScoreBook, StudentRoster, SubjectCatalogue};

/// Parameter object bundling the driving ports.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Teacher student management.
    pub students: Arc<dyn StudentRoster>,
    /// Teacher subject management.
    pub subjects: Arc<dyn SubjectCatalogue>,
    /// Teacher score entry.
    pub scores: Arc<dyn ScoreBook>,
    /// Student self-service.
    pub own_profile: Arc<dyn OwnProfile>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Login use-case.
    pub login: Arc<dyn LoginService>,
    /// Teacher student management.
    pub students: Arc<dyn StudentRoster>,
    /// Teacher subject management.
    pub subjects: Arc<dyn SubjectCatalogue>,
    /// Teacher score entry.
    pub scores: Arc<dyn ScoreBook>,
    /// Student self-service.
    pub own_profile: Arc<dyn OwnProfile>,
    /// Local node description attached to tabular reads.
    pub node: NodeInfo,
}

impl HttpState {
    /// Bundle the ports with the node description.
    pub fn new(ports: HttpStatePorts, node: NodeInfo) -> Self {
        let HttpStatePorts {
            login,
            students,
            subjects,
            scores,
            own_profile,
        } = ports;
        Self {
            login,
            students,
            subjects,
            scores,
            own_profile,
            node,
        }
    }
}
