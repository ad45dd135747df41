//! Builders wiring Diesel adapters into the driving-port services.

use std::sync::Arc;

use actix_web::web;

use gradebook::domain::{
    AccountLoginService, NodeInfo, OwnProfileService, ScoreBookService, StudentRosterService,
    SubjectCatalogueService, WriteGate,
};
use gradebook::inbound::http::state::{HttpState, HttpStatePorts};
use gradebook::outbound::persistence::{
    DieselAccountRepository, DieselScoreRepository, DieselStudentRepository,
    DieselSubjectRepository, MysqlConnector,
};

/// Build handler state backed by MySQL.
///
/// Every repository shares the same connector; each call still opens its own
/// connection. All mutating services receive the same `gate`.
pub fn build_http_state(connector: &MysqlConnector, gate: WriteGate) -> web::Data<HttpState> {
    let accounts = Arc::new(DieselAccountRepository::new(connector.clone()));
    let students = Arc::new(DieselStudentRepository::new(connector.clone()));
    let subjects = Arc::new(DieselSubjectRepository::new(connector.clone()));
    let scores = Arc::new(DieselScoreRepository::new(connector.clone()));

    let ports = HttpStatePorts {
        login: Arc::new(AccountLoginService::new(accounts)),
        students: Arc::new(StudentRosterService::new(students.clone(), gate)),
        subjects: Arc::new(SubjectCatalogueService::new(subjects, gate)),
        scores: Arc::new(ScoreBookService::new(scores.clone(), gate)),
        own_profile: Arc::new(OwnProfileService::new(students, scores, gate)),
    };

    web::Data::new(HttpState::new(ports, NodeInfo::from(gate)))
}

#[cfg(test)]
mod tests {
    //! Wiring checks that need no database.

    use super::*;
    use gradebook::domain::{ErrorCode, NodeRole, Session, SubjectId};
    use rstest::rstest;

    fn unreachable_connector() -> MysqlConnector {
        MysqlConnector::from_url("mysql://root@127.0.0.1:1/distributed_db")
    }

    #[rstest]
    #[case(NodeRole::Primary, true)]
    #[case(NodeRole::Replica, false)]
    fn node_info_follows_the_gate(#[case] role: NodeRole, #[case] writable: bool) {
        let state = build_http_state(&unreachable_connector(), WriteGate::for_role(role));
        assert_eq!(state.node.role, role);
        assert_eq!(state.node.writable, writable);
    }

    #[tokio::test]
    async fn replica_refuses_writes_without_touching_the_database() {
        let state = build_http_state(
            &unreachable_connector(),
            WriteGate::for_role(NodeRole::Replica),
        );
        let teacher = Session::Teacher {
            username: "gv01".into(),
        };

        let err = state
            .subjects
            .delete(&teacher, SubjectId::new(1).expect("valid id"))
            .await
            .expect_err("replica refuses");

        assert_eq!(err.code(), ErrorCode::ReadOnlyNode);
    }
}
