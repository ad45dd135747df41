//! Node description endpoint.

use actix_web::{get, web};

use crate::domain::NodeInfo;
use crate::inbound::http::schemas::NodeInfoSchema;
use crate::inbound::http::state::HttpState;

/// Which node served this request and whether it accepts writes.
#[utoipa::path(
    get,
    path = "/api/v1/node",
    responses((status = 200, description = "Local node", body = NodeInfoSchema)),
    tags = ["node"],
    operation_id = "nodeInfo",
    security([])
)]
#[get("/node")]
pub async fn node_info(state: web::Data<HttpState>) -> web::Json<NodeInfo> {
    web::Json(state.node.clone())
}
