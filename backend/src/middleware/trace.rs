//! Per-request trace ids and access logging.
//!
//! [`Trace`] serves each request inside [`TraceId::scope`], echoes the id in
//! a `trace-id` response header and logs one line when the response is
//! ready. A valid `trace-id` request header is reused instead of minting a
//! new id.

use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, warn};

use crate::domain::TraceId;

/// Request and response header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Middleware factory; wrap the whole `App` with it.
///
/// ```
/// use actix_web::App;
/// use gradebook::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService {
            inner: Rc::new(service),
        }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceService<S> {
    inner: Rc<S>,
}

fn supplied_trace_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn stamp(headers: &mut HeaderMap, id: TraceId) {
    // A hyphenated UUID is always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        headers.insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = TraceId::adopt_or_generate(supplied_trace_id(req.headers()));
        let method = req.method().clone();
        let path = req.path().to_owned();
        let inner = Rc::clone(&self.inner);
        let started = Instant::now();

        Box::pin(TraceId::scope(id, async move {
            let mut res = inner.call(req).await?;
            stamp(res.headers_mut(), id);

            let status = res.status();
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            if status.is_server_error() {
                warn!(trace_id = %id, %method, path, status = status.as_u16(), elapsed_ms, "request failed");
            } else {
                info!(trace_id = %id, %method, path, status = status.as_u16(), elapsed_ms, "request served");
            }
            Ok(res)
        }))
    }
}
