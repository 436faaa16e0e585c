//! API logging middleware
//!
//! Tags every request with a UUID, logs it on the way in and logs status and
//! latency on the way out. The id is echoed in the `x-request-id` header.

use actix_service::{Service, Transform};
use actix_web::{
    dev::{forward_ready, ServiceRequest, ServiceResponse},
    http::{
        header::{self, HeaderName, HeaderValue},
        StatusCode,
    },
    Error, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id stored in the request extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// API logger middleware
pub struct ApiLogger {
    detailed: bool,
}

impl ApiLogger {
    /// Create a new logging middleware. `detailed` adds peer address, user
    /// agent and body size to the request line.
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl Default for ApiLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ApiLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiLoggerMiddleware {
            service: Rc::new(service),
            detailed: self.detailed,
        }))
    }
}

/// API logger middleware service
pub struct ApiLoggerMiddleware<S> {
    service: Rc<S>,
    detailed: bool,
}

impl<S, B> Service<ServiceRequest> for ApiLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future =
        std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_owned();

        if self.detailed {
            let info = req.connection_info().clone();
            debug!(
                request_id = %request_id,
                %method,
                %path,
                peer = info.peer_addr().unwrap_or("-"),
                user_agent = %header_str(&req, header::USER_AGENT),
                content_length = %header_str(&req, header::CONTENT_LENGTH),
                "request received"
            );
        } else {
            debug!(request_id = %request_id, %method, %path, "request received");
        }

        req.extensions_mut().insert(RequestId(request_id.clone()));
        let inner = Rc::clone(&self.service);

        Box::pin(async move {
            let mut outcome = inner.call(req).await;
            let line = RequestLine {
                request_id: &request_id,
                method: &method,
                path: &path,
                elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            };

            match &mut outcome {
                Ok(res) => {
                    line.status(res.status());
                    if let Ok(value) = HeaderValue::from_str(&request_id) {
                        res.headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }
                }
                Err(e) => line.failed(e),
            }

            outcome
        })
    }
}

fn header_str(req: &ServiceRequest, name: HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned()
}

/// Fields shared by every completion log line
struct RequestLine<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    elapsed_ms: u64,
}

impl RequestLine<'_> {
    fn status(&self, status: StatusCode) {
        let code = status.as_u16();
        if status.is_server_error() {
            error!(
                request_id = self.request_id,
                method = self.method,
                path = self.path,
                status = code,
                elapsed_ms = self.elapsed_ms,
                "request failed"
            );
        } else if status.is_client_error() {
            warn!(
                request_id = self.request_id,
                method = self.method,
                path = self.path,
                status = code,
                elapsed_ms = self.elapsed_ms,
                "request rejected"
            );
        } else {
            info!(
                request_id = self.request_id,
                method = self.method,
                path = self.path,
                status = code,
                elapsed_ms = self.elapsed_ms,
                "request completed"
            );
        }
    }

    fn failed(&self, e: &Error) {
        error!(
            request_id = self.request_id,
            method = self.method,
            path = self.path,
            error = %e,
            elapsed_ms = self.elapsed_ms,
            "request errored"
        );
    }
}

/// Id assigned to the current request, if it passed through [`ApiLogger`]
pub fn get_request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestId>().map(|id| id.0.clone())
}
