//! Request logging middleware.
//!
//! Writes one line per request under the `api` target. Each line carries the
//! resource family (`proyectos`, `planes`, `casos`, ...) and the matched route
//! template, so `/casos/7` and `/casos/9` group under `/casos/{id}`.
//! Evidence uploads also record the announced body size.

use std::future::{Ready, ready};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, info, warn};

use crate::services::PUBLIC_PREFIX;

/// Resource families served by the API.
const RESOURCES: &[&str] = &[
    "proyectos",
    "planes",
    "versiones",
    "casos",
    "ejecuciones",
    "health",
    "ready",
];

/// Resource family of a request path: its first segment when it names an
/// API resource, `uploads` for stored evidence, `other` for the rest.
pub fn resource_of(path: &str) -> &'static str {
    if path
        .strip_prefix(PUBLIC_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    {
        return "uploads";
    }
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    if first.is_empty() {
        return "root";
    }
    RESOURCES
        .iter()
        .copied()
        .find(|r| *r == first)
        .unwrap_or("other")
}

/// Request logger middleware factory.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let resource = resource_of(&path);

        // Only multipart bodies are evidence uploads worth sizing.
        let upload_bytes = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| ct.starts_with("multipart/form-data"))
            .and_then(|_| req.headers().get(header::CONTENT_LENGTH))
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let duration_ms = start.elapsed().as_millis() as u64;
            let status = res.status();
            let route = res
                .request()
                .match_pattern()
                .unwrap_or_else(|| path.clone());

            if status.is_server_error() {
                error!(
                    target: "api",
                    %method, resource, %route, %path,
                    status = status.as_u16(), duration_ms, upload_bytes,
                    "Request failed"
                );
            } else if status.is_client_error() {
                warn!(
                    target: "api",
                    %method, resource, %route, %path,
                    status = status.as_u16(), duration_ms, upload_bytes,
                    "Request rejected"
                );
            } else if resource == "uploads" {
                debug!(
                    target: "api",
                    %path, status = status.as_u16(), duration_ms,
                    "Evidence file served"
                );
            } else {
                info!(
                    target: "api",
                    %method, resource, %route,
                    status = status.as_u16(), duration_ms, upload_bytes,
                    "Request completed"
                );
            }

            Ok(res)
        })
    }
}
