//! Request tracing middleware.
//!
//! Each request runs with a [`TraceId`] in task-local scope and inside a
//! `tracing` span carrying method, path and trace id. A well-formed
//! incoming `trace-id` header is reused so callers can correlate across
//! services; otherwise a fresh UUID is generated. The id is echoed in the
//! response header and the span records status and latency on completion.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap the app with it.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use contacts_api::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let incoming = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::from_header_or_generate(incoming);
        let span = info_span!(
            "http_request",
            method = %req.method(),
            path = %req.path(),
            trace_id = %trace_id,
            status = tracing::field::Empty,
            latency_ms = tracing::field::Empty,
        );
        let started = Instant::now();
        let fut = self.service.call(req);
        let request_span = span.clone();

        Box::pin(
            TraceId::scope(trace_id, async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, "failed to encode trace identifier header");
                    }
                }
                let status = res.status().as_u16();
                let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                request_span.record("status", status);
                request_span.record("latency_ms", latency_ms);
                info!(status, latency_ms, "request completed");
                Ok(res)
            })
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::domain::Error as DomainError;

    async fn call_with(
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse<actix_web::body::BoxBody> {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route(
                    "/echo",
                    web::get().to(|| async move {
                        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                        HttpResponse::Ok().body(id)
                    }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async move {
                        Err::<HttpResponse, _>(DomainError::not_found("contact not found"))
                    }),
                ),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    fn header_of(res: &actix_web::dev::ServiceResponse<actix_web::body::BoxBody>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned()
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_the_echoed_trace_id() {
        let res = call_with(test::TestRequest::get().uri("/echo")).await;
        let header = header_of(&res);

        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8"), header);
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn reuses_well_formed_incoming_trace_id() {
        let incoming = "00000000-0000-0000-0000-000000000001";
        let res = call_with(
            test::TestRequest::get()
                .uri("/echo")
                .insert_header((TRACE_ID_HEADER, incoming)),
        )
        .await;

        assert_eq!(header_of(&res), incoming);
    }

    #[rstest]
    #[actix_web::test]
    async fn replaces_garbage_incoming_trace_id() {
        let res = call_with(
            test::TestRequest::get()
                .uri("/echo")
                .insert_header((TRACE_ID_HEADER, "not-a-uuid")),
        )
        .await;

        assert_ne!(header_of(&res), "not-a-uuid");
    }

    #[rstest]
    #[actix_web::test]
    async fn error_body_carries_the_same_trace_id() {
        let res = call_with(test::TestRequest::get().uri("/fail")).await;
        let header = header_of(&res);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["traceId"], header.as_str());
    }
}
