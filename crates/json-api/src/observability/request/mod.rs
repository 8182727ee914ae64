//! Per-request span, request id propagation and completion logging.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::auth::Identity;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Health and metrics endpoints, served without a span or access log.
const UNTRACED_PATHS: &[&str] = &["/metrics", "/healthcheck"];

/// What the completion log needs to know about a finished request.
#[derive(Debug)]
struct Completion<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    caller: &'static str,
    status: StatusCode,
    elapsed: Duration,
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let spans::RequestSpanName {
        otel_path,
        otel_span_name,
    } = spans::request_span_name(&method, &path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        caller = tracing::field::Empty,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::parent_propagation()
        && let Some(parent_context) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent_context)
    {
        warn!("failed to set parent context on request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let completion = Completion {
        request_id: &request_id,
        method: &method,
        path: &path,
        // The identity hoop has run by now for every non-public route.
        caller: depot.obtain::<Identity>().map_or("anonymous", Identity::kind),
        status: request_ids::response_status_or_ok(res.status_code),
        elapsed: started.elapsed(),
    };

    metrics::observe_request(
        &method,
        &otel_path,
        completion.status.as_u16(),
        completion.elapsed.as_secs_f64(),
    );

    log_completion(&span, &completion);
}

fn log_completion(span: &Span, completion: &Completion<'_>) {
    let Completion {
        request_id,
        method,
        path,
        caller,
        status,
        elapsed,
    } = completion;

    let status_code = status.as_u16();
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    span.record("caller", *caller);
    span.record("status", status_code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status_code, duration_ms, caller, "request.completed");

        if status.is_server_error() {
            error!(status = status_code, method, path, request_id, "server error response");
        } else if status.is_client_error() {
            warn!(status = status_code, method, path, request_id, caller, "client error response");
        }

        if duration_ms > threshold_ms {
            warn!(
                method,
                path,
                request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    });
}
