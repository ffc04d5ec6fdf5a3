//! Axum HTTP handlers for the status server.
//!
//! Three routes only: the JSON status endpoint, a static informational
//! index page, and a bodyless 404 for everything else.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::Html,
    Json,
};

use crate::aggregator::{self, StatusResponse};
use crate::AppState;

const INDEX_PAGE: &str = "<html>\n\
<head><title>Launchctl Status</title></head>\n\
<body>\n\
<h1>Launchctl Status Server</h1>\n\
<p>Visit <a href=\"/status\">/status</a> for JSON output</p>\n\
</body>\n\
</html>\n";

/// `GET /status`: re-probe every registered service and return the
/// aggregated records. Probe failures are part of the payload, so this
/// handler itself is infallible.
pub async fn status(
    State(state): State<AppState>,
) -> ([(header::HeaderName, &'static str); 1], Json<StatusResponse>) {
    let response = aggregator::aggregate(&state.registry, state.prober.as_ref()).await;
    (
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(response),
    )
}

/// `GET /`: static landing page pointing at `/status`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Fallback for every other path: 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
