use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::fetch::NeuronFetcher;
use crate::neuron::PathSegments;
use crate::state::AppState;
use crate::templates::{neuron_page, notice_page};
use crate::view::{NeuronView, UnsupportedSource};

#[derive(Deserialize, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// GET <ui_ext>{*rest}, where rest is `<model>/<source>/<layer>/<neuron>`.
pub async fn neuron_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let wants_json = wants_json(&query, &headers);
    let rest = uri
        .path()
        .strip_prefix(state.config.ui_ext.as_str())
        .unwrap_or(uri.path());
    let segments = PathSegments::parse(rest);

    render_page(&state.api, &state.config, &segments, wants_json).await
}

/// Fetches (when the source is `all`) and renders one neuron page.
pub async fn render_page<F: NeuronFetcher>(
    fetcher: &F,
    config: &Config,
    segments: &PathSegments,
    wants_json: bool,
) -> Response {
    if !segments.is_all_sources() {
        debug!(
            "[neuroviz] Source '{}' is not visualized, skipping fetch for {}",
            segments.source,
            segments.url_path()
        );
        let view = UnsupportedSource::build(segments, config);
        return if wants_json {
            Json(view).into_response()
        } else {
            Html(notice_page::unsupported_source(&view)).into_response()
        };
    }

    let neuron = match segments.neuron_ref() {
        Ok(neuron) => neuron,
        Err(e) => {
            debug!("[neuroviz] Rejected path {}: {:#}", segments.url_path(), e);
            return error_response(
                StatusCode::NOT_FOUND,
                wants_json,
                "Neuron not found",
                format!("{:#}", e),
                Some("Use <model>/<source>/<layer>/<neuron> with numeric indices".to_string()),
            );
        }
    };
    let neuron = &neuron;

    let record = match fetcher.fetch(neuron).await {
        Ok(record) => record,
        Err(e) => {
            warn!("[neuroviz] Failed to load neuron {}: {:#}", neuron.url_path(), e);
            return error_response(
                StatusCode::BAD_GATEWAY,
                wants_json,
                "Neuron data unavailable",
                "The neuron data could not be loaded from the neuron API.".to_string(),
                None,
            );
        }
    };

    let view = NeuronView::build(neuron, &record, config);
    debug!("[neuroviz] Rendering {}", neuron.url_path());

    if wants_json {
        Json(view).into_response()
    } else {
        Html(neuron_page::render(&view, &config.viz_js_url)).into_response()
    }
}

// ?format=json wins over the Accept header.
fn wants_json(query: &PageQuery, headers: &HeaderMap) -> bool {
    if let Some(format) = query.format.as_deref() {
        return format == "json";
    }
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("application/json"))
        .unwrap_or(false)
}

fn error_response(
    status: StatusCode,
    wants_json: bool,
    title: &str,
    message: String,
    hint: Option<String>,
) -> Response {
    if wants_json {
        (status, Json(ErrorResponse { error: message, hint })).into_response()
    } else {
        (status, Html(notice_page::error(title, &message))).into_response()
    }
}
