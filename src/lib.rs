pub mod activation;
pub mod config;
pub mod fetch;
pub mod handlers;
pub mod navigation;
pub mod neuron;
pub mod record;
pub mod state;
pub mod templates;
pub mod tooltip;
pub mod view;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = if let Some(ref origins) = state.config.cors_origins {
        let origins: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Everything under the UI prefix goes to the page handler, which reads
    // the segments positionally.
    let page_route = format!("{}{{*rest}}", state.config.ui_ext);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(&page_route, get(handlers::neuron::neuron_page))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> Router {
        let config = Config {
            api_base_url: server.uri(),
            ..Config::default()
        };
        router(AppState::new(config).unwrap())
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = MockServer::start().await;
        let (status, body) = get_page(app_for(&server), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn renders_a_neuron_from_the_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/solu-1l/all/0/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "similar": [ { "layer": 0, "neuron": 6, "similarity": 0.7, "token": " of" } ],
                "model": { "neuron_per_layer": 2048, "layer_count": 1 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, html) = get_page(app_for(&server), "/viz/solu-1l/all/0/5").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("href='/viz/solu-1l/all/0/6'>0:6"));
        assert!(html.contains("<a href='/viz/solu-1l/all/0/4'>Previous</a>"));
        assert!(html.contains("The GPT-4 data for this neuron is not available."));
        assert!(html.contains("The max activation dataset examples for this neuron are not available."));
    }

    #[tokio::test]
    async fn other_sources_do_not_hit_the_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let (status, html) = get_page(app_for(&server), "/viz/solu-1l/neuroscope/0/5").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("neuroscope is not supported."));
    }

    #[tokio::test]
    async fn non_numeric_indices_are_not_found() {
        let server = MockServer::start().await;
        let (status, _) = get_page(app_for(&server), "/viz/solu-1l/all/zero/5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_prefix_is_not_a_neuron_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let (status, _) = get_page(app_for(&server), "/api/solu-1l/all/0/5").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn extra_segments_and_trailing_slash_are_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/solu-1l/all/0/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(2)
            .mount(&server)
            .await;

        let (status, _) = get_page(app_for(&server), "/viz/solu-1l/all/0/5/").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_page(app_for(&server), "/viz/solu-1l/all/0/5/extra").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn other_sources_with_trailing_segments_point_at_all() {
        let server = MockServer::start().await;
        let (status, html) =
            get_page(app_for(&server), "/viz/solu-1l/neuroscope/0/5/extra").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<a href='/viz/solu-1l/all/0/5'>/all/</a>"));
    }

    #[tokio::test]
    async fn other_sources_point_at_all_before_index_checks() {
        let server = MockServer::start().await;
        let (status, html) = get_page(app_for(&server), "/viz/solu-1l/neuroscope/first/0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<a href='/viz/solu-1l/all/first/0'>/all/</a>"));
    }

    #[tokio::test]
    async fn short_paths_read_as_undefined() {
        let server = MockServer::start().await;
        let (status, html) = get_page(app_for(&server), "/viz/solu-1l/neuroscope").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<a href='/viz/solu-1l/all/undefined/undefined'>/all/</a>"));
    }

    #[tokio::test]
    async fn upstream_errors_are_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (status, html) = get_page(app_for(&server), "/viz/solu-1l/all/0/5").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("Neuron data unavailable"));
    }

    #[tokio::test]
    async fn json_format_returns_the_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/solu-1l/all/0/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "neuron2graph": { "graph": "digraph {}" }
            })))
            .mount(&server)
            .await;

        let (status, body) = get_page(app_for(&server), "/viz/solu-1l/all/0/5?format=json").await;

        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["graph"]["status"], "available");
        assert_eq!(body["graph"]["data"], "digraph {}");
        assert_eq!(body["neuron"]["layer"], 0);
    }
}
