//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, post},
    Router,
};
use tokio::sync::OnceCell;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::common::ServiceMetrics;
use crate::config::Config;
use crate::domains::fact_check::{AnalysisError, FactCheckService};
use crate::server::routes::{
    analyze_image_handler, analyze_text_handler, health_handler, metrics_handler,
};

/// Gemini accepts inline payloads up to 20 MB.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<ServiceMetrics>,
    service: Arc<OnceCell<Arc<FactCheckService>>>,
}

impl AppState {
    /// State whose fact-check service is built from `config` on first use.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            metrics: Arc::new(ServiceMetrics::new()),
            service: Arc::new(OnceCell::new()),
        }
    }

    /// State around an already-built service (tests, alternate providers).
    pub fn with_service(config: Config, service: FactCheckService, metrics: Arc<ServiceMetrics>) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
            service: Arc::new(OnceCell::new_with(Some(Arc::new(service)))),
        }
    }

    /// The process-wide service, constructing it once on first call.
    ///
    /// A construction failure is returned and retried on the next call.
    pub async fn fact_check_service(&self) -> Result<Arc<FactCheckService>, AnalysisError> {
        self.service
            .get_or_try_init(|| async {
                FactCheckService::from_config(&self.config, self.metrics.clone()).map(Arc::new)
            })
            .await
            .cloned()
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/analyze-text", post(analyze_text_handler))
        .route("/analyze-image", post(analyze_image_handler))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Outermost first: assign request id, trace with it, echo it back
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}
