use super::app_error::AppError;
use super::data;
use super::health;
use super::state::HttpServerState;
use crate::config::{self, Pm25Config};
use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::State;
use axum::http::header;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace;
use tower_http::{ServiceBuilderExt, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PM2.5 REST API",
        description = "API for interacting with PM2.5 data from NetCDF files.",
        version = "1.0.0",
    ),
    tags(
        (name = "PM2.5", description = "PM2.5 dataset API"),
        (name = "Health", description = "Liveness and readiness checks"),
    ),
    paths(
        frontpage,
        health::liveness,
        health::readiness,
        data::get_all_data,
        data::add_data,
        data::statistics,
        data::filter_data,
        data::data_in_region,
        data::normalized,
        data::top10,
        data::get_data_by_id,
        data::update_data,
        data::delete_data,
    ),
)]
pub struct ApiDoc;

/// Routes of the service, without the transport middleware.
pub fn app_router(state: HttpServerState) -> Router {
    Router::new()
        .route("/", get(frontpage))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/data", get(data::get_all_data).post(data::add_data))
        // Static segments win over the {id} capture
        .route("/data/stats", get(data::statistics))
        .route("/data/filter", get(data::filter_data))
        .route("/data/region", get(data::data_in_region))
        .route("/data/normalized", get(data::normalized))
        .route("/data/top10", get(data::top10))
        .route(
            "/data/{id}",
            get(data::get_data_by_id)
                .put(data::update_data)
                .delete(data::delete_data),
        )
        .with_state(state)
}

/// Routes wrapped in the transport middleware configured by `config`.
pub fn app(state: HttpServerState, config: &Pm25Config) -> Result<Router> {
    let max_body_layer = DefaultBodyLimit::max(config.parse_http_body_limit()?);
    let timeout_seconds = config.http_server_timeout_seconds;

    // List of headers that shouldn't be logged
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    // Middleware creation
    let middleware = ServiceBuilder::new()
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .sensitive_response_headers(sensitive_headers)
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_seconds)))
        .compression()
        .into_inner();

    Ok(app_router(state).layer(max_body_layer).layer(middleware))
}

pub async fn run_http_server(state: HttpServerState, address: SocketAddr) -> Result<()> {
    let config = config::get()?;
    let router = app(state, &config)?;

    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Wait for the CTRL+C signal
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown CTRL+C signal handler: {}", err);
        std::future::pending::<()>().await;
    }
}

#[utoipa::path(
    get,
    path = "/",
    tag = "PM2.5",
    responses(
        (status = 200, description = "Service name", body = String)
    )
)]
async fn frontpage(State(state): State<HttpServerState>) -> Result<Json<String>, AppError> {
    let name: String = (*state.name).clone();
    Ok(Json(name))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::dataset::{Pm25Store, shared};

    #[tokio::test]
    async fn test_handler() {
        let state = HttpServerState {
            name: Arc::new("hello world".to_string()),
            store: shared(Pm25Store::new()),
        };
        let app = app_router(state);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        use axum::body::to_bytes;
        let body_str =
            String::from_utf8(to_bytes(response.into_body(), 128).await.unwrap().to_vec()).unwrap();
        assert_eq!(body_str, "\"hello world\"");
    }

    #[test]
    fn test_openapi_lists_data_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/data", "/data/{id}", "/data/region", "/health/live"] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
        assert_eq!(doc.info.title, "PM2.5 REST API");
    }
}
