pub mod perfumes;
pub mod admin;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    service::metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public catalog, admin uploads, query gateway and static uploads.
pub fn build_router(state: ServerState, cors: CorsLayer, max_upload_bytes: usize) -> Router {
    let uploads = ServeDir::new(state.perfumes.images().uploads_dir());

    // Public routes (health, metrics, docs, uploaded images)
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest_service("/uploads", uploads);

    // Read-only catalog
    let catalog = Router::new()
        .route("/api/v1/perfumes", get(perfumes::list))
        .route("/api/v1/perfumes/ids", post(perfumes::by_ids))
        .route("/api/v1/perfumes/search", post(perfumes::search))
        .route("/api/v1/perfumes/search/text", post(perfumes::by_text))
        .route("/api/v1/perfumes/perfumer/:perfumer", get(perfumes::by_perfumer))
        .route("/api/v1/perfumes/gender/:gender", get(perfumes::by_gender))
        .route("/api/v1/perfumes/:id", get(perfumes::get))
        .route("/api/v1/graphql", post(query::execute));

    // Admin routes (multipart uploads)
    let admin_routes = Router::new()
        .route("/api/v1/admin/perfumes", post(admin::create))
        .route("/api/v1/admin/perfumes/:id", put(admin::update).delete(admin::delete))
        .layer(DefaultBodyLimit::max(max_upload_bytes));

    // Compose
    public
        .merge(catalog)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
