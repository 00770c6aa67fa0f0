use axum::{extract::{Path, Query, State}, Json};
use common::pagination::{Page, Pagination};
use models::perfume::{self, PerfumeProjection};
use service::perfume::domain::{PerfumeSearchRequest, TextSearchRequest};
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/v1/perfumes", tag = "perfumes",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index"),
        ("per_page" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    responses((status = 200, description = "Page of perfumes ordered by id"))
)]
pub async fn list(State(state): State<ServerState>, Query(page): Query<Pagination>) -> Result<Json<Page<PerfumeProjection>>, JsonApiError> {
    let p = state.perfumes.get_all(page).await?;
    info!(count = p.items.len(), page = p.page, "list perfumes");
    Ok(Json(p))
}

#[utoipa::path(
    get, path = "/api/v1/perfumes/{id}", tag = "perfumes",
    params(("id" = i32, Path, description = "Perfume id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Perfume not found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<perfume::Model>, JsonApiError> {
    Ok(Json(state.perfumes.get_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/api/v1/perfumes/ids", tag = "perfumes",
    request_body = [i32],
    responses((status = 200, description = "Perfumes whose id is in the list"))
)]
pub async fn by_ids(State(state): State<ServerState>, Json(ids): Json<Vec<i32>>) -> Result<Json<Vec<PerfumeProjection>>, JsonApiError> {
    Ok(Json(state.perfumes.get_by_ids(&ids).await?))
}

#[utoipa::path(
    post, path = "/api/v1/perfumes/search", tag = "perfumes",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index"),
        ("per_page" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    request_body = crate::openapi::PerfumeSearchRequestDoc,
    responses(
        (status = 200, description = "Filtered page"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
    Json(filter): Json<PerfumeSearchRequest>,
) -> Result<Json<Page<PerfumeProjection>>, JsonApiError> {
    Ok(Json(state.perfumes.search(filter, page).await?))
}

#[utoipa::path(
    get, path = "/api/v1/perfumes/perfumer/{perfumer}", tag = "perfumes",
    params(("perfumer" = String, Path, description = "Exact brand name")),
    responses((status = 200, description = "Perfumes of the brand, most expensive first"))
)]
pub async fn by_perfumer(State(state): State<ServerState>, Path(perfumer): Path<String>) -> Result<Json<Vec<perfume::Model>>, JsonApiError> {
    Ok(Json(state.perfumes.find_by_perfumer(&perfumer).await?))
}

#[utoipa::path(
    get, path = "/api/v1/perfumes/gender/{gender}", tag = "perfumes",
    params(("gender" = String, Path, description = "Exact gender value")),
    responses((status = 200, description = "Perfumes of the gender, most expensive first"))
)]
pub async fn by_gender(State(state): State<ServerState>, Path(gender): Path<String>) -> Result<Json<Vec<perfume::Model>>, JsonApiError> {
    Ok(Json(state.perfumes.find_by_gender(&gender).await?))
}

#[utoipa::path(
    post, path = "/api/v1/perfumes/search/text", tag = "perfumes",
    params(
        ("page" = Option<u32>, Query, description = "1-based page index"),
        ("per_page" = Option<u32>, Query, description = "Items per page (1..=100)")
    ),
    request_body = crate::openapi::TextSearchRequestDoc,
    responses((status = 200, description = "Page of matching perfumes"))
)]
pub async fn by_text(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
    Json(req): Json<TextSearchRequest>,
) -> Result<Json<Page<PerfumeProjection>>, JsonApiError> {
    Ok(Json(state.perfumes.find_by_text(req.search_type, &req.text, page).await?))
}
