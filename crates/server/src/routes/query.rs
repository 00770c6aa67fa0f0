use axum::{extract::State, Json};
use serde::Deserialize;
use service::perfume::query::QueryArguments;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Named operation plus its argument bag, e.g. `{"operation":"perfume","arguments":{"id":"1"}}`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub operation: String,
    #[serde(default)]
    pub arguments: QueryArguments,
}

#[utoipa::path(
    post, path = "/api/v1/graphql", tag = "query",
    request_body = crate::openapi::QueryRequestDoc,
    responses(
        (status = 200, description = "`{\"data\": ...}`"),
        (status = 400, description = "Unknown operation or bad arguments"),
        (status = 404, description = "Perfume not found")
    )
)]
pub async fn execute(State(state): State<ServerState>, Json(req): Json<QueryRequest>) -> Result<Json<serde_json::Value>, JsonApiError> {
    let data = state.queries.execute(&req.operation, &req.arguments).await?;
    Ok(Json(serde_json::json!({ "data": data })))
}
