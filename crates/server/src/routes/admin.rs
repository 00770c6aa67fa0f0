use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use models::perfume::PerfumeDraft;
use service::perfume::domain::{ImageUpload, SavedPerfume};
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Multipart field holding the perfume as JSON.
pub const PERFUME_PART: &str = "perfume";
/// Multipart field holding the optional image.
pub const FILE_PART: &str = "file";

/// Split a `perfume` + `file` multipart form into a draft and an optional image.
///
/// An empty `file` part (browsers send one when no file was chosen) counts as no image.
async fn read_perfume_form(mut multipart: Multipart) -> Result<(PerfumeDraft, Option<ImageUpload>), JsonApiError> {
    let mut draft = None;
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(PERFUME_PART) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?;
                let parsed: PerfumeDraft = serde_json::from_str(&text)
                    .map_err(|e| JsonApiError::bad_request(format!("invalid perfume json: {e}")))?;
                draft = Some(parsed);
            }
            Some(FILE_PART) => {
                let original_name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| JsonApiError::new(e.status(), "Invalid Multipart", Some(e.body_text())))?;
                if !bytes.is_empty() {
                    image = Some(ImageUpload { original_name, bytes: bytes.to_vec() });
                }
            }
            other => warn!(field = ?other, "ignoring unexpected multipart field"),
        }
    }
    let draft = draft.ok_or_else(|| JsonApiError::bad_request(format!("missing `{PERFUME_PART}` part")))?;
    Ok((draft, image))
}

fn log_outcome(saved: &SavedPerfume) {
    if saved.image_failed() {
        warn!(id = saved.perfume.id, image = ?saved.image, "perfume saved without its image");
    } else {
        info!(id = saved.perfume.id, image = ?saved.image, "perfume saved");
    }
}

#[utoipa::path(
    post, path = "/api/v1/admin/perfumes", tag = "admin",
    request_body(content = crate::openapi::PerfumeFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<ServerState>, multipart: Multipart) -> Result<(StatusCode, Json<SavedPerfume>), JsonApiError> {
    let (mut draft, image) = read_perfume_form(multipart).await?;
    draft.id = None;
    let saved = state.perfumes.save(draft, image).await?;
    log_outcome(&saved);
    Ok((StatusCode::CREATED, Json(saved)))
}

#[utoipa::path(
    put, path = "/api/v1/admin/perfumes/{id}", tag = "admin",
    params(("id" = i32, Path, description = "Perfume id")),
    request_body(content = crate::openapi::PerfumeFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Perfume not found")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, multipart: Multipart) -> Result<Json<SavedPerfume>, JsonApiError> {
    let (mut draft, image) = read_perfume_form(multipart).await?;
    draft.id = Some(id);
    let saved = state.perfumes.save(draft, image).await?;
    log_outcome(&saved);
    Ok(Json(saved))
}

#[utoipa::path(
    delete, path = "/api/v1/admin/perfumes/{id}", tag = "admin",
    params(("id" = i32, Path, description = "Perfume id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Perfume not found")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<serde_json::Value>, JsonApiError> {
    let message = state.perfumes.delete(id).await?;
    Ok(Json(serde_json::json!({ "message": message })))
}
