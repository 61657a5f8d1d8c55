use std::path::{Path as FsPath, PathBuf};

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, Path, Query, State,
    },
    Json,
};
use common::types::Message;
use models::gallery::{GalleryImage, GalleryImageUpdate, ImageCreate};
use serde::Deserialize;
use service::services::gallery;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{info, warn};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::errors::{ApiError, AppJson};
use crate::state::{ServerState, UploadSettings};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

#[utoipa::path(get, path = "/api/gallery", tag = "gallery", params(GalleryQuery), responses((status = 200, description = "Active images, newest first", body = [GalleryImage])))]
pub async fn list_active(State(state): State<ServerState>, Query(q): Query<GalleryQuery>) -> Result<Json<Vec<GalleryImage>>, ApiError> {
    Ok(Json(gallery::list_active(state.store.as_ref(), q.category.as_deref()).await?))
}

#[utoipa::path(get, path = "/api/admin/gallery", tag = "gallery", security(("bearer" = [])), responses((status = 200, body = [GalleryImage])))]
pub async fn list_all(State(state): State<ServerState>) -> Result<Json<Vec<GalleryImage>>, ApiError> {
    Ok(Json(gallery::list_all(state.store.as_ref()).await?))
}

#[utoipa::path(put, path = "/api/admin/gallery/{id}", tag = "gallery", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), request_body = GalleryImageUpdate, responses((status = 200, body = GalleryImage), (status = 404, description = "Not found")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<String>, AppJson(input): AppJson<GalleryImageUpdate>) -> Result<Json<GalleryImage>, ApiError> {
    Ok(Json(gallery::update(state.store.as_ref(), &id, input).await?))
}

#[utoipa::path(delete, path = "/api/admin/gallery/{id}", tag = "gallery", security(("bearer" = [])), params(("id" = String, Path, description = "Document id")), responses((status = 200, body = crate::openapi::MessageResponse), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, ApiError> {
    let image = gallery::delete(state.store.as_ref(), &id).await?;
    if let Some(path) = state.uploads.path_for_url(&image.image_url) {
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(path = %path.display(), error = %e, "image_file_not_removed");
        }
    }
    Ok(Json(Message::new("Image deleted successfully")))
}

/// Multipart upload: `file` plus `title`, `description`, `category`, `tags`.
#[utoipa::path(post, path = "/api/admin/upload", tag = "gallery", security(("bearer" = [])), request_body(content = crate::openapi::UploadForm, content_type = "multipart/form-data"), responses((status = 200, body = GalleryImage), (status = 400, description = "Not an image, missing file or invalid metadata")))]
pub async fn upload(State(state): State<ServerState>, multipart: Result<Multipart, MultipartRejection>) -> Result<Json<GalleryImage>, ApiError> {
    let mut multipart = multipart?;
    let mut stored: Option<StoredFile> = None;
    let result = async {
        let meta = read_form(&mut multipart, &state.uploads, &mut stored).await?;
        let file = stored.as_ref().ok_or_else(|| ApiError::Validation("file is required".into()))?;
        let image = gallery::create(state.store.as_ref(), meta, state.uploads.url_for(&file.name)).await?;
        Ok::<_, ApiError>(image)
    }
    .await;

    match result {
        Ok(image) => Ok(Json(image)),
        Err(e) => {
            if let Some(file) = stored {
                discard(&file.path).await;
            }
            Err(e)
        }
    }
}

struct StoredFile {
    name: String,
    path: PathBuf,
}

async fn read_form(multipart: &mut Multipart, uploads: &UploadSettings, stored: &mut Option<StoredFile>) -> Result<ImageCreate, ApiError> {
    let mut meta = ImageCreate::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if stored.is_some() {
                    return Err(ApiError::Validation("only one file per upload".into()));
                }
                *stored = Some(store_file(field, uploads).await?);
            }
            "title" => meta.title = field.text().await?,
            "description" => meta.description = field.text().await?,
            "category" => meta.category = field.text().await?,
            "tags" => meta.tags = ImageCreate::parse_tags(&field.text().await?),
            _ => {}
        }
    }
    Ok(meta)
}

async fn store_file(mut field: Field<'_>, uploads: &UploadSettings) -> Result<StoredFile, ApiError> {
    let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
    if !content_type.starts_with("image/") {
        return Err(ApiError::Validation("only image files are allowed".into()));
    }
    let ext = file_extension(field.file_name(), &content_type);
    let name = format!("{}.{}", Uuid::new_v4(), ext);
    let path = uploads.dir.join(&name);

    let mut out = File::create(&path).await.map_err(|e| ApiError::Internal(format!("create {}: {e}", path.display())))?;
    let written = async {
        let mut size = 0usize;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len();
            out.write_all(&chunk).await.map_err(|e| ApiError::Internal(format!("write upload: {e}")))?;
        }
        out.flush().await.map_err(|e| ApiError::Internal(format!("flush upload: {e}")))?;
        Ok::<_, ApiError>(size)
    }
    .await;

    match written {
        Ok(size) => {
            info!(file = %name, size, %content_type, "upload_stored");
            Ok(StoredFile { name, path })
        }
        Err(e) => {
            drop(out);
            discard(&path).await;
            Err(e)
        }
    }
}

async fn discard(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "upload_cleanup_failed");
    }
}

/// Extension from the client file name when it is plain ASCII alphanumerics, else the image subtype.
fn file_extension(file_name: Option<&str>, content_type: &str) -> String {
    let from_name = file_name
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = from_name {
        return ext.to_ascii_lowercase();
    }
    let subtype: String = content_type
        .trim_start_matches("image/")
        .split(|c: char| c == ';' || c == '+')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    match subtype.as_str() {
        "" => "img".to_string(),
        "jpeg" => "jpg".to_string(),
        _ => subtype,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_prefers_clean_file_name() {
        assert_eq!(file_extension(Some("Dal Lake.JPG"), "image/jpeg"), "jpg");
        assert_eq!(file_extension(Some("shot.png"), "image/png"), "png");
        assert_eq!(file_extension(Some("weird.p$g"), "image/png"), "png");
        assert_eq!(file_extension(Some("noext"), "image/jpeg"), "jpg");
        assert_eq!(file_extension(None, "image/svg+xml"), "svg");
        assert_eq!(file_extension(None, "image/"), "img");
    }
}
