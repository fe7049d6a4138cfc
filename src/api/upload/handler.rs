//! Photo upload handler
//!
//! Accepts a single multipart image from an authenticated client, verifies
//! it really is an image, and stores it under a fresh name. The returned
//! URL is what clients put into an employee's `employee_photo` field.

use std::path::PathBuf;

use axum::Json;
use axum::extract::{Extension, Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentAccount;
use crate::core::ServerState;
use crate::utils::AppError;

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: usize,
    pub url: String,
}

fn validate_photo(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // The extension is client-supplied; the bytes have the final say
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!("Invalid image file: {e}")));
    }

    Ok(())
}

/// Upload photo handler
pub async fn upload(
    State(state): State<ServerState>,
    Extension(account): Extension<CurrentAccount>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let photos_dir = state.photos_dir();
    tokio::fs::create_dir_all(&photos_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create photos directory: {e}")))?;

    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        if f.name() == Some("photo") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'photo' field found. Field name must be 'photo'"))?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in photo field"))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {filename}")))?;

    validate_photo(&data, &ext)?;

    let stored_filename = format!("{}.{ext}", Uuid::new_v4());
    let file_path = photos_dir.join(&stored_filename);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

    tracing::info!(
        account = %account.id,
        original_name = %filename,
        size = %data.len(),
        "Photo uploaded"
    );

    Ok(Json(UploadResponse {
        url: format!("/api/photo/{stored_filename}"),
        filename: stored_filename,
        size: data.len(),
    }))
}
