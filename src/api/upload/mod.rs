//! Photo routes
//!
//! `POST /api/upload` stores a photo for authenticated clients;
//! `GET /api/photo/{filename}` serves it back without authentication.

mod handler;

pub use handler::{MAX_FILE_SIZE, UploadResponse};

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::auth::require_auth;
use crate::core::ServerState;

/// Request-body cap for uploads: the photo limit plus room for the
/// multipart framing, so an over-limit photo still reaches the handler's
/// own size check instead of a bare 413
const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

enum PhotoResponse {
    Ok(String, Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for PhotoResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            PhotoResponse::Ok(content_type, content) => {
                (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], content).into_response()
            }
            PhotoResponse::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            PhotoResponse::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

async fn serve_photo(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> PhotoResponse {
    // Path traversal guard
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return PhotoResponse::BadRequest("Invalid filename");
    }

    let file_path = state.photos_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .to_string();
            PhotoResponse::Ok(content_type, content.into())
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Photo not found");
            PhotoResponse::NotFound
        }
    }
}

/// Build photo router
pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route(
            "/api/upload",
            post(handler::upload)
                .layer::<_, std::convert::Infallible>(middleware::from_fn_with_state(
                    state,
                    require_auth,
                ))
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/photo/{filename}", get(serve_photo))
}
