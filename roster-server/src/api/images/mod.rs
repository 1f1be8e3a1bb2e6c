//! Image Routes
//!
//! Serves stored profile images. Uploads happen through the employee
//! create/update endpoints, so the only route here is the read side.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use http::header;

use crate::core::ServerState;

/// Image file response
enum ImageFileResponse {
    Ok(Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ImageFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ImageFileResponse::Ok(content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, "image/jpeg")],
                content,
            )
                .into_response(),
            ImageFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ImageFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve stored image handler
async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ImageFileResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ImageFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.uploads_dir().join(&filename);

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            tracing::debug!(filename = %filename, size = content.len(), "serving image");
            ImageFileResponse::Ok(content.into())
        }
        Err(e) => {
            tracing::debug!(filename = %filename, "image not found: {}", e);
            ImageFileResponse::NotFound
        }
    }
}

/// Build image router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/images/{filename}", get(serve_image))
}
