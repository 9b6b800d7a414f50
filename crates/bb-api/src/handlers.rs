//! # bb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! BoardService. Response envelopes keep the original wire shape:
//! `{"success":true,"post":{...}}` on success,
//! `{"success":false,"message":"..."}` on failure.

use actix_multipart::{Multipart, MultipartError};
use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse, Responder, ResponseError};
use bb_core::{AppError, BoardService, Upload};
use futures_util::TryStreamExt;
use serde::Deserialize;
use serde_json::json;

/// State shared across all actix workers.
pub struct AppState {
    pub service: BoardService,
}

/// Maps the core error taxonomy onto HTTP statuses.
#[derive(Debug)]
pub struct ApiError(AppError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(json!({ "success": false, "message": self.to_string() }))
    }
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub text: Option<String>,
}

/// Rejects unparseable JSON bodies with the same
/// `{"success":false,"message":...}` envelope the other error paths
/// emit, instead of the extractor's default body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(json!({ "success": false, "message": err.to_string() }));
        InternalError::from_response(err, response).into()
    })
}

/// Creates a file post from a multipart upload. A request without a
/// file field is still accepted; the service records it as a post with
/// an unknown body.
pub async fn upload(
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<impl Responder, ApiError> {
    let upload = read_file_field(&mut payload).await?;
    let post = data.service.submit_file_post(upload).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "post": post })))
}

/// Drains the multipart stream and returns the first "file" field, if
/// any. Only the absence of a file field is permissive: a stream that
/// breaks mid-transfer is rejected, so no post is ever created from a
/// truncated blob.
async fn read_file_field(payload: &mut Multipart) -> Result<Option<Upload>, ApiError> {
    while let Some(mut field) = payload.try_next().await.map_err(bad_upload)? {
        if field.name() != "file" {
            continue;
        }
        let original_name = field
            .content_disposition()
            .get_filename()
            .unwrap_or("upload")
            .to_string();
        let content_type = field.content_type().map(|m| m.to_string());
        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_upload)? {
            data.extend_from_slice(&chunk);
        }
        return Ok(Some(Upload {
            data,
            original_name,
            content_type,
        }));
    }
    Ok(None)
}

fn bad_upload(err: MultipartError) -> ApiError {
    AppError::Validation(format!("malformed upload: {err}")).into()
}

/// Creates a text-only post.
pub async fn post_text(
    data: web::Data<AppState>,
    body: web::Json<TextBody>,
) -> Result<impl Responder, ApiError> {
    let text = body.text.as_deref().unwrap_or("");
    let post = data.service.submit_text_post(text).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "post": post })))
}

/// Returns the full board snapshot, comments included.
pub async fn list_posts(data: web::Data<AppState>) -> impl Responder {
    let posts = data.service.list_posts().await;
    HttpResponse::Ok().json(posts)
}

/// Appends a comment to an existing post.
pub async fn add_comment(
    data: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<TextBody>,
) -> Result<impl Responder, ApiError> {
    let post_id = path.into_inner();
    let text = body.text.as_deref().unwrap_or("");
    let comment = data.service.add_comment(post_id, text).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "comment": comment })))
}
