//! HTTP-level tests for the JSON routes, run against an in-memory
//! content store double.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use bb_api::handlers::AppState;
use bb_core::{BoardService, ContentStore, FileRef, Upload};
use serde_json::{json, Value};

struct InMemoryStore;

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn store(&self, upload: Upload) -> anyhow::Result<FileRef> {
        Ok(FileRef {
            file: format!("/uploads/{}", upload.original_name),
            mime_type: upload
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            original_name: upload.original_name,
        })
    }
}

fn state() -> web::Data<AppState> {
    web::Data::new(AppState {
        service: BoardService::new(Arc::new(InMemoryStore)),
    })
}

#[actix_web::test]
async fn text_post_round_trip() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let req = test::TestRequest::post()
        .uri("/postText")
        .set_json(json!({ "text": " hello " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["post"]["id"], 1);
    assert_eq!(body["post"]["name"], "Anonymous1");
    assert_eq!(body["post"]["type"], "text");
    assert_eq!(body["post"]["text"], "hello");

    let req = test::TestRequest::get().uri("/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], 1);
}

#[actix_web::test]
async fn blank_text_is_rejected_with_400() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let req = test::TestRequest::post()
        .uri("/postText")
        .set_json(json!({ "text": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("text"));
}

#[actix_web::test]
async fn missing_text_field_is_rejected_with_400() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let req = test::TestRequest::post()
        .uri("/postText")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn comment_flow_and_not_found() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let req = test::TestRequest::post()
        .uri("/postText")
        .set_json(json!({ "text": "hi" }))
        .to_request();
    let _: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/posts/1/comments")
        .set_json(json!({ "text": "nice" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["comment"]["id"], "1-1");
    assert_eq!(body["comment"]["text"], "nice");

    let req = test::TestRequest::post()
        .uri("/posts/999/comments")
        .set_json(json!({ "text": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(posts[0]["comments"][0]["id"], "1-1");
}

#[actix_web::test]
async fn upload_without_blob_creates_unknown_post() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    // Well-formed multipart body with no file field at all.
    let payload = concat!(
        "------boundary\r\n",
        "Content-Disposition: form-data; name=\"note\"\r\n",
        "\r\n",
        "nothing attached\r\n",
        "------boundary--\r\n",
    );
    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            "content-type",
            "multipart/form-data; boundary=----boundary",
        ))
        .set_payload(payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["post"]["type"], "unknown");
}

#[actix_web::test]
async fn truncated_upload_is_rejected_without_state_change() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    // A file part that ends mid-stream, with no closing boundary.
    let payload = concat!(
        "------boundary\r\n",
        "Content-Disposition: form-data; name=\"file\"; filename=\"cat.png\"\r\n",
        "Content-Type: image/png\r\n",
        "\r\n",
        "only half of the bl",
    );
    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            "content-type",
            "multipart/form-data; boundary=----boundary",
        ))
        .set_payload(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    // No post was created from the truncated blob.
    let req = test::TestRequest::get().uri("/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&app, req).await;
    assert!(posts.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn unparseable_json_gets_the_error_envelope() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let req = test::TestRequest::post()
        .uri("/postText")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn upload_with_blob_creates_file_post() {
    let app =
        test::init_service(App::new().app_data(state()).configure(bb_api::configure_routes))
            .await;

    let payload = concat!(
        "------boundary\r\n",
        "Content-Disposition: form-data; name=\"file\"; filename=\"cat.png\"\r\n",
        "Content-Type: image/png\r\n",
        "\r\n",
        "not really a png\r\n",
        "------boundary--\r\n",
    );
    let req = test::TestRequest::post()
        .uri("/upload")
        .insert_header((
            "content-type",
            "multipart/form-data; boundary=----boundary",
        ))
        .set_payload(payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["post"]["type"], "file");
    assert_eq!(body["post"]["file"], "/uploads/cat.png");
    assert_eq!(body["post"]["mimeType"], "image/png");
    assert_eq!(body["post"]["originalName"], "cat.png");
}
