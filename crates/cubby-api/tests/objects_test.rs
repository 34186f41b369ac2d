mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::setup_test_app;
use serde_json::{json, Value};

fn upload_form(bucket: &str, key: &str, data: &'static [u8]) -> MultipartForm {
    MultipartForm::new()
        .add_text("bucket", bucket)
        .add_text("key", key)
        .add_part(
            "file",
            Part::bytes(data)
                .file_name(key.to_string())
                .mime_type("application/octet-stream"),
        )
}

#[tokio::test]
async fn test_upload_and_download_round_trip() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");

    let res = app
        .server
        .post("/upload")
        .multipart(upload_form("media", "docs/a.bin", b"hello cubby"))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["message"], json!("File uploaded successfully"));
    assert_eq!(
        app.store.object_data("media", "docs/a.bin"),
        Some(b"hello cubby".to_vec())
    );

    let res = app.server.get("/file?bucket=media&key=docs/a.bin").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.as_bytes().as_ref(), b"hello cubby");
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("bucket", "media")
        .add_text("key", "a.bin");
    let res = app.server.post("/upload").multipart(form).await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(app.store.remote_calls(), 0);
}

#[tokio::test]
async fn test_upload_with_empty_bucket_is_rejected() {
    let app = setup_test_app().await;

    let res = app
        .server
        .post("/upload")
        .multipart(upload_form("", "a.bin", b"data"))
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["message"], json!("Upload failed"));
    assert_eq!(app.store.remote_calls(), 0);
}

#[tokio::test]
async fn test_file_exists_caches_not_found() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");

    let res = app.server.get("/file/exists?bucket=media&key=miss.bin").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["exists"], json!(false));
    let calls = app.store.remote_calls();

    // Second check is served from the cache.
    let res = app.server.get("/file/exists?bucket=media&key=miss.bin").await;
    let body: Value = res.json();
    assert_eq!(body["exists"], json!(false));
    assert_eq!(app.store.remote_calls(), calls);
}

#[tokio::test]
async fn test_get_missing_file_returns_404() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");

    let res = app.server.get("/file?bucket=media&key=miss.bin").await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["message"]
        .as_str()
        .is_some_and(|m| m.contains("miss.bin")));
}

#[tokio::test]
async fn test_delete_file() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");
    app.store.insert_object("media", "a.bin", b"data".to_vec());

    let res = app
        .server
        .delete("/file")
        .json(&json!({"bucket": "media", "key": "a.bin"}))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["message"], json!("File deleted"));
    assert!(!app.store.has_object("media", "a.bin"));
}

#[tokio::test]
async fn test_delete_files_rejects_empty_keys() {
    let app = setup_test_app().await;

    let res = app
        .server
        .delete("/files")
        .json(&json!({"bucket": "media", "keys": []}))
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Failed to delete files"));
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(app.store.remote_calls(), 0);
}

#[tokio::test]
async fn test_delete_files_removes_each_key() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");
    app.store.insert_object("media", "a.bin", b"a".to_vec());
    app.store.insert_object("media", "b.bin", b"b".to_vec());

    let res = app
        .server
        .delete("/files")
        .json(&json!({"bucket": "media", "keys": ["a.bin", "b.bin"]}))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["message"], json!("Files deleted successfully"));
    assert!(!app.store.has_object("media", "a.bin"));
    assert!(!app.store.has_object("media", "b.bin"));
}

#[tokio::test]
async fn test_list_files_with_prefix() {
    let app = setup_test_app().await;
    app.store.insert_bucket("media");
    app.store.insert_object("media", "docs/a.bin", b"a".to_vec());
    app.store.insert_object("media", "docs/b.bin", b"b".to_vec());
    app.store.insert_object("media", "img/c.png", b"c".to_vec());

    let res = app.server.get("/files?bucket=media&prefix=docs/").await;
    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(true));
    let files = body["files"].as_array().expect("files array");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["key"], json!("docs/a.bin"));
}

#[tokio::test]
async fn test_list_files_requires_bucket() {
    let app = setup_test_app().await;

    let res = app.server.get("/files").await;
    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["success"], json!(false));
    assert_eq!(app.store.remote_calls(), 0);
}

#[tokio::test]
async fn test_copy_file() {
    let app = setup_test_app().await;
    app.store.insert_bucket("src");
    app.store.insert_bucket("dst");
    app.store.insert_object("src", "a.bin", b"payload".to_vec());

    let res = app
        .server
        .post("/file/copy")
        .json(&json!({
            "sourceBucket": "src",
            "sourceKey": "a.bin",
            "destBucket": "dst",
            "destKey": "b.bin"
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::OK);
    let body: Value = res.json();
    assert_eq!(
        body["message"],
        json!("File copied from \"src/a.bin\" to \"dst/b.bin\"")
    );
    assert_eq!(app.store.object_data("dst", "b.bin"), Some(b"payload".to_vec()));
}

#[tokio::test]
async fn test_copy_file_missing_source_is_reported() {
    let app = setup_test_app().await;
    app.store.insert_bucket("src");
    app.store.insert_bucket("dst");

    let res = app
        .server
        .post("/file/copy")
        .json(&json!({
            "sourceBucket": "src",
            "sourceKey": "miss.bin",
            "destBucket": "dst",
            "destKey": "b.bin"
        }))
        .await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["message"], json!("Failed to copy file"));
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}
