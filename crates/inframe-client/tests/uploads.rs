use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    routing::post,
};
use inframe_client::{Asset, AssetStore, ErrorKind, HostedUploader, UploadConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const MB: usize = 1024 * 1024;

async fn receive(
    State(hits): State<Arc<AtomicUsize>>,
    Path(resource_type): Path<String>,
    body: Bytes,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "secure_url": format!("https://cdn.example/{resource_type}/upload/asset"),
        "resource_type": resource_type,
        "bytes": body.len()
    }))
}

async fn spawn_host() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/v1_1/demo/{resource_type}/upload", post(receive))
        .layer(DefaultBodyLimit::disable())
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1_1/demo/{{resource_type}}/upload"), hits)
}

fn uploader(url: String) -> HostedUploader {
    HostedUploader::new(UploadConfig {
        url: Some(url),
        upload_preset: Some("dashboard".into()),
        api_key: Some("key-123".into()),
    })
}

#[tokio::test]
async fn test_image_upload_returns_secure_url() {
    let (url, hits) = spawn_host().await;

    let stored = uploader(url)
        .upload(Asset::new("logo.png", "image/png", vec![7; 2048]))
        .await
        .unwrap();

    assert_eq!(stored.secure_url, "https://cdn.example/image/upload/asset");
    assert_eq!(stored.resource_type.as_deref(), Some("image"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_oversized_image_rejected_before_network() {
    let (url, hits) = spawn_host().await;

    let err = uploader(url)
        .upload(Asset::new("poster.jpg", "image/jpeg", vec![0; 6 * MB]))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "Image exceeds the 5 MB size limit.");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_nine_mb_pdf_is_sent() {
    let (url, hits) = spawn_host().await;

    let stored = uploader(url)
        .upload(Asset::new("prospectus.pdf", "application/pdf", vec![1; 9 * MB]))
        .await
        .unwrap();

    assert_eq!(stored.resource_type.as_deref(), Some("raw"));
    assert!(stored.bytes.unwrap() > (9 * MB) as u64);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unsupported_type_rejected_before_network() {
    let (url, hits) = spawn_host().await;

    let err = uploader(url)
        .upload(Asset::new("notes.txt", "text/plain", b"hello".to_vec()))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "Only image and PDF files can be uploaded.");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_asset_from_path_checks_size_first() {
    let path = std::env::temp_dir().join(format!("inframe-upload-{}.png", std::process::id()));
    std::fs::write(&path, vec![0u8; 6 * MB]).unwrap();

    let result = Asset::from_path(&path).await;
    std::fs::remove_file(&path).ok();

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
