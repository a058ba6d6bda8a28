use super::helpers::{
    PUBLIC_BASE, Part, Reply, TestGenerator, TestStorage, expect_status, fake_jpeg,
    generate_request, image_part, read_json, send, spawn_app, spawn_app_with_settings,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use poesy_api::{
    application::generate_poem::use_case::PoemSettings,
    domain::poem::value_objects::{MAX_IMAGE_BYTES, POEM_INSTRUCTION},
};
use serde_json::{Value, json};
use std::time::Duration;

const POEM: &str = "Steam curls from porcelain cups...";

#[tokio::test]
async fn valid_jpeg_yields_poem_and_public_url() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));
    let image = fake_jpeg(2 * 1024 * 1024);

    let req = generate_request(&[
        Part::Text {
            name: "caption",
            value: "ignored",
        },
        image_part("cafe.jpg", "image/jpeg", &image),
    ]);
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    let stored = app.storage.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].size, image.len());
    assert_eq!(stored[0].content_type, "image/jpeg");
    assert!(stored[0].key.ends_with(".jpg"));

    let expected_url = format!("{}/{}", PUBLIC_BASE, stored[0].key);
    assert_eq!(
        body,
        json!({"success": true, "poem": POEM, "imageUrl": expected_url})
    );

    let prompts = app.generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].instruction, POEM_INSTRUCTION);
    assert_eq!(prompts[0].image_url.as_deref(), Some(expected_url.as_str()));
    assert_eq!(prompts[0].max_tokens, 300);
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));

    let req = generate_request(&[Part::Text {
        name: "caption",
        value: "no picture here",
    }]);
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(body, json!({"error": "No image file provided"}));
    assert!(app.storage.stored().is_empty());
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn non_multipart_body_counts_as_missing_image() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));

    let req = Request::builder()
        .method("POST")
        .uri("/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"image":"cafe.jpg"}"#))
        .expect("failed to build request");
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "No image file provided");
}

#[tokio::test]
async fn plain_string_image_field_is_rejected() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));

    let req = generate_request(&[Part::Text {
        name: "image",
        value: "https://example.com/cafe.jpg",
    }]);
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(body, json!({"error": "Invalid image file format"}));
    assert!(app.storage.stored().is_empty());
}

#[tokio::test]
async fn oversized_image_is_rejected_without_upload() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));
    let image = fake_jpeg(MAX_IMAGE_BYTES + 1);

    let req = generate_request(&[image_part("huge.jpg", "image/jpeg", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({"error": "Image file too large. Maximum size is 10MB"})
    );
    assert!(app.storage.stored().is_empty());
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn image_of_exactly_the_limit_is_accepted() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));
    let image = fake_jpeg(MAX_IMAGE_BYTES);

    let req = generate_request(&[image_part("edge.jpeg", "image/jpeg", &image)]);
    expect_status(send(&app.app, req).await, StatusCode::OK).await;

    assert_eq!(app.storage.stored()[0].size, MAX_IMAGE_BYTES);
}

#[tokio::test]
async fn disallowed_media_type_lists_allowed_formats() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));

    let req = generate_request(&[image_part("scan.bmp", "image/bmp", b"BM fake bitmap")]);
    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body["error"],
        "Invalid file type. Allowed types: image/jpeg, image/jpg, image/png, image/gif, image/webp"
    );
    assert!(app.storage.stored().is_empty());
}

#[tokio::test]
async fn storage_failure_never_reaches_the_model() {
    let app = spawn_app(
        TestStorage::failing("bucket unreachable"),
        TestGenerator::poem(POEM),
    );
    let image = fake_jpeg(1024);

    let req = generate_request(&[image_part("cafe.jpg", "image/jpeg", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::INTERNAL_SERVER_ERROR).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({"error": "Failed to upload image", "details": "bucket unreachable"})
    );
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn stalled_upload_times_out_before_the_model() {
    let settings = PoemSettings {
        storage_timeout: Duration::from_millis(50),
        ..PoemSettings::default()
    };
    let app = spawn_app_with_settings(
        TestStorage::hanging(),
        TestGenerator::poem(POEM),
        settings,
    );
    let image = fake_jpeg(1024);

    let req = generate_request(&[image_part("cafe.jpg", "image/jpeg", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::INTERNAL_SERVER_ERROR).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({"error": "Failed to upload image", "details": "upload timed out after 50ms"})
    );
    assert_eq!(app.generator.call_count(), 0);
}

#[tokio::test]
async fn empty_poem_is_reported_as_generation_failure() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(""));
    let image = fake_jpeg(1024);

    let req = generate_request(&[image_part("cafe.png", "image/png", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::INTERNAL_SERVER_ERROR).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({"error": "Failed to generate poem", "details": "No content returned from OpenAI"})
    );
    assert_eq!(app.storage.stored().len(), 1);
}

#[tokio::test]
async fn model_failure_is_reported_with_details() {
    let app = spawn_app(
        TestStorage::default(),
        TestGenerator::new(Reply::Fail {
            status: 401,
            message: "Incorrect API key provided",
        }),
    );
    let image = fake_jpeg(1024);

    let req = generate_request(&[image_part("cafe.webp", "image/webp", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::INTERNAL_SERVER_ERROR).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["error"], "Failed to generate poem");
    assert_eq!(
        body["details"],
        "OpenAI returned 401: Incorrect API key provided"
    );
}

#[tokio::test]
async fn panic_in_handler_becomes_outer_envelope() {
    let app = spawn_app(
        TestStorage::default(),
        TestGenerator::new(Reply::Panic("generator exploded")),
    );
    let image = fake_jpeg(1024);

    let req = generate_request(&[image_part("cafe.gif", "image/gif", &image)]);
    let res = expect_status(send(&app.app, req).await, StatusCode::INTERNAL_SERVER_ERROR).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({"error": "Failed to generate poem", "details": "generator exploded"})
    );
}

#[tokio::test]
async fn keys_are_unique_and_ordered_across_requests() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem(POEM));
    let image = fake_jpeg(512);

    for file_name in ["first.png", "second", "third.webp"] {
        let req = generate_request(&[image_part(file_name, "image/png", &image)]);
        expect_status(send(&app.app, req).await, StatusCode::OK).await;
    }

    let keys: Vec<String> = app.storage.stored().into_iter().map(|o| o.key).collect();
    assert_eq!(keys.len(), 3);
    assert!(keys[0] < keys[1] && keys[1] < keys[2], "keys out of order: {keys:?}");
    assert!(keys[0].ends_with(".png"));
    assert!(keys[1].ends_with(".jpg"));
    assert!(keys[2].ends_with(".webp"));
}
