use super::*;
use crate::test_support::{
    spawn_mock_service, unreachable_server_url, RecordedBody, RecordedRequest,
};
use axum::http::StatusCode;
use serde_json::json;
use shared::protocol::{BreastCancerResponse, PneumoniaResponse};
use std::io::Write;

const BREAST_CANCER_BODY: &str = r#"{"prediction":1,"message":"The Breast Cancer is Malignant","probability_malignant":0.8,"probability_benign":0.2}"#;

#[tokio::test]
async fn numeric_prediction_posts_input_vector_to_kind_endpoint() {
    let mock = spawn_mock_service(StatusCode::OK, BREAST_CANCER_BODY).await;
    let client = PredictionClient::new(mock.server_url.clone());

    let response = client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::BreastCancer,
            input_data: vec![17.99, 122.8, 1001.0, 0.3001, 0.1471, 0.2776, 10.38, 0.1184, 0.2419, 0.07871],
        })
        .await
        .expect("predict");

    assert_eq!(
        response,
        PredictionResponse::BreastCancer(BreastCancerResponse {
            prediction: Some(1),
            message: "The Breast Cancer is Malignant".to_string(),
            probability_malignant: 0.8,
            probability_benign: 0.2,
        })
    );
    assert_eq!(
        mock.requests().await,
        vec![RecordedRequest {
            path: "/breast_cancer_predict".to_string(),
            body: RecordedBody::Json(json!({
                "input_data": [17.99, 122.8, 1001.0, 0.3001, 0.1471, 0.2776, 10.38, 0.1184, 0.2419, 0.07871]
            })),
        }]
    );
}

#[tokio::test]
async fn nan_input_reaches_service_as_null() {
    let mock = spawn_mock_service(
        StatusCode::OK,
        r#"{"message":"The person is Non-Diabetic","probability_diabetic":0.1,"probability_non_diabetic":0.9}"#,
    )
    .await;
    let client = PredictionClient::new(mock.server_url.clone());

    client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::Diabetes,
            input_data: vec![148.0, f64::NAN, 35.0, 0.0, 33.6, 0.627, 50.0],
        })
        .await
        .expect("predict");

    let requests = mock.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/diabetes_predict");
    assert_eq!(
        requests[0].body,
        RecordedBody::Json(json!({
            "input_data": [148.0, null, 35.0, 0.0, 33.6, 0.627, 50.0]
        }))
    );
}

#[tokio::test]
async fn error_body_surfaces_server_message() {
    let mock = spawn_mock_service(StatusCode::BAD_REQUEST, r#"{"error":"Invalid input"}"#).await;
    let client = PredictionClient::new(mock.server_url.clone());

    let err = client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::HeartDisease,
            input_data: vec![1.0; 10],
        })
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        PredictionError::Rejected { status: 400, .. }
    ));
    assert_eq!(err.server_message(), Some("Invalid input"));
    assert_eq!(err.alert_message("fallback"), "Invalid input");
}

#[tokio::test]
async fn failure_without_body_uses_fallback() {
    let mock = spawn_mock_service(StatusCode::INTERNAL_SERVER_ERROR, "").await;
    let client = PredictionClient::new(mock.server_url.clone());

    let err = client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::BreastCancer,
            input_data: vec![1.0; 10],
        })
        .await
        .expect_err("must fail");

    assert!(matches!(err, PredictionError::Status { status: 500 }));
    assert_eq!(err.server_message(), None);
    assert_eq!(err.alert_message("fallback"), "fallback");
}

#[tokio::test]
async fn mismatched_success_body_is_malformed() {
    let mock = spawn_mock_service(StatusCode::OK, r#"{"message":"ok"}"#).await;
    let client = PredictionClient::new(mock.server_url.clone());

    let err = client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::BreastCancer,
            input_data: vec![1.0; 10],
        })
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        PredictionError::MalformedResponse {
            kind: PredictionKind::BreastCancer,
            ..
        }
    ));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let client = PredictionClient::new(unreachable_server_url().await);

    let err = client
        .predict(PredictionRequest::Numeric {
            kind: PredictionKind::Diabetes,
            input_data: vec![1.0; 7],
        })
        .await
        .expect_err("must fail");

    assert!(matches!(err, PredictionError::Transport(_)));
    assert_eq!(err.alert_message("fallback"), "fallback");
}

#[tokio::test]
async fn image_prediction_uploads_single_file_part() {
    let mock = spawn_mock_service(
        StatusCode::OK,
        r#"{"prediction":"PNEUMONIA","confidence":0.93}"#,
    )
    .await;
    let client = PredictionClient::new(mock.server_url.clone());

    let mut image = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("temp image");
    image.write_all(&[0x89, b'P', b'N', b'G', 1, 2, 3, 4]).expect("write image");
    let file_name = image
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let response = client
        .predict(PredictionRequest::Image {
            kind: PredictionKind::Pneumonia,
            path: image.path().to_path_buf(),
        })
        .await
        .expect("predict");

    assert_eq!(
        response,
        PredictionResponse::Pneumonia(PneumoniaResponse {
            prediction: "PNEUMONIA".to_string(),
            confidence: 0.93,
        })
    );
    let requests = mock.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/pneumonia_predict");
    let RecordedBody::Multipart(parts) = &requests[0].body else {
        panic!("expected multipart body, got {:?}", requests[0].body);
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "file");
    assert_eq!(parts[0].file_name, file_name);
    assert_eq!(parts[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(parts[0].len, 8);
}

#[tokio::test]
async fn missing_image_file_fails_before_any_request() {
    let mock = spawn_mock_service(StatusCode::OK, "{}").await;
    let client = PredictionClient::new(mock.server_url.clone());
    let dir = tempfile::tempdir().expect("temp dir");

    let err = client
        .predict(PredictionRequest::Image {
            kind: PredictionKind::Pneumonia,
            path: dir.path().join("missing.jpg"),
        })
        .await
        .expect_err("must fail");

    assert!(matches!(err, PredictionError::ImageRead { .. }));
    assert!(err.alert_message("fallback").contains("missing.jpg"));
    assert_eq!(mock.request_count().await, 0);
}

#[test]
fn endpoint_joins_base_url_without_double_slash() {
    let client = PredictionClient::new("http://127.0.0.1:5000/");
    assert_eq!(
        client.endpoint(PredictionKind::Pneumonia),
        "http://127.0.0.1:5000/pneumonia_predict"
    );
}

#[test]
fn upload_metadata_falls_back_to_jpeg() {
    assert_eq!(upload_mime_type(Path::new("scan.PNG")), "image/png");
    assert_eq!(upload_mime_type(Path::new("scan")), "image/jpeg");
    assert_eq!(upload_mime_type(Path::new("notes.txt")), "image/jpeg");
    assert_eq!(upload_file_name(Path::new("/tmp/chest.jpeg")), "chest.jpeg");
    assert_eq!(upload_file_name(Path::new("/")), "xray.jpg");
}
