/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_hyper::test_connection::TestConnection;
use aws_hyper::SdkError;
use http::header::AUTHORIZATION;
use http::Uri;
use kms::input::{DescribeKeyInput, EncryptInput, GenerateRandomInput};
use kms::model::{KeyMetadata, KeyState};
use kms::operation::Encrypt;
use kms::output::{DescribeKeyOutput, EncryptOutput};
use kms::{Blob, Client, Config, Credentials, Kms, KmsErrorKind, Region};
use smithy_http::body::SdkBody;
use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::BoxError;

fn config() -> Config {
    Config::builder()
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::from_keys(
            "ANOTREAL",
            "notrealrnrELgWzOk3IfjzDKtFBhDby",
            None,
        ))
        .build()
}

fn respond_with(status: u16, body: &'static str) -> TestConnection<&'static str> {
    TestConnection::new(vec![(
        http::Request::new(SdkBody::empty()),
        http::Response::builder()
            .status(status)
            .header("x-amzn-requestid", "bfe81a0a-9a08-4e71-9910-cdb5ab6ea3b6")
            .body(body)
            .unwrap(),
    )])
}

#[tokio::test]
async fn encrypt_round_trip() {
    let expected = EncryptOutput {
        ciphertext_blob: Some(Blob::new(vec![1, 2, 3, 255])),
        key_id: Some("arn:aws:kms:us-east-1:111122223333:key/1234abcd".to_string()),
    };
    let response_body = serde_json::to_string(&expected).unwrap();
    let conn = TestConnection::new(vec![(
        http::Request::builder()
            .header("content-type", "application/x-amz-json-1.1")
            .header("x-amz-target", "TrentService.Encrypt")
            .uri(Uri::from_static("https://kms.us-east-1.amazonaws.com/"))
            .method("POST")
            .body(SdkBody::from(r#"{"KeyId":"alias/test","Plaintext":"c2VjcmV0"}"#))
            .unwrap(),
        http::Response::builder()
            .status(200)
            .body(response_body)
            .unwrap(),
    )]);
    let client = Client::from_conf_conn(config(), conn.clone());
    let output = client
        .encrypt(EncryptInput {
            key_id: Some("alias/test".to_string()),
            plaintext: Some(Blob::new("secret")),
            ..Default::default()
        })
        .await
        .expect("request should succeed");
    assert_eq!(output, expected);
    conn.assert_requests_match(&[]);
    let requests = conn.requests();
    let authorization = requests[0]
        .actual
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .expect("request is signed");
    assert!(
        authorization.starts_with("AWS4-HMAC-SHA256 Credential=ANOTREAL/"),
        "{}",
        authorization
    );
    assert!(authorization.contains("/us-east-1/kms/aws4_request"));
}

#[tokio::test]
async fn unknown_fields_are_ignored() {
    let conn = respond_with(
        200,
        r#"{"KeyMetadata":{"KeyId":"k-1","KeyState":"Enabled","MultiRegion":false},"Extra":[1,2,3]}"#,
    );
    let client = Client::from_conf_conn(config(), conn);
    let output = client
        .describe_key(DescribeKeyInput {
            key_id: Some("k-1".to_string()),
            ..Default::default()
        })
        .await
        .expect("extra fields are not an error");
    assert_eq!(
        output,
        DescribeKeyOutput {
            key_metadata: Some(KeyMetadata {
                key_id: Some("k-1".to_string()),
                key_state: Some(KeyState::Enabled),
                ..Default::default()
            })
        }
    );
}

#[tokio::test]
async fn modeled_error() {
    let conn = respond_with(400, r#"{"__type":"NotFoundException","message":"x"}"#);
    let client = Client::from_conf_conn(config(), conn);
    let err = client
        .describe_key(DescribeKeyInput::default())
        .await
        .expect_err("service returned an error");
    let err = err.into_service_error().expect("modeled error");
    assert_eq!(err.kind(), &KmsErrorKind::NotFound);
    assert_eq!(err.message(), Some("x"));
    assert_eq!(err.code(), Some("NotFoundException"));
    assert_eq!(err.request_id(), Some("bfe81a0a-9a08-4e71-9910-cdb5ab6ea3b6"));
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(err.retryable_error_kind(), None);
}

#[tokio::test]
async fn unknown_error_is_unhandled() {
    let conn = respond_with(400, r#"{"__type":"TotallyUnknownException"}"#);
    let client = Client::from_conf_conn(config(), conn);
    let err = client
        .generate_random(GenerateRandomInput {
            number_of_bytes: Some(64),
        })
        .await
        .expect_err("service returned an error");
    match err {
        SdkError::ServiceError { err, raw } => {
            assert_eq!(err.kind(), &KmsErrorKind::Unhandled);
            assert_eq!(err.status().as_u16(), 400);
            assert_eq!(raw.status().as_u16(), 400);
            assert_eq!(err.body().as_ref(), br#"{"__type":"TotallyUnknownException"}"#);
        }
        other => panic!("expected a service error, got {:?}", other),
    }
}

#[tokio::test]
async fn throttling_is_classified() {
    let conn = respond_with(400, r#"{"__type":"LimitExceededException","message":"slow down"}"#);
    let client = Client::from_conf_conn(config(), conn);
    let err = client
        .generate_random(GenerateRandomInput::default())
        .await
        .expect_err("service returned an error")
        .into_service_error()
        .expect("modeled error");
    assert_eq!(err.kind(), &KmsErrorKind::LimitExceeded);
    assert_eq!(err.retryable_error_kind(), Some(ErrorKind::ThrottlingError));
}

#[tokio::test]
async fn malformed_response() {
    // last `}` replaced with a space
    let conn = respond_with(200, r#"{"Plaintext":"6CG0fbzzhg5G2VcFCPmJMJ8Njv3voYCgrGlp3+BZe7eDweCXgiyDH9BnkKvLmS7gQhnYDUlyES3fZVGwv5+CxA==" "#);
    let client = Client::from_conf_conn(config(), conn);
    let err = client
        .generate_random(GenerateRandomInput::default())
        .await
        .expect_err("response was malformed")
        .into_service_error()
        .expect("parse failures are unhandled service errors");
    assert_eq!(err.kind(), &KmsErrorKind::Unhandled);
    assert_eq!(err.status().as_u16(), 200);
}

#[tokio::test]
async fn empty_body_is_an_empty_output() {
    let conn = respond_with(200, "");
    let client = Client::from_conf_conn(config(), conn);
    client
        .enable_key(Default::default())
        .await
        .expect("operations without output accept an empty body");
}

#[tokio::test]
async fn missing_credentials_are_not_sent() {
    let conn = TestConnection::<&'static str>::new(vec![]);
    let config = Config::builder().region(Region::new("us-east-1")).build();
    let client = Client::from_conf_conn(config, conn.clone());
    let err = client
        .generate_random(GenerateRandomInput::default())
        .await
        .expect_err("no credentials were configured");
    assert!(matches!(err, SdkError::CredentialsFailure(_)), "{:?}", err);
    assert!(conn.requests().is_empty());
}

#[tokio::test]
async fn request_credentials_take_precedence() {
    let conn = respond_with(200, r#"{"Plaintext":"AAEC"}"#);
    let config = Config::builder().region(Region::new("us-east-1")).build();
    let client = Client::from_conf_conn(config, conn.clone());
    let output = client
        .send_with_credentials::<kms::operation::GenerateRandom>(
            GenerateRandomInput {
                number_of_bytes: Some(3),
            },
            Credentials::from_keys("OVERRIDE", "secret", Some("token".to_string())),
        )
        .await
        .expect("request scoped credentials are used");
    assert_eq!(output.plaintext, Some(Blob::new(vec![0, 1, 2])));
    let requests = conn.requests();
    let headers = requests[0].actual.headers();
    assert!(headers[AUTHORIZATION]
        .to_str()
        .unwrap()
        .starts_with("AWS4-HMAC-SHA256 Credential=OVERRIDE/"));
    assert_eq!(headers["x-amz-security-token"], "token");
}

#[tokio::test]
async fn transport_errors_are_dispatch_failures() {
    let conn = tower::service_fn(|_req: http::Request<SdkBody>| async {
        Err::<http::Response<SdkBody>, BoxError>("connection reset".into())
    });
    let client = Client::from_conf_conn(config(), conn);
    let err = client
        .send::<Encrypt>(EncryptInput::default())
        .await
        .expect_err("transport failed");
    assert!(matches!(err, SdkError::DispatchFailure(_)), "{:?}", err);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_get_their_own_results() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    // echoes the requested key id back as the key metadata
    let conn = tower::service_fn(move |req: http::Request<SdkBody>| {
        counter.fetch_add(1, Ordering::SeqCst);
        let input: serde_json::Value =
            serde_json::from_slice(req.body().bytes().unwrap_or_default()).unwrap();
        let body = serde_json::json!({ "KeyMetadata": { "KeyId": input["KeyId"] } }).to_string();
        async move { Ok::<_, BoxError>(http::Response::new(SdkBody::from(body))) }
    });
    let client = Client::from_conf_conn(config(), conn);
    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let key_id = format!("key-{}", i);
                let output = client
                    .describe_key(DescribeKeyInput {
                        key_id: Some(key_id.clone()),
                        ..Default::default()
                    })
                    .await
                    .expect("request should succeed");
                (key_id, output)
            })
        })
        .collect();
    for task in tasks {
        let (key_id, output) = task.await.expect("task completed");
        assert_eq!(
            output.key_metadata.and_then(|metadata| metadata.key_id),
            Some(key_id)
        );
    }
    assert_eq!(calls.load(Ordering::SeqCst), 32);
}
