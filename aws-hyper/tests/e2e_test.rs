/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::{set_provider, Credentials, CredentialsError, SharedCredentialsProvider};
use aws_endpoint::{set_endpoint_resolver, DefaultAwsEndpointResolver};
use aws_http::json::{build_operation, JsonOperation, JsonResponseHandler, JsonService};
use aws_hyper::test_connection::TestConnection;
use aws_hyper::{Client, SdkError};
use aws_sig_auth::signer::OperationSigningConfig;
use aws_types::credential::provide_credentials::future;
use aws_types::credential::ProvideCredentials;
use aws_types::region::Region;
use http::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::Uri;
use serde::{Deserialize, Serialize};
use smithy_http::body::SdkBody;
use smithy_http::operation::Operation;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

#[derive(Clone, Debug, PartialEq)]
enum TestErrorKind {
    ThingNotFound,
    Unhandled,
}

struct TestService;

impl JsonService for TestService {
    const SERVICE_NAME: &'static str = "test-service";
    const TARGET_PREFIX: &'static str = "TestService";
    const JSON_VERSION: &'static str = "1.1";
    const SIGNING_SERVICE: &'static str = "test-service";
    type ErrorKind = TestErrorKind;
    const ERRORS: &'static [(&'static str, TestErrorKind)] =
        &[("ThingNotFoundException", TestErrorKind::ThingNotFound)];
    const UNHANDLED: TestErrorKind = TestErrorKind::Unhandled;
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetThingInput {
    thing_id: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct GetThingOutput {
    thing_name: Option<String>,
}

struct GetThing;

impl JsonOperation for GetThing {
    const NAME: &'static str = "GetThing";
    type Service = TestService;
    type Input = GetThingInput;
    type Output = GetThingOutput;
}

fn operation(provider: SharedCredentialsProvider) -> Operation<JsonResponseHandler<GetThing>> {
    let mut op = build_operation::<GetThing>(&GetThingInput {
        thing_id: Some("abc".to_string()),
    })
    .expect("valid operation");
    let props = op.properties_mut();
    props.insert(Region::new("us-east-1"));
    props.insert(UNIX_EPOCH + Duration::new(1611160427, 0));
    props.insert(OperationSigningConfig::default_config());
    set_provider(props, provider);
    set_endpoint_resolver(
        props,
        Arc::new(DefaultAwsEndpointResolver::for_service("test-service")),
    );
    op
}

fn static_credentials() -> SharedCredentialsProvider {
    SharedCredentialsProvider::new(Credentials::from_keys("access_key", "secret", None))
}

#[tokio::test]
async fn e2e_test() {
    let expected_req = http::Request::builder()
        .header(CONTENT_TYPE, "application/x-amz-json-1.1")
        .header("x-amz-target", "TestService.GetThing")
        .header(AUTHORIZATION, "AWS4-HMAC-SHA256 Credential=access_key/20210120/us-east-1/test-service/aws4_request, SignedHeaders=content-length;content-type;host;x-amz-date;x-amz-target, Signature=c7adf8b9760fb7579286276d02b866605b24e8c089b397462490a2214dd3bb43")
        .header("x-amz-date", "20210120T163347Z")
        .uri(Uri::from_static("https://test-service.us-east-1.amazonaws.com/"))
        .method("POST")
        .body(SdkBody::from(r#"{"ThingId":"abc"}"#))
        .unwrap();
    let events = vec![(
        expected_req,
        http::Response::builder()
            .status(200)
            .body(r#"{"ThingName":"my thing","Unexpected":true}"#)
            .unwrap(),
    )];
    let conn = TestConnection::new(events);
    let client = Client::new(conn.clone());
    let resp = client
        .call(operation(static_credentials()))
        .await
        .expect("success");
    assert_eq!(
        resp,
        GetThingOutput {
            thing_name: Some("my thing".to_string())
        }
    );
    conn.assert_requests_match(&[USER_AGENT]);
}

#[tokio::test]
async fn service_errors_are_mapped() {
    let conn = TestConnection::new(vec![(
        http::Request::new(SdkBody::empty()),
        http::Response::builder()
            .status(400)
            .header("x-amzn-requestid", "req-1")
            .body(r#"{"__type":"ThingNotFoundException","message":"no thing"}"#)
            .unwrap(),
    )]);
    let client = Client::new(conn);
    let err = client
        .call(operation(static_credentials()))
        .await
        .expect_err("service error");
    match err {
        SdkError::ServiceError { err, raw } => {
            assert_eq!(err.kind(), &TestErrorKind::ThingNotFound);
            assert_eq!(err.message(), Some("no thing"));
            assert_eq!(err.request_id(), Some("req-1"));
            assert_eq!(raw.status(), 400);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn credential_failures_are_not_dispatched() {
    struct NoCredentials(Arc<AtomicUsize>);

    impl ProvideCredentials for NoCredentials {
        fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
        where
            Self: 'a,
        {
            self.0.fetch_add(1, Ordering::SeqCst);
            future::ProvideCredentials::ready(Err(CredentialsError::CredentialsNotLoaded))
        }
    }

    let provider_calls = Arc::new(AtomicUsize::new(0));
    let conn = TestConnection::<&'static str>::new(vec![]);
    let client = Client::new(conn.clone());
    let err = client
        .call(operation(SharedCredentialsProvider::new(NoCredentials(
            provider_calls.clone(),
        ))))
        .await
        .expect_err("no credentials");
    assert!(matches!(err, SdkError::CredentialsFailure(_)), "{:?}", err);
    assert_eq!(provider_calls.load(Ordering::SeqCst), 1);
    assert!(conn.requests().is_empty());
}

#[tokio::test]
async fn transport_errors_are_dispatch_failures() {
    // no responses are loaded, so the connection fails the request
    let conn = TestConnection::<&'static str>::new(vec![]);
    let client = Client::new(conn);
    let err = client
        .call(operation(static_credentials()))
        .await
        .expect_err("dispatch failure");
    assert!(matches!(err, SdkError::DispatchFailure(_)), "{:?}", err);
}
