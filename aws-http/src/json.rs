/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS JSON 1.0 / 1.1 protocol
//!
//! Every operation of an AWS JSON service is a `POST /` whose body is the JSON serialized input.
//! The operation is selected with the `x-amz-target: {TargetPrefix}.{OperationName}` header.
//! Success responses carry the JSON serialized output; error responses carry an error code that is
//! matched against the error registry of the service.

use crate::error::{parse_generic_error, request_id, ServiceError};
use aws_types::SigningService;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use http::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use smithy_http::body::SdkBody;
use smithy_http::operation;
use smithy_http::operation::Operation;
use smithy_http::response::ParseStrictResponse;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Instant;
use thiserror::Error;

/// An AWS service spoken to with the AWS JSON protocol
pub trait JsonService: Send + Sync + 'static {
    /// Service name, used in operation metadata and logs
    const SERVICE_NAME: &'static str;

    /// Prefix of the `x-amz-target` header, eg. `TrentService`
    const TARGET_PREFIX: &'static str;

    /// `1.0` or `1.1`
    const JSON_VERSION: &'static str;

    /// Name of the service used in the SigV4 credential scope
    const SIGNING_SERVICE: &'static str;

    type ErrorKind: Clone + Debug + Send + Sync + 'static;

    /// Error codes and the kind they map to, in registration order. The first match wins.
    const ERRORS: &'static [(&'static str, Self::ErrorKind)];

    /// Kind returned for codes missing from [`ERRORS`](JsonService::ERRORS)
    const UNHANDLED: Self::ErrorKind;
}

/// A single operation of a [`JsonService`]
///
/// Operations are zero sized marker types; all the behavior lives in the generic invoker.
pub trait JsonOperation: Send + Sync + 'static {
    const NAME: &'static str;
    type Service: JsonService;
    type Input: Serialize;
    type Output: DeserializeOwned + Send + 'static;
}

pub type OperationError<O> = ServiceError<<<O as JsonOperation>::Service as JsonService>::ErrorKind>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("input could not be serialized: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),
}

pub fn content_type<S: JsonService>() -> String {
    format!("application/x-amz-json-{}", S::JSON_VERSION)
}

pub fn target<O: JsonOperation>() -> String {
    format!("{}.{}", <O::Service as JsonService>::TARGET_PREFIX, O::NAME)
}

/// Marshal `input` into an operation ready to be sent
///
/// The returned operation carries the [`SigningService`] and the operation [`Metadata`](operation::Metadata).
/// Region, credentials and endpoint resolution are added by the client.
pub fn build_operation<O: JsonOperation>(
    input: &O::Input,
) -> Result<Operation<JsonResponseHandler<O>>, BuildError> {
    let start = Instant::now();
    let body = serde_json::to_vec(input)?;
    let request = http::Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, content_type::<O::Service>())
        .header("x-amz-target", target::<O>())
        .header(CONTENT_LENGTH, HeaderValue::from(body.len()))
        .body(SdkBody::from(body))?;
    tracing::debug!(marshal_time = ?start.elapsed(), operation = O::NAME, "marshalled request");
    let mut request = operation::Request::new(request);
    request
        .properties_mut()
        .insert(SigningService::from_static(
            <O::Service as JsonService>::SIGNING_SERVICE,
        ));
    Ok(Operation::new(request, JsonResponseHandler::new()).with_metadata(
        operation::Metadata::new(O::NAME, <O::Service as JsonService>::SERVICE_NAME),
    ))
}

/// Look up the kind registered for `code`
pub fn error_kind<S: JsonService>(code: Option<&str>) -> S::ErrorKind {
    code.and_then(|code| {
        S::ERRORS
            .iter()
            .find(|(registered, _)| *registered == code)
            .map(|(_, kind)| kind.clone())
    })
    .unwrap_or(S::UNHANDLED)
}

/// Response handler for a [`JsonOperation`]
pub struct JsonResponseHandler<O> {
    _operation: PhantomData<fn() -> O>,
}

impl<O> JsonResponseHandler<O> {
    pub fn new() -> Self {
        JsonResponseHandler {
            _operation: PhantomData,
        }
    }
}

impl<O> Default for JsonResponseHandler<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Clone for JsonResponseHandler<O> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

impl<O> ParseStrictResponse for JsonResponseHandler<O>
where
    O: JsonOperation,
{
    type Output = Result<O::Output, OperationError<O>>;

    fn parse(&self, response: &Response<Bytes>) -> Self::Output {
        let start = Instant::now();
        let body = response.body();
        if response.status().is_success() {
            let payload: &[u8] = if is_blank(body) { b"{}" } else { &body[..] };
            let parsed = serde_json::from_slice(payload).map_err(|err| {
                tracing::debug!(error = %err, "success response could not be deserialized");
                ServiceError::new(
                    <O::Service as JsonService>::UNHANDLED,
                    smithy_types::Error {
                        request_id: request_id(response).map(str::to_string),
                        ..Default::default()
                    },
                    response.status(),
                    body.clone(),
                )
                .with_source(err)
            });
            tracing::debug!(unmarshal_time = ?start.elapsed(), operation = O::NAME, "unmarshalled response");
            parsed
        } else {
            let meta = parse_generic_error(response);
            let kind = error_kind::<O::Service>(meta.code());
            tracing::debug!(status = %response.status(), code = ?meta.code(), kind = ?kind, "service error");
            Err(ServiceError::new(kind, meta, response.status(), body.clone()))
        }
    }
}

#[cfg(test)]
mod test {
    use crate::json::{build_operation, JsonOperation, JsonResponseHandler, JsonService};
    use aws_types::SigningService;
    use bytes::Bytes;
    use protocol_test_helpers::{assert_ok, validate_body, validate_headers, MediaType};
    use serde::{Deserialize, Serialize};
    use smithy_http::response::ParseStrictResponse;
    use std::error::Error;

    #[derive(Clone, Debug, PartialEq)]
    enum TestErrorKind {
        NotFound,
        Disabled,
        Unhandled,
    }

    struct TestService;

    impl JsonService for TestService {
        const SERVICE_NAME: &'static str = "test";
        const TARGET_PREFIX: &'static str = "TestService";
        const JSON_VERSION: &'static str = "1.1";
        const SIGNING_SERVICE: &'static str = "testsvc";
        type ErrorKind = TestErrorKind;
        const ERRORS: &'static [(&'static str, TestErrorKind)] = &[
            ("NotFoundException", TestErrorKind::NotFound),
            ("DisabledException", TestErrorKind::Disabled),
            ("NotFoundException", TestErrorKind::Disabled),
        ];
        const UNHANDLED: TestErrorKind = TestErrorKind::Unhandled;
    }

    #[derive(Serialize, Default)]
    #[serde(rename_all = "PascalCase")]
    struct GetThingInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        thing_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        limit: Option<i32>,
    }

    #[derive(Deserialize, Debug, PartialEq, Default)]
    #[serde(rename_all = "PascalCase")]
    struct GetThingOutput {
        thing_id: Option<String>,
    }

    struct GetThing;

    impl JsonOperation for GetThing {
        const NAME: &'static str = "GetThing";
        type Service = TestService;
        type Input = GetThingInput;
        type Output = GetThingOutput;
    }

    fn response(status: u16, body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn request_is_marshalled() {
        let input = GetThingInput {
            thing_id: Some("abc".to_string()),
            limit: None,
        };
        let op = build_operation::<GetThing>(&input).expect("valid input");
        assert_eq!(op.metadata().map(|m| m.name()), Some("GetThing"));
        assert_eq!(
            op.properties().get::<SigningService>(),
            Some(&SigningService::from_static("testsvc"))
        );
        let req = op.request().http();
        assert_eq!(req.method(), http::Method::POST);
        assert_eq!(req.uri(), "/");
        assert_ok(validate_headers(
            req,
            &[
                ("content-type", "application/x-amz-json-1.1"),
                ("x-amz-target", "TestService.GetThing"),
                ("content-length", "17"),
            ],
        ));
        assert_ok(validate_body(
            req.body().bytes().unwrap(),
            r#"{"ThingId":"abc"}"#,
            MediaType::from("application/x-amz-json-1.1"),
        ));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed = JsonResponseHandler::<GetThing>::new()
            .parse(&response(200, r#"{"ThingId":"abc","Surprise":{"nested":[1,2]}}"#))
            .expect("valid response");
        assert_eq!(parsed.thing_id.as_deref(), Some("abc"));
    }

    #[test]
    fn empty_success_body_is_an_empty_output() {
        let parsed = JsonResponseHandler::<GetThing>::new()
            .parse(&response(200, ""))
            .expect("valid response");
        assert_eq!(parsed, GetThingOutput::default());
    }

    #[test]
    fn first_registered_error_wins() {
        let err = JsonResponseHandler::<GetThing>::new()
            .parse(&response(400, r#"{"__type":"NotFoundException","message":"x"}"#))
            .expect_err("error response");
        assert_eq!(err.kind(), &TestErrorKind::NotFound);
        assert_eq!(err.message(), Some("x"));
        assert_eq!(err.status().as_u16(), 400);
    }

    #[test]
    fn unregistered_errors_are_unhandled() {
        let err = JsonResponseHandler::<GetThing>::new()
            .parse(&response(400, r#"{"__type":"TotallyUnknownException"}"#))
            .expect_err("error response");
        assert_eq!(err.kind(), &TestErrorKind::Unhandled);
        assert_eq!(err.code(), Some("TotallyUnknownException"));
        assert_eq!(err.status().as_u16(), 400);
        assert_eq!(err.body().as_ref(), br#"{"__type":"TotallyUnknownException"}"#);
    }

    #[test]
    fn malformed_success_body_is_unhandled() {
        let err = JsonResponseHandler::<GetThing>::new()
            .parse(&response(200, r#"{"ThingId":5}"#))
            .expect_err("type mismatch");
        assert_eq!(err.kind(), &TestErrorKind::Unhandled);
        assert_eq!(err.status().as_u16(), 200);
        assert_eq!(err.request_id(), None);
        assert!(err.source().is_some());
    }

    #[test]
    fn malformed_success_body_keeps_request_id() {
        let mut resp = response(200, "not json");
        resp.headers_mut()
            .insert("x-amzn-requestid", "c5e2d4b0-49d3".parse().unwrap());
        let err = JsonResponseHandler::<GetThing>::new()
            .parse(&resp)
            .expect_err("malformed body");
        assert_eq!(err.kind(), &TestErrorKind::Unhandled);
        assert_eq!(err.request_id(), Some("c5e2d4b0-49d3"));
        assert_eq!(err.code(), None);
        assert_eq!(err.body().as_ref(), b"not json");
    }
}
