/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Service errors returned by AWS JSON protocols

use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;
use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error returned by the service
///
/// `kind` is looked up from the error code in the error registry of the service. Codes that are
/// not registered yield the `Unhandled` kind of the service; the status and raw body of the
/// response are always preserved.
#[derive(Debug)]
pub struct ServiceError<K> {
    kind: K,
    meta: smithy_types::Error,
    status: StatusCode,
    body: Bytes,
    source: Option<BoxError>,
}

impl<K> ServiceError<K> {
    pub fn new(kind: K, meta: smithy_types::Error, status: StatusCode, body: Bytes) -> Self {
        ServiceError {
            kind,
            meta,
            status,
            body,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn into_kind(self) -> K {
        self.kind
    }

    /// Generic error metadata: code, message and request id
    pub fn meta(&self) -> &smithy_types::Error {
        &self.meta
    }

    pub fn code(&self) -> Option<&str> {
        self.meta.code()
    }

    pub fn message(&self) -> Option<&str> {
        self.meta.message()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.meta.request_id()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The raw body of the response
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

impl<K> Display for ServiceError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code)?,
            None => write!(f, "unhandled error (HTTP {})", self.status)?,
        }
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl<K> Error for ServiceError<K>
where
    K: Debug,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as _)
    }
}

impl<K> ProvideErrorKind for ServiceError<K>
where
    K: ProvideErrorKind,
{
    fn retryable_error_kind(&self) -> Option<ErrorKind> {
        self.kind
            .retryable_error_kind()
            .or_else(|| crate::classify(self.code(), self.status))
    }

    fn code(&self) -> Option<&str> {
        self.meta.code()
    }
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(rename = "__type")]
    type_: Option<String>,
    code: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    message_upper: Option<String>,
}

/// Strips namespaces (`aws.protocols#`) and URL suffixes (`:http://...`) from an error code
pub fn sanitize_error_code(error_code: &str) -> &str {
    // Trim a trailing URL from the error code, beginning with a `:`
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };

    // Trim a prefixing namespace from the error code, beginning with a `#`
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

/// Request id the service assigned to `response`, from the `x-amzn-requestid` header
pub fn request_id(response: &http::Response<Bytes>) -> Option<&str> {
    response
        .headers()
        .get("x-amzn-requestid")
        .and_then(|value| value.to_str().ok())
}

/// Extract the generic error metadata from an AWS JSON error response
///
/// The code comes from the `x-amzn-errortype` header, or else the `__type` or `code` field of the
/// body. A body that is not a JSON object yields no code and no message.
pub fn parse_generic_error(response: &http::Response<Bytes>) -> smithy_types::Error {
    let body: ErrorBody = serde_json::from_slice(response.body()).unwrap_or_default();
    let code = response
        .headers()
        .get("x-amzn-errortype")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or(body.type_)
        .or(body.code);
    smithy_types::Error {
        code: code.map(|code| sanitize_error_code(&code).to_string()),
        message: body.message.or(body.message_upper),
        request_id: request_id(response).map(str::to_string),
    }
}

#[cfg(test)]
mod test {
    use crate::error::{parse_generic_error, sanitize_error_code, ServiceError};
    use bytes::Bytes;
    use http::StatusCode;
    use std::error::Error;

    fn response(body: &'static str) -> http::Response<Bytes> {
        http::Response::builder()
            .status(400)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
    }

    #[test]
    fn error_codes_are_sanitized() {
        assert_eq!(sanitize_error_code("aws.protocoltests.restjson#FooError"), "FooError");
        assert_eq!(
            sanitize_error_code("FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/"),
            "FooError"
        );
        assert_eq!(
            sanitize_error_code(
                "aws.protocoltests.restjson#FooError:http://internal.amazon.com/coral/com.amazon.coral.validate/"
            ),
            "FooError"
        );
        assert_eq!(sanitize_error_code("FooError"), "FooError");
    }

    #[test]
    fn code_and_message_from_body() {
        let err = parse_generic_error(&response(
            r#"{"__type":"com.amazonaws.kms#NotFoundException","message":"x"}"#,
        ));
        assert_eq!(err.code(), Some("NotFoundException"));
        assert_eq!(err.message(), Some("x"));
        assert_eq!(err.request_id(), None);
    }

    #[test]
    fn header_takes_precedence() {
        let mut resp = response(r#"{"__type":"BodyError","Message":"upper"}"#);
        resp.headers_mut()
            .insert("x-amzn-errortype", "HeaderError:http://foo".parse().unwrap());
        resp.headers_mut()
            .insert("x-amzn-requestid", "1234".parse().unwrap());
        let err = parse_generic_error(&resp);
        assert_eq!(err.code(), Some("HeaderError"));
        assert_eq!(err.message(), Some("upper"));
        assert_eq!(err.request_id(), Some("1234"));
    }

    #[test]
    fn code_field_is_a_fallback() {
        let err = parse_generic_error(&response(r#"{"code":"LegacyError"}"#));
        assert_eq!(err.code(), Some("LegacyError"));
    }

    #[test]
    fn garbage_bodies_yield_empty_metadata() {
        let err = parse_generic_error(&response("<html>bad gateway</html>"));
        assert_eq!(err, smithy_types::Error::default());
    }

    #[test]
    fn display_service_error() {
        let meta = smithy_types::Error {
            code: Some("NotFoundException".to_string()),
            message: Some("no such key".to_string()),
            request_id: None,
        };
        let err = ServiceError::new((), meta, StatusCode::BAD_REQUEST, Bytes::new());
        assert_eq!(format!("{}", err), "NotFoundException: no such key");
        assert!(err.source().is_none());

        let unhandled = ServiceError::new(
            (),
            smithy_types::Error::default(),
            StatusCode::BAD_GATEWAY,
            Bytes::new(),
        );
        assert_eq!(format!("{}", unhandled), "unhandled error (HTTP 502 Bad Gateway)");
    }
}
