/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::Credentials;
use aws_sigv4::http_request::{
    sign, PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest, SigningParams,
    SigningSettings,
};
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use http::header::HOST;
use std::error::Error;
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("request URI has no authority so the host cannot be signed")]
    MissingAuthority,
    #[error("signing parameters are incomplete")]
    InvalidParams(#[source] BoxError),
    #[error("request could not be signed")]
    Signing(#[source] BoxError),
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum SigningAlgorithm {
    SigV4,
}

/// Signing Configuration for an Operation
///
/// Although these fields MAY be customized on a per request basis, they are generally static
/// for a given operation
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub struct OperationSigningConfig {
    pub algorithm: SigningAlgorithm,
    pub signing_options: SigningOptions,
}

impl OperationSigningConfig {
    /// The signing configuration used by every JSON protocol operation
    pub fn default_config() -> Self {
        OperationSigningConfig {
            algorithm: SigningAlgorithm::SigV4,
            signing_options: SigningOptions {
                double_uri_encode: true,
                content_sha256_header: false,
            },
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub struct SigningOptions {
    pub double_uri_encode: bool,
    pub content_sha256_header: bool,
}

/// Signing Configuration for an individual Request
///
/// These fields may vary on a per-request basis
#[derive(Clone, PartialEq, Eq)]
pub struct RequestConfig<'a> {
    pub request_ts: SystemTime,
    pub region: &'a SigningRegion,
    pub service: &'a SigningService,
}

#[derive(Clone, Default)]
pub struct SigV4Signer {
    _private: (),
}

impl fmt::Debug for SigV4Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigV4Signer").finish()
    }
}

impl SigV4Signer {
    pub fn new() -> Self {
        SigV4Signer { _private: () }
    }

    fn settings(operation_config: &OperationSigningConfig) -> SigningSettings {
        let mut settings = SigningSettings::default();
        settings.percent_encoding_mode = if operation_config.signing_options.double_uri_encode {
            PercentEncodingMode::Double
        } else {
            PercentEncodingMode::Single
        };
        settings.payload_checksum_kind = if operation_config.signing_options.content_sha256_header {
            PayloadChecksumKind::XAmzSha256
        } else {
            PayloadChecksumKind::NoHeader
        };
        settings
    }

    /// Sign a request using the SigV4 Protocol
    ///
    /// `x-amz-date`, `x-amz-security-token` (when the credentials carry a session token) and
    /// `authorization` are added to the request. The returned string is the hex signature.
    ///
    /// Although this function may be used, end users will not typically
    /// interact with this code. It is generally used via middleware in the request pipeline. See [`SigV4SigningStage`](crate::middleware::SigV4SigningStage).
    pub fn sign(
        &self,
        operation_config: &OperationSigningConfig,
        request_config: &RequestConfig<'_>,
        credentials: &Credentials,
        request: &mut http::Request<&[u8]>,
    ) -> Result<String, SigningError> {
        if request.uri().authority().is_none() && !request.headers().contains_key(HOST) {
            return Err(SigningError::MissingAuthority);
        }

        let mut builder = SigningParams::builder()
            .access_key(credentials.access_key_id())
            .secret_key(credentials.secret_access_key())
            .region(request_config.region.as_ref())
            .service_name(request_config.service.as_ref())
            .time(request_config.request_ts)
            .settings(Self::settings(operation_config));
        builder.set_security_token(credentials.session_token());
        let params = builder
            .build()
            .map_err(|err| SigningError::InvalidParams(err.into()))?;

        let (instructions, signature) = {
            let signable = SignableRequest::new(
                request.method(),
                request.uri(),
                request.headers(),
                SignableBody::Bytes(*request.body()),
            );
            sign(signable, &params).map_err(|err| SigningError::Signing(err.into()))?
        }
        .into_parts();
        tracing::trace!(signature = %signature, "signed request");
        instructions.apply_to_request(request);
        Ok(signature)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use http::header::{AUTHORIZATION, USER_AGENT};
    use std::time::{Duration, UNIX_EPOCH};

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn test_time() -> SystemTime {
        // 20150830T123600Z
        UNIX_EPOCH + Duration::from_secs(1440938160)
    }

    fn sign(
        creds: &Credentials,
        service: &'static str,
        req: &mut http::Request<&[u8]>,
    ) -> Result<String, SigningError> {
        let region = SigningRegion::from_static("us-east-1");
        let service = SigningService::from_static(service);
        let request_config = RequestConfig {
            request_ts: test_time(),
            region: &region,
            service: &service,
        };
        SigV4Signer::new().sign(
            &OperationSigningConfig::default_config(),
            &request_config,
            creds,
            req,
        )
    }

    #[test]
    fn get_vanilla() {
        let creds = Credentials::from_keys("AKIDEXAMPLE", SECRET, None);
        let mut req = http::Request::builder()
            .uri("https://example.amazonaws.com/")
            .body(&b""[..])
            .unwrap();
        let signature = sign(&creds, "service", &mut req).expect("signing succeeds");
        assert_eq!(
            signature,
            "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
        assert_eq!(
            req.headers()[AUTHORIZATION],
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
             SignedHeaders=host;x-amz-date, \
             Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
        assert_eq!(req.headers()["x-amz-date"], "20150830T123600Z");
    }

    #[test]
    fn json_post_signs_protocol_headers() {
        let creds = Credentials::from_keys("AKIDEXAMPLE", SECRET, None);
        let mut req = http::Request::builder()
            .method("POST")
            .uri("https://kms.us-east-1.amazonaws.com/")
            .header("content-type", "application/x-amz-json-1.1")
            .header("x-amz-target", "TrentService.ListKeys")
            .header(USER_AGENT, "unsigned")
            .body(&b"{}"[..])
            .unwrap();
        let signature = sign(&creds, "kms", &mut req).expect("signing succeeds");
        let auth = req.headers()[AUTHORIZATION].to_str().unwrap();
        assert!(auth.contains("SignedHeaders=content-type;host;x-amz-date;x-amz-target,"));
        assert!(auth.ends_with(&format!("Signature={}", signature)));
        assert!(req.headers().get("x-amz-content-sha256").is_none());
    }

    #[test]
    fn session_token_is_added() {
        let creds = Credentials::from_keys("AKIDEXAMPLE", SECRET, Some("token".to_string()));
        let mut req = http::Request::builder()
            .uri("https://example.amazonaws.com/")
            .body(&b""[..])
            .unwrap();
        sign(&creds, "service", &mut req).expect("signing succeeds");
        assert_eq!(req.headers()["x-amz-security-token"], "token");
        let auth = req.headers()[AUTHORIZATION].to_str().unwrap();
        assert!(auth.contains("SignedHeaders=host;x-amz-date;x-amz-security-token,"));
    }

    #[test]
    fn relative_uris_cannot_be_signed() {
        let creds = Credentials::from_keys("AKIDEXAMPLE", SECRET, None);
        let mut req = http::Request::builder().uri("/").body(&b""[..]).unwrap();
        let err = sign(&creds, "service", &mut req).expect_err("no host");
        assert!(matches!(err, SigningError::MissingAuthority));
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }
}
