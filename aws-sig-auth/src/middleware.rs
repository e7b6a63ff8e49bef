/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::signer::{OperationSigningConfig, RequestConfig, SigV4Signer, SigningError};
use aws_auth::Credentials;
use aws_types::region::SigningRegion;
use aws_types::SigningService;
use smithy_http::middleware::MapRequest;
use smithy_http::operation::Request;
use smithy_http::property_bag::PropertyBag;
use std::time::SystemTime;
use thiserror::Error;

/// Middleware stage to sign requests with SigV4
///
/// SigV4SigningStage will load configuration from the request property bag and add
/// a signature.
///
/// Prior to signing, the following fields MUST be present in the property bag:
/// - [`SigningRegion`](SigningRegion): The region used when signing the request, eg. `us-east-1`
/// - [`SigningService`](SigningService): The name of the service to use when signing the request, eg. `kms`
/// - [`Credentials`](Credentials): Credentials to sign with, placed there by the
///   [`CredentialsStage`](aws_auth::middleware::CredentialsStage)
/// - [`OperationSigningConfig`](OperationSigningConfig): Operation specific signing configuration
/// If any of these fields are missing, the middleware will return an error.
///
/// The following fields MAY be present in the property bag:
/// - [`SystemTime`](SystemTime): The timestamp to use when signing the request. If this field is not present
///   [`SystemTime::now`](SystemTime::now) will be used.
#[derive(Clone, Debug)]
pub struct SigV4SigningStage {
    signer: SigV4Signer,
}

impl SigV4SigningStage {
    pub fn new(signer: SigV4Signer) -> Self {
        Self { signer }
    }
}

#[derive(Debug, Error)]
pub enum SigningStageError {
    #[error("No credentials in the property bag")]
    MissingCredentials,
    #[error("No signing region in the property bag")]
    MissingSigningRegion,
    #[error("No signing service in the property bag")]
    MissingSigningService,
    #[error("No signing configuration in the property bag")]
    MissingSigningConfig,
    #[error("The request body could not be signed by this configuration")]
    InvalidBodyType,
    #[error("Signing failed")]
    SigningFailure(#[from] SigningError),
}

/// Extract a signing config from a [`PropertyBag`](smithy_http::property_bag::PropertyBag)
fn signing_config(
    config: &PropertyBag,
) -> Result<(&OperationSigningConfig, RequestConfig, &Credentials), SigningStageError> {
    let operation_config = config
        .get::<OperationSigningConfig>()
        .ok_or(SigningStageError::MissingSigningConfig)?;
    let credentials = config
        .get::<Credentials>()
        .ok_or(SigningStageError::MissingCredentials)?;
    let region = config
        .get::<SigningRegion>()
        .ok_or(SigningStageError::MissingSigningRegion)?;
    let signing_service = config
        .get::<SigningService>()
        .ok_or(SigningStageError::MissingSigningService)?;
    let request_config = RequestConfig {
        request_ts: config
            .get::<SystemTime>()
            .copied()
            .unwrap_or_else(SystemTime::now),
        region,
        service: signing_service,
    };
    Ok((operation_config, request_config, credentials))
}

impl MapRequest for SigV4SigningStage {
    type Error = SigningStageError;

    fn apply(&self, req: Request) -> Result<Request, Self::Error> {
        req.augment(|req, config| {
            let (operation_config, request_config, creds) = signing_config(config)?;

            // Only strict bodies backed by `Bytes` can be hashed. Streams would need a different
            // signing mode.
            let (parts, body) = req.into_parts();
            let signable_body = body.bytes().ok_or(SigningStageError::InvalidBodyType)?;
            let mut signable_request = http::Request::from_parts(parts, signable_body);

            self.signer.sign(
                operation_config,
                &request_config,
                creds,
                &mut signable_request,
            )?;
            let (signed_parts, _) = signable_request.into_parts();
            Ok(http::Request::from_parts(signed_parts, body))
        })
    }
}

#[cfg(test)]
mod test {
    use crate::middleware::{SigV4SigningStage, SigningStageError};
    use crate::signer::{OperationSigningConfig, SigV4Signer};
    use aws_auth::Credentials;
    use aws_endpoint::{set_endpoint_resolver, AwsEndpointStage, DefaultAwsEndpointResolver};
    use aws_types::region::Region;
    use aws_types::SigningService;
    use http::header::AUTHORIZATION;
    use smithy_http::body::SdkBody;
    use smithy_http::middleware::MapRequest;
    use smithy_http::operation;
    use std::sync::Arc;
    use std::time::{Duration, UNIX_EPOCH};

    fn request() -> operation::Request {
        let req = http::Request::builder()
            .method("POST")
            .uri("/")
            .body(SdkBody::from("{}"))
            .unwrap();
        operation::Request::new(req)
    }

    // check that the endpoint middleware followed by signing middleware produce the expected result
    #[test]
    fn endpoint_plus_signer() {
        let mut req = request();
        {
            let props = req.properties_mut();
            props.insert(Region::new("us-east-1"));
            props.insert(UNIX_EPOCH + Duration::new(1611160427, 0));
            props.insert(SigningService::from_static("kms"));
            props.insert(OperationSigningConfig::default_config());
            props.insert(Credentials::from_keys("AKIAfoo", "bar", None));
            set_endpoint_resolver(props, Arc::new(DefaultAwsEndpointResolver::for_service("kms")));
        }
        let req = AwsEndpointStage
            .apply(req)
            .expect("endpoint stage should succeed");
        let signer = SigV4SigningStage::new(SigV4Signer::new());
        let req = signer.apply(req).expect("signing succeeded");
        let (req, _) = req.into_parts();
        let auth = req
            .headers()
            .get(AUTHORIZATION)
            .expect("auth header must be present")
            .to_str()
            .unwrap();
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIAfoo/20210120/us-east-1/kms/aws4_request"
        ));
        assert_eq!(req.headers()["x-amz-date"], "20210120T163347Z");
        assert_eq!(req.body().bytes(), Some(&b"{}"[..]));
    }

    #[test]
    fn missing_credentials_fail_signing() {
        let mut req = request();
        {
            let props = req.properties_mut();
            props.insert(aws_types::region::SigningRegion::from_static("us-east-1"));
            props.insert(SigningService::from_static("kms"));
            props.insert(OperationSigningConfig::default_config());
        }
        let err = SigV4SigningStage::new(SigV4Signer::new())
            .apply(req)
            .expect_err("no credentials");
        assert!(matches!(err, SigningStageError::MissingCredentials));
    }

    #[test]
    fn streaming_bodies_are_rejected() {
        let stream = hyper_body();
        let mut req = operation::Request::new(
            http::Request::builder()
                .uri("https://kms.us-east-1.amazonaws.com/")
                .body(stream)
                .unwrap(),
        );
        {
            let props = req.properties_mut();
            props.insert(aws_types::region::SigningRegion::from_static("us-east-1"));
            props.insert(SigningService::from_static("kms"));
            props.insert(OperationSigningConfig::default_config());
            props.insert(Credentials::from_keys("AKIAfoo", "bar", None));
        }
        let err = SigV4SigningStage::new(SigV4Signer::new())
            .apply(req)
            .expect_err("streams cannot be signed");
        assert!(matches!(err, SigningStageError::InvalidBodyType));
    }

    fn hyper_body() -> SdkBody {
        SdkBody::from(hyper::Body::from("streaming"))
    }
}
