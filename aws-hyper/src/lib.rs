/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod conn;
#[cfg(feature = "test-util")]
pub mod test_connection;

use aws_auth::middleware::CredentialsLayer;
use aws_endpoint::AwsEndpointStage;
use aws_sig_auth::middleware::SigV4SigningStage;
use aws_sig_auth::signer::SigV4Signer;
use smithy_http::body::SdkBody;
use smithy_http::operation::Operation;
use smithy_http::response::ParseHttpResponse;
pub use smithy_http::result::{SdkError, SdkSuccess};
use smithy_http_tower::dispatch::DispatchLayer;
use smithy_http_tower::map_request::MapRequestLayer;
use smithy_http_tower::parse_response::ParseResponseLayer;
use std::error::Error;
use std::time::Instant;
use tower::{Service, ServiceBuilder, ServiceExt};
use tracing::{debug, debug_span, Instrument};

type BoxError = Box<dyn Error + Send + Sync>;

/// AWS Service Client
///
/// Hyper-based AWS Service Client. Most users will want to use the `https()` constructor.
/// Any tower service mapping `http::Request<SdkBody>` to `http::Response<SdkBody>` can be used as
/// the connection, for example a [`TestConnection`](test_connection::TestConnection).
///
/// Every call runs the operation through the following stack:
/// 1. endpoint resolution
/// 2. credential loading (a failure stops the call before anything is sent)
/// 3. SigV4 signing
/// 4. dispatch through the connection, without retries
/// 5. response parsing
///
/// The client holds no mutable state: clones share the connection and concurrent calls are
/// independent.
#[derive(Clone, Debug)]
pub struct Client<S> {
    inner: S,
}

impl<S> Client<S> {
    /// Construct a new `Client` with a custom connector
    pub fn new(connector: S) -> Self {
        Client { inner: connector }
    }
}

#[cfg(feature = "rustls")]
impl Client<conn::Standard> {
    /// Construct an `https` based client
    pub fn https() -> Self {
        Client {
            inner: conn::Standard::https(),
        }
    }
}

impl<S> Client<S>
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
        + Send
        + Clone
        + 'static,
    S::Error: Into<BoxError> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    /// Dispatch this request to the network
    ///
    /// For ergonomics, this does not include the raw response for successful responses. To
    /// access the raw response use `call_raw`.
    pub async fn call<O, T, E>(&self, input: Operation<O>) -> Result<T, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Error + Send + 'static,
    {
        self.call_raw(input).await.map(|res| res.parsed)
    }

    /// Dispatch this request to the network
    ///
    /// The returned result contains the raw HTTP response which can be useful for debugging or implementing
    /// unsupported features.
    pub async fn call_raw<O, T, E>(
        &self,
        input: Operation<O>,
    ) -> Result<SdkSuccess<T>, SdkError<E>>
    where
        O: ParseHttpResponse<SdkBody, Output = Result<T, E>> + Send + Sync + 'static,
        T: Send + 'static,
        E: Error + Send + 'static,
    {
        let (operation, service) = match input.metadata() {
            Some(metadata) => (metadata.name().to_string(), metadata.service().to_string()),
            None => (String::from("unknown"), String::from("unknown")),
        };
        let span = debug_span!("send_operation", operation = %operation, service = %service);
        let signer = MapRequestLayer::for_mapper(SigV4SigningStage::new(SigV4Signer::new()));
        let endpoint_resolver = MapRequestLayer::for_mapper(AwsEndpointStage);
        let inner = self.inner.clone();
        let svc = ServiceBuilder::new()
            .layer(ParseResponseLayer::<O>::new())
            .layer(endpoint_resolver)
            .layer(CredentialsLayer::new())
            .layer(signer)
            .layer(DispatchLayer::new())
            .service(inner);
        let start = Instant::now();
        let result = svc.oneshot(input).instrument(span.clone()).await;
        match &result {
            Ok(_) => debug!(parent: &span, client_execute_time = ?start.elapsed(), "operation succeeded"),
            Err(err) => debug!(
                parent: &span,
                client_execute_time = ?start.elapsed(),
                error = %err,
                "operation failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod static_tests {
    use crate::conn::Standard;
    use crate::Client;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn client_is_send_sync() {
        assert_send_sync::<Client<Standard>>();
    }
}
