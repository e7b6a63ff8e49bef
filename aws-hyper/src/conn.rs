/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::BoxError;
#[cfg(feature = "rustls")]
use hyper::client::{HttpConnector, ResponseFuture};
use smithy_http::body::SdkBody;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;

#[cfg(feature = "rustls")]
type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

type BoxFuture = Pin<Box<dyn Future<Output = Result<http::Response<SdkBody>, BoxError>> + Send>>;

/// A good base connection type for most use cases
///
/// This supports two options:
/// 1. HTTPS through hyper and rustls
/// 2. Any implementation of the `HttpService` trait, eg. a [`TestConnection`](crate::test_connection::TestConnection)
#[derive(Clone)]
pub struct Standard(Connector);

enum Connector {
    #[cfg(feature = "rustls")]
    Https(hyper::Client<HttpsConnector, SdkBody>),
    Dyn(Box<dyn HttpService>),
}

impl Clone for Connector {
    fn clone(&self) -> Self {
        match self {
            #[cfg(feature = "rustls")]
            Connector::Https(client) => Connector::Https(client.clone()),
            Connector::Dyn(box_conn) => Connector::Dyn(box_conn.clone()),
        }
    }
}

impl Standard {
    /// An HTTPS connection using the native root certificates
    ///
    /// Plain HTTP is also accepted so that local endpoints can be used.
    #[cfg(feature = "rustls")]
    pub fn https() -> Self {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();
        Standard(Connector::Https(
            hyper::Client::builder().build::<_, SdkBody>(https),
        ))
    }

    /// Erase the type of any connection
    pub fn new(conn: impl HttpService + 'static) -> Self {
        Standard(Connector::Dyn(Box::new(conn)))
    }
}

impl Clone for Box<dyn HttpService> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// An object safe HTTP connection
///
/// Implemented for every `Clone` tower service mapping `http::Request<SdkBody>` to
/// `http::Response<SdkBody>`.
pub trait HttpService: Send + Sync {
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>>;
    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture;
    fn clone_box(&self) -> Box<dyn HttpService>;
}

impl<S> HttpService for S
where
    S: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Error: Into<BoxError> + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), BoxError>> {
        Service::poll_ready(self, cx).map_err(|err| err.into())
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> BoxFuture {
        let fut = Service::call(self, req);
        Box::pin(async move { fut.await.map_err(|err| err.into()) })
    }

    fn clone_box(&self) -> Box<dyn HttpService> {
        Box::new(self.clone())
    }
}

impl Service<http::Request<SdkBody>> for Standard {
    type Response = http::Response<SdkBody>;
    type Error = BoxError;
    type Future = StandardFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        match &mut self.0 {
            #[cfg(feature = "rustls")]
            Connector::Https(_) => Poll::Ready(Ok(())),
            Connector::Dyn(conn) => HttpService::poll_ready(&mut **conn, cx),
        }
    }

    fn call(&mut self, req: http::Request<SdkBody>) -> Self::Future {
        match &mut self.0 {
            #[cfg(feature = "rustls")]
            Connector::Https(https) => StandardFuture::Https(https.request(req)),
            Connector::Dyn(conn) => StandardFuture::Dyn(HttpService::call(&mut **conn, req)),
        }
    }
}

#[pin_project::pin_project(project = FutProj)]
pub enum StandardFuture {
    #[cfg(feature = "rustls")]
    Https(#[pin] ResponseFuture),
    Dyn(#[pin] BoxFuture),
}

impl Future for StandardFuture {
    type Output = Result<http::Response<SdkBody>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            #[cfg(feature = "rustls")]
            FutProj::Https(fut) => fut
                .poll(cx)
                .map_ok(|response| response.map(SdkBody::from))
                .map_err(|err| err.into()),
            FutProj::Dyn(dyn_fut) => dyn_fut.poll(cx),
        }
    }
}
