/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::{Credentials, ProvideCredentials, SharedCredentialsProvider};
use smithy_http::operation;
use smithy_http_tower::SendOperationError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;
use thiserror::Error;
use tower::{Layer, Service};
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum CredentialsStageError {
    #[error("No credentials provider in the property bag")]
    MissingCredentialsProvider,
}

/// Middleware stage that loads credentials from a [`SharedCredentialsProvider`] into the property bag
///
/// Unlike most stages, loading credentials is asynchronous so this is a tower `Service` rather
/// than a [`MapRequest`](smithy_http::middleware::MapRequest).
///
/// - If [`Credentials`] are already present in the property bag (request scoped credentials), they
///   are used unchanged and the provider is not consulted.
/// - Otherwise credentials are loaded from the provider and inserted into the property bag.
/// - If the provider fails, the inner service is never called.
#[derive(Clone)]
pub struct CredentialsStage<S> {
    inner: S,
}

impl<S> CredentialsStage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

impl<S> Service<operation::Request> for CredentialsStage<S>
where
    S: Service<operation::Request, Error = SendOperationError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: operation::Request) -> Self::Future {
        // the service that was driven to readiness is the one that must be called
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            if request.properties().get::<Credentials>().is_some() {
                trace!("using request scoped credentials");
                return inner.call(request).await;
            }
            let provider = request
                .properties()
                .get::<SharedCredentialsProvider>()
                .cloned()
                .ok_or_else(|| {
                    SendOperationError::RequestCredentialsError(
                        CredentialsStageError::MissingCredentialsProvider.into(),
                    )
                })?;
            let start = Instant::now();
            let credentials = provider.provide_credentials().await;
            let credentials_time = start.elapsed();
            match credentials {
                Ok(credentials) => {
                    debug!(
                        credentials_time = ?credentials_time,
                        provider = credentials.provider_name(),
                        "loaded credentials"
                    );
                    request.properties_mut().insert(credentials);
                }
                Err(err) => {
                    debug!(credentials_time = ?credentials_time, error = %err, "failed to load credentials");
                    return Err(SendOperationError::RequestCredentialsError(err.into()));
                }
            }
            inner.call(request).await
        })
    }
}

#[derive(Clone, Default)]
pub struct CredentialsLayer;

impl CredentialsLayer {
    pub fn new() -> Self {
        CredentialsLayer
    }
}

impl<S> Layer<S> for CredentialsLayer {
    type Service = CredentialsStage<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CredentialsStage::new(inner)
    }
}
