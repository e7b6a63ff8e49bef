/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::KmsError;
use crate::input::*;
use crate::operation::{make_operation, TrentService};
use crate::output::*;
use async_trait::async_trait;
use aws_auth::Credentials;
use aws_http::json::JsonOperation;
use aws_hyper::conn::Standard;
use aws_hyper::SdkError;
use smithy_http::body::SdkBody;
use std::error::Error;
use std::sync::Arc;
use tower::Service;

type BoxError = Box<dyn Error + Send + Sync>;

/// KMS client
///
/// Cloning is cheap: clones share the connection and the configuration. A single client may be
/// used from many tasks at once.
#[derive(Clone, Debug)]
pub struct Client<C = Standard> {
    client: aws_hyper::Client<C>,
    config: Arc<Config>,
}

impl Client<Standard> {
    /// A client sending requests over HTTPS
    pub fn from_conf(config: Config) -> Self {
        Self::from_conf_conn(config, Standard::https())
    }
}

impl<C> Client<C> {
    /// A client sending requests through `conn`, eg. an `aws_hyper` `TestConnection`
    pub fn from_conf_conn(config: Config, conn: C) -> Self {
        Client {
            client: aws_hyper::Client::new(conn),
            config: Arc::new(config),
        }
    }

    pub fn conf(&self) -> &Config {
        &self.config
    }
}

impl<C> Client<C>
where
    C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
        + Send
        + Sync
        + Clone
        + 'static,
    C::Error: Into<BoxError> + Send + Sync + 'static,
    C::Future: Send + 'static,
{
    /// Send a single operation
    pub async fn send<O>(&self, input: O::Input) -> Result<O::Output, SdkError<KmsError>>
    where
        O: JsonOperation<Service = TrentService>,
    {
        self.send_inner::<O>(input, None).await
    }

    /// Send a single operation signed with `credentials`
    ///
    /// The configured credentials provider is not consulted.
    pub async fn send_with_credentials<O>(
        &self,
        input: O::Input,
        credentials: Credentials,
    ) -> Result<O::Output, SdkError<KmsError>>
    where
        O: JsonOperation<Service = TrentService>,
    {
        self.send_inner::<O>(input, Some(credentials)).await
    }

    async fn send_inner<O>(
        &self,
        input: O::Input,
        credentials: Option<Credentials>,
    ) -> Result<O::Output, SdkError<KmsError>>
    where
        O: JsonOperation<Service = TrentService>,
    {
        let mut operation = make_operation::<O>(&input, &self.config)
            .map_err(|err| SdkError::ConstructionFailure(err.into()))?;
        if let Some(credentials) = credentials {
            aws_auth::set_credentials(operation.properties_mut(), credentials);
        }
        self.client.call(operation).await
    }
}

macro_rules! define_client {
    ($($op:ident($input:ident) -> $output:ident => $method:ident;)+) => {
        /// The KMS API
        ///
        /// Each method sends exactly one request. Nothing is retried: use
        /// [`retryable_error_kind`](smithy_types::retry::ProvideErrorKind::retryable_error_kind)
        /// on the error to decide whether to try again.
        #[async_trait]
        pub trait Kms {
            $(
                async fn $method(&self, input: $input) -> Result<$output, SdkError<KmsError>>;
            )+
        }

        #[async_trait]
        impl<C> Kms for Client<C>
        where
            C: Service<http::Request<SdkBody>, Response = http::Response<SdkBody>>
                + Send
                + Sync
                + Clone
                + 'static,
            C::Error: Into<BoxError> + Send + Sync + 'static,
            C::Future: Send + 'static,
        {
            $(
                async fn $method(&self, input: $input) -> Result<$output, SdkError<KmsError>> {
                    self.send::<crate::operation::$op>(input).await
                }
            )+
        }
    };
}

kms_operations!(define_client);
