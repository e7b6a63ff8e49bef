/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_auth::{CredentialsError, ProvideCredentials, SharedCredentialsProvider};
use aws_endpoint::{
    set_endpoint_resolver, AwsEndpointResolver, DefaultAwsEndpointResolver, ResolveAwsEndpoint,
};
use aws_sig_auth::signer::OperationSigningConfig;
use aws_types::credential::provide_credentials::future;
use aws_types::region::{ProvideRegion, Region, FALLBACK_REGION};
use smithy_http::property_bag::PropertyBag;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Service configuration, shared by every operation built from it
#[derive(Clone)]
pub struct Config {
    pub(crate) region: Region,
    pub(crate) credentials_provider: SharedCredentialsProvider,
    pub(crate) endpoint_resolver: AwsEndpointResolver,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Attach the properties every DynamoDB request needs
    pub(crate) fn apply(&self, properties: &mut PropertyBag) {
        properties.insert(self.region.clone());
        properties.insert(OperationSigningConfig::default_config());
        aws_auth::set_provider(properties, self.credentials_provider.clone());
        set_endpoint_resolver(properties, self.endpoint_resolver.clone());
    }
}

#[derive(Default)]
pub struct Builder {
    region_provider: Option<Box<dyn ProvideRegion>>,
    credentials_provider: Option<SharedCredentialsProvider>,
    endpoint_resolver: Option<AwsEndpointResolver>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source of the region requests are sent to
    ///
    /// When unset, `AWS_REGION` and then `AWS_DEFAULT_REGION` are read from the environment. When
    /// no region is found, requests go to `us-east-1`.
    pub fn region(mut self, region_provider: impl ProvideRegion + 'static) -> Self {
        self.region_provider = Some(Box::new(region_provider));
        self
    }

    pub fn credentials_provider(mut self, provider: impl ProvideCredentials + 'static) -> Self {
        self.credentials_provider = Some(SharedCredentialsProvider::new(provider));
        self
    }

    /// Override the endpoint, eg. to send requests to DynamoDB Local
    pub fn endpoint_resolver(mut self, resolver: impl ResolveAwsEndpoint + 'static) -> Self {
        self.endpoint_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn build(self) -> Config {
        Config {
            region: self
                .region_provider
                .map(|provider| provider.region())
                .unwrap_or_else(|| aws_types::region::default_provider().region())
                .unwrap_or(FALLBACK_REGION),
            credentials_provider: self
                .credentials_provider
                .unwrap_or_else(|| SharedCredentialsProvider::new(NoCredentials)),
            endpoint_resolver: self
                .endpoint_resolver
                .unwrap_or_else(|| Arc::new(DefaultAwsEndpointResolver::for_service("dynamodb"))),
        }
    }
}

/// Provider used when none is configured: every request fails with `CredentialsNotLoaded`
struct NoCredentials;

impl ProvideCredentials for NoCredentials {
    fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
    where
        Self: 'a,
    {
        future::ProvideCredentials::ready(Err(CredentialsError::CredentialsNotLoaded))
    }
}

#[cfg(test)]
mod test {
    use crate::Config;
    use aws_endpoint::{get_endpoint_resolver, ResolveAwsEndpoint};
    use aws_types::region::{EnvironmentProvider, Region};
    use http::Uri;
    use smithy_http::endpoint::Endpoint;
    use smithy_http::property_bag::PropertyBag;

    fn resolved_uri(conf: &Config) -> Uri {
        let mut props = PropertyBag::new();
        conf.apply(&mut props);
        let endpoint = get_endpoint_resolver(&props)
            .expect("resolver set")
            .resolve_endpoint(&Region::new("us-west-2"))
            .expect("valid endpoint");
        endpoint.endpoint().uri().clone()
    }

    #[test]
    fn default_endpoint() {
        let conf = Config::builder().region(Region::new("us-west-2")).build();
        assert_eq!(
            resolved_uri(&conf),
            Uri::from_static("https://dynamodb.us-west-2.amazonaws.com/")
        );
    }

    #[test]
    fn endpoint_override() {
        let conf = Config::builder()
            .region(Region::new("us-west-2"))
            .endpoint_resolver(Endpoint::immutable(Uri::from_static("http://localhost:8000")))
            .build();
        assert_eq!(resolved_uri(&conf), Uri::from_static("http://localhost:8000"));
        assert_eq!(conf.region(), &Region::new("us-west-2"));
    }

    #[test]
    fn region_from_environment() {
        let conf = Config::builder()
            .region(EnvironmentProvider::from_vars(&[("AWS_DEFAULT_REGION", "ap-northeast-1")]))
            .build();
        assert_eq!(conf.region(), &Region::new("ap-northeast-1"));
    }

    #[test]
    fn no_region_falls_back_to_us_east_1() {
        let conf = Config::builder()
            .region(EnvironmentProvider::from_vars(&[]))
            .build();
        assert_eq!(conf.region(), &Region::new("us-east-1"));
        let mut props = PropertyBag::new();
        conf.apply(&mut props);
        assert_eq!(props.get::<Region>(), Some(&Region::new("us-east-1")));
    }
}
