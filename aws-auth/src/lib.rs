/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod middleware;

pub use aws_types::credential::{
    Credentials, CredentialsError, ProvideCredentials, SharedCredentialsProvider,
};
use smithy_http::property_bag::PropertyBag;

/// Set the credentials provider the [`CredentialsStage`](middleware::CredentialsStage) loads from
pub fn set_provider(bag: &mut PropertyBag, provider: SharedCredentialsProvider) {
    bag.insert(provider);
}

/// Attach credentials to a single request
///
/// Request scoped credentials take precedence over the configured provider, which is then
/// never consulted.
pub fn set_credentials(bag: &mut PropertyBag, credentials: Credentials) {
    bag.insert(credentials);
}

pub fn credentials(bag: &PropertyBag) -> Option<&Credentials> {
    bag.get()
}
