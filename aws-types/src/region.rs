/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// An AWS region, eg. `us-east-1`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region(Cow<'static, str>);

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Region {
    pub fn new(region: impl Into<Cow<'static, str>>) -> Self {
        Self(region.into())
    }

    pub const fn from_static(region: &'static str) -> Self {
        Self(Cow::Borrowed(region))
    }
}

/// Region used when neither the client configuration nor the environment names one
pub const FALLBACK_REGION: Region = Region::from_static("us-east-1");

/// Provide a [`Region`](Region) to use with AWS requests
pub trait ProvideRegion: Send + Sync {
    fn region(&self) -> Option<Region>;
}

impl ProvideRegion for Region {
    fn region(&self) -> Option<Region> {
        Some(self.clone())
    }
}

impl ProvideRegion for Option<Region> {
    fn region(&self) -> Option<Region> {
        self.clone()
    }
}

/// The region source of clients built without an explicit region
pub fn default_provider() -> impl ProvideRegion {
    EnvironmentProvider::new()
}

const REGION_VARIABLES: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION"];

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Load a region from `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
///
/// Variables set to an empty string are skipped.
#[derive(Clone)]
pub struct EnvironmentProvider {
    lookup: Lookup,
}

impl EnvironmentProvider {
    /// Read the environment of the process
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Read variables through `lookup` instead of the process environment
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        EnvironmentProvider {
            lookup: Arc::new(lookup),
        }
    }

    /// Read variables from a fixed set, eg. in tests
    ///
    /// ```rust
    /// use aws_types::region::{EnvironmentProvider, ProvideRegion, Region};
    /// let provider = EnvironmentProvider::from_vars(&[("AWS_DEFAULT_REGION", "eu-west-1")]);
    /// assert_eq!(provider.region(), Some(Region::new("eu-west-1")));
    /// ```
    pub fn from_vars(vars: &[(&str, &str)]) -> Self {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self::with_lookup(move |name| vars.get(name).cloned())
    }
}

impl Default for EnvironmentProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvironmentProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentProvider").finish()
    }
}

impl ProvideRegion for EnvironmentProvider {
    fn region(&self) -> Option<Region> {
        let region = REGION_VARIABLES
            .iter()
            .filter_map(|name| (self.lookup)(name))
            .find(|value| !value.is_empty())
            .map(Region::new);
        tracing::trace!(region = ?region, "loaded region from the environment");
        region
    }
}

/// The region to use when signing requests
///
/// Usually the region of the request, unless the endpoint names another credential scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningRegion(Cow<'static, str>);

impl AsRef<str> for SigningRegion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Region> for SigningRegion {
    fn from(region: Region) -> Self {
        SigningRegion(region.0)
    }
}

impl SigningRegion {
    pub fn from_static(region: &'static str) -> Self {
        SigningRegion(Cow::Borrowed(region))
    }
}

#[cfg(test)]
mod test {
    use crate::region::{EnvironmentProvider, ProvideRegion, Region, SigningRegion};

    #[test]
    fn no_region() {
        let provider = EnvironmentProvider::from_vars(&[]);
        assert_eq!(provider.region(), None);
    }

    #[test]
    fn prefers_aws_region() {
        let provider = EnvironmentProvider::from_vars(&[
            ("AWS_REGION", "us-east-1"),
            ("AWS_DEFAULT_REGION", "us-east-2"),
        ]);
        assert_eq!(provider.region(), Some(Region::new("us-east-1")));
    }

    #[test]
    fn falls_back_to_default_region() {
        let provider = EnvironmentProvider::from_vars(&[("AWS_DEFAULT_REGION", "us-east-2")]);
        assert_eq!(provider.region(), Some(Region::new("us-east-2")));
    }

    #[test]
    fn empty_variables_are_skipped() {
        let provider = EnvironmentProvider::from_vars(&[
            ("AWS_REGION", ""),
            ("AWS_DEFAULT_REGION", "ap-south-1"),
        ]);
        assert_eq!(provider.region(), Some(Region::new("ap-south-1")));
    }

    #[test]
    fn custom_lookup() {
        let provider = EnvironmentProvider::with_lookup(|name| {
            if name == "AWS_REGION" {
                Some("sa-east-1".to_string())
            } else {
                None
            }
        });
        assert_eq!(provider.region(), Some(Region::new("sa-east-1")));
    }

    #[test]
    fn signing_region_from_region() {
        assert_eq!(
            SigningRegion::from(Region::from_static("eu-west-1")),
            SigningRegion::from_static("eu-west-1")
        );
    }
}
