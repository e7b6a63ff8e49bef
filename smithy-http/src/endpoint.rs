/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use http::uri::{Authority, InvalidUri, PathAndQuery, Scheme};
use http::Uri;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// API Endpoint
///
/// This implements an API endpoint as specified in the
/// [Smithy Endpoint Specification](https://awslabs.github.io/smithy/1.0/spec/core/endpoint-traits.html)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    uri: http::Uri,
}

#[derive(Debug)]
pub enum EndpointError {
    /// The endpoint has no scheme or no authority
    NotAbsolute(Uri),
    InvalidPath(InvalidUri),
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::NotAbsolute(uri) => {
                write!(f, "endpoint `{}` must include a scheme and a host", uri)
            }
            EndpointError::InvalidPath(err) => write!(f, "invalid endpoint path: {}", err),
        }
    }
}

impl Error for EndpointError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EndpointError::InvalidPath(err) => Some(err),
            _ => None,
        }
    }
}

impl Endpoint {
    /// Create a new immutable endpoint
    ///
    /// The scheme and host of requests are replaced with those of `uri`. A path on the endpoint
    /// is prepended to the path of the request.
    pub fn immutable(uri: Uri) -> Self {
        Endpoint { uri }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Rewrites `uri` to point at this endpoint
    pub fn set_endpoint(&self, uri: &mut http::Uri) -> Result<(), EndpointError> {
        let (scheme, authority) = self.scheme_and_authority()?;
        let path = merge_paths(&self.uri, uri);
        let path_and_query =
            PathAndQuery::try_from(path.as_ref()).map_err(EndpointError::InvalidPath)?;
        let mut parts = http::uri::Parts::default();
        parts.scheme = Some(scheme);
        parts.authority = Some(authority);
        parts.path_and_query = Some(path_and_query);
        *uri = Uri::from_parts(parts).map_err(|_| EndpointError::NotAbsolute(self.uri.clone()))?;
        Ok(())
    }

    fn scheme_and_authority(&self) -> Result<(Scheme, Authority), EndpointError> {
        match (self.uri.scheme(), self.uri.authority()) {
            (Some(scheme), Some(authority)) => Ok((scheme.clone(), authority.clone())),
            _ => Err(EndpointError::NotAbsolute(self.uri.clone())),
        }
    }
}

fn merge_paths<'a>(endpoint: &'a Uri, uri: &'a Uri) -> std::borrow::Cow<'a, str> {
    if let Some(query) = endpoint.path_and_query().and_then(|pq| pq.query()) {
        tracing::warn!(query = %query, "query specified in endpoint will be ignored during endpoint resolution");
    }
    let endpoint_path = endpoint.path();
    let uri_path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("");
    if endpoint_path.is_empty() || endpoint_path == "/" {
        if uri_path_and_query.is_empty() {
            std::borrow::Cow::Borrowed("/")
        } else {
            std::borrow::Cow::Borrowed(uri_path_and_query)
        }
    } else {
        let ep_no_slash = endpoint_path.strip_suffix('/').unwrap_or(endpoint_path);
        let uri_path_no_slash = uri_path_and_query
            .strip_prefix('/')
            .unwrap_or(uri_path_and_query);
        std::borrow::Cow::Owned(format!("{}/{}", ep_no_slash, uri_path_no_slash))
    }
}

#[cfg(test)]
mod test {
    use crate::endpoint::Endpoint;
    use http::Uri;

    #[test]
    fn endpoint_replaces_scheme_and_host() {
        let ep = Endpoint::immutable(Uri::from_static("http://localhost:8000"));
        let mut uri = Uri::from_static("/");
        ep.set_endpoint(&mut uri).expect("valid endpoint");
        assert_eq!(uri, Uri::from_static("http://localhost:8000/"));
    }

    #[test]
    fn endpoint_paths_are_prefixed() {
        let ep = Endpoint::immutable(Uri::from_static("https://proxy.example.com/kms/"));
        let mut uri = Uri::from_static("/");
        ep.set_endpoint(&mut uri).expect("valid endpoint");
        assert_eq!(uri, Uri::from_static("https://proxy.example.com/kms/"));
    }

    #[test]
    fn relative_endpoints_are_rejected() {
        let ep = Endpoint::immutable(Uri::from_static("/just/a/path"));
        let mut uri = Uri::from_static("/");
        assert!(ep.set_endpoint(&mut uri).is_err());
    }
}
