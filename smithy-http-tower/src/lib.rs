/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

pub mod dispatch;
pub mod map_request;
pub mod parse_response;

use smithy_http::result::SdkError;
use thiserror::Error;
use tower::BoxError;

/// An Error Occurred During the process of sending an Operation
///
/// The variants are split to enable the final [SdkError](`smithy_http::result::SdkError`) to differentiate
/// between three types of errors:
/// 1. `RequestConstructionError`: Errors where construction of the request failed, eg. endpoint
///    resolution or signing failed.
/// 2. `RequestCredentialsError`: Credentials could not be loaded. The request was never sent.
/// 3. `RequestDispatchError`: Errors where the connector returned an error while dispatching.
#[derive(Debug, Error)]
pub enum SendOperationError {
    /// The request could not be constructed
    ///
    /// These errors usually stem from configuration issues (eg. no region or endpoint)
    #[error("the request could not be constructed: {0}")]
    RequestConstructionError(BoxError),

    /// Credentials could not be loaded
    #[error("credentials could not be loaded: {0}")]
    RequestCredentialsError(BoxError),

    /// The request could not be dispatched
    #[error("the request could not be dispatched: {0}")]
    RequestDispatchError(BoxError),
}

/// Convert a `SendOperationError` into an `SdkError`
impl<E> From<SendOperationError> for SdkError<E> {
    fn from(err: SendOperationError) -> Self {
        match err {
            SendOperationError::RequestConstructionError(e) => SdkError::ConstructionFailure(e),
            SendOperationError::RequestCredentialsError(e) => SdkError::CredentialsFailure(e),
            SendOperationError::RequestDispatchError(e) => SdkError::DispatchFailure(e),
        }
    }
}
