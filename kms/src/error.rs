/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_http::error::ServiceError;
use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Error returned by every KMS operation
///
/// The code, message, request id, status and raw body of the response are available from the
/// [`ServiceError`] itself; [`kind`](ServiceError::kind) identifies the modeled exception.
pub type KmsError = ServiceError<KmsErrorKind>;

/// The exceptions modeled by KMS
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KmsErrorKind {
    AlreadyExists,
    /// The system timed out while trying to fulfill the request. The request can be retried.
    DependencyTimeout,
    Disabled,
    ExpiredImportToken,
    IncorrectKeyMaterial,
    InvalidAliasName,
    InvalidArn,
    /// The ciphertext, encryption context or grant tokens do not match the ones used to encrypt
    InvalidCiphertext,
    InvalidGrantId,
    InvalidGrantToken,
    InvalidImportToken,
    InvalidKeyUsage,
    InvalidMarker,
    KmsInternal,
    /// The state of the CMK is not valid for this request
    KmsInvalidState,
    KeyUnavailable,
    LimitExceeded,
    MalformedPolicyDocument,
    NotFound,
    Tag,
    UnsupportedOperation,
    /// An error code KMS does not model, or a response that could not be parsed
    Unhandled,
}

/// Error codes in registration order
pub(crate) const ERRORS: &[(&str, KmsErrorKind)] = &[
    ("AlreadyExistsException", KmsErrorKind::AlreadyExists),
    ("DependencyTimeoutException", KmsErrorKind::DependencyTimeout),
    ("DisabledException", KmsErrorKind::Disabled),
    ("ExpiredImportTokenException", KmsErrorKind::ExpiredImportToken),
    ("IncorrectKeyMaterialException", KmsErrorKind::IncorrectKeyMaterial),
    ("InvalidAliasNameException", KmsErrorKind::InvalidAliasName),
    ("InvalidArnException", KmsErrorKind::InvalidArn),
    ("InvalidCiphertextException", KmsErrorKind::InvalidCiphertext),
    ("InvalidGrantIdException", KmsErrorKind::InvalidGrantId),
    ("InvalidGrantTokenException", KmsErrorKind::InvalidGrantToken),
    ("InvalidImportTokenException", KmsErrorKind::InvalidImportToken),
    ("InvalidKeyUsageException", KmsErrorKind::InvalidKeyUsage),
    ("InvalidMarkerException", KmsErrorKind::InvalidMarker),
    ("KMSInternalException", KmsErrorKind::KmsInternal),
    ("KMSInvalidStateException", KmsErrorKind::KmsInvalidState),
    ("KeyUnavailableException", KmsErrorKind::KeyUnavailable),
    ("LimitExceededException", KmsErrorKind::LimitExceeded),
    ("MalformedPolicyDocumentException", KmsErrorKind::MalformedPolicyDocument),
    ("NotFoundException", KmsErrorKind::NotFound),
    ("TagException", KmsErrorKind::Tag),
    ("UnsupportedOperationException", KmsErrorKind::UnsupportedOperation),
];

impl KmsErrorKind {
    /// The error code this kind is registered under
    pub fn code(&self) -> Option<&'static str> {
        ERRORS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(code, _)| *code)
    }
}

impl Display for KmsErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "Unhandled"),
        }
    }
}

impl ProvideErrorKind for KmsErrorKind {
    fn retryable_error_kind(&self) -> Option<ErrorKind> {
        match self {
            KmsErrorKind::KmsInternal => Some(ErrorKind::ServerError),
            KmsErrorKind::DependencyTimeout => Some(ErrorKind::TransientError),
            KmsErrorKind::LimitExceeded => Some(ErrorKind::ThrottlingError),
            _ => None,
        }
    }

    fn code(&self) -> Option<&str> {
        KmsErrorKind::code(self)
    }
}

#[cfg(test)]
mod test {
    use crate::error::{KmsErrorKind, ERRORS};
    use smithy_types::retry::{ErrorKind, ProvideErrorKind};
    use std::collections::HashSet;

    #[test]
    fn registry_has_no_duplicates() {
        let codes: HashSet<_> = ERRORS.iter().map(|(code, _)| code).collect();
        assert_eq!(codes.len(), ERRORS.len());
        assert_eq!(ERRORS.len(), 21);
    }

    #[test]
    fn kinds_know_their_code() {
        assert_eq!(KmsErrorKind::NotFound.code(), Some("NotFoundException"));
        assert_eq!(KmsErrorKind::KmsInternal.to_string(), "KMSInternalException");
        assert_eq!(KmsErrorKind::Unhandled.code(), None);
    }

    #[test]
    fn retryable_kinds() {
        assert_eq!(
            KmsErrorKind::LimitExceeded.retryable_error_kind(),
            Some(ErrorKind::ThrottlingError)
        );
        assert_eq!(KmsErrorKind::NotFound.retryable_error_kind(), None);
    }
}
