/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use aws_http::error::ServiceError;
use smithy_types::retry::{ErrorKind, ProvideErrorKind};
use std::fmt;
use std::fmt::{Display, Formatter};

pub type DynamoDbError = ServiceError<DynamoDbErrorKind>;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DynamoDbErrorKind {
    /// A backup of the table is already being created or deleted
    BackupInUse,
    BackupNotFound,
    ContinuousBackupsUnavailable,
    InternalServerError,
    LimitExceeded,
    ResourceNotFound,
    TableInUse,
    TableNotFound,
    Unhandled,
}

pub(crate) const ERRORS: &[(&str, DynamoDbErrorKind)] = &[
    ("BackupInUseException", DynamoDbErrorKind::BackupInUse),
    ("BackupNotFoundException", DynamoDbErrorKind::BackupNotFound),
    (
        "ContinuousBackupsUnavailableException",
        DynamoDbErrorKind::ContinuousBackupsUnavailable,
    ),
    ("InternalServerError", DynamoDbErrorKind::InternalServerError),
    ("LimitExceededException", DynamoDbErrorKind::LimitExceeded),
    ("ResourceNotFoundException", DynamoDbErrorKind::ResourceNotFound),
    ("TableInUseException", DynamoDbErrorKind::TableInUse),
    ("TableNotFoundException", DynamoDbErrorKind::TableNotFound),
];

impl DynamoDbErrorKind {
    pub fn code(&self) -> Option<&'static str> {
        ERRORS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(code, _)| *code)
    }
}

impl Display for DynamoDbErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("Unhandled"))
    }
}

impl ProvideErrorKind for DynamoDbErrorKind {
    fn retryable_error_kind(&self) -> Option<ErrorKind> {
        match self {
            DynamoDbErrorKind::InternalServerError => Some(ErrorKind::ServerError),
            DynamoDbErrorKind::LimitExceeded => Some(ErrorKind::ThrottlingError),
            _ => None,
        }
    }

    fn code(&self) -> Option<&str> {
        DynamoDbErrorKind::code(self)
    }
}

#[cfg(test)]
mod test {
    use crate::error::{DynamoDbErrorKind, ERRORS};
    use smithy_types::retry::{ErrorKind, ProvideErrorKind};

    #[test]
    fn registry() {
        assert_eq!(ERRORS.len(), 8);
        assert_eq!(
            DynamoDbErrorKind::TableNotFound.code(),
            Some("TableNotFoundException")
        );
        assert_eq!(DynamoDbErrorKind::Unhandled.to_string(), "Unhandled");
        assert_eq!(
            DynamoDbErrorKind::InternalServerError.retryable_error_kind(),
            Some(ErrorKind::ServerError)
        );
    }
}
