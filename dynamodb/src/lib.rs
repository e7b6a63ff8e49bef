/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Amazon DynamoDB on-demand backups
//!
//! Requests use AWS JSON 1.0 with the target header `DynamoDB_20120810.{Operation}`.

macro_rules! dynamodb_operations {
    ($callback:ident) => {
        $callback! {
            CreateBackup(CreateBackupInput) -> CreateBackupOutput => create_backup;
            DeleteBackup(DeleteBackupInput) -> DeleteBackupOutput => delete_backup;
            DescribeBackup(DescribeBackupInput) -> DescribeBackupOutput => describe_backup;
            ListBackups(ListBackupsInput) -> ListBackupsOutput => list_backups;
        }
    };
}

#[cfg(feature = "client")]
mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod operation;
pub mod output;

#[cfg(feature = "client")]
pub use client::{Client, DynamoDb};
pub use config::Config;
pub use error::{DynamoDbError, DynamoDbErrorKind};

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
pub use smithy_types::Instant;
