/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::model::BackupTypeFilter;
use serde::Serialize;
use smithy_types::Instant;

/// Lists the backups of an account, or of a single table
///
/// Results are paginated: pass the `last_evaluated_backup_arn` of a response as the
/// `exclusive_start_backup_arn` of the next request.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ListBackupsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range_lower_bound: Option<Instant>,
    /// Exclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range_upper_bound: Option<Instant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_backup_arn: Option<String>,
    /// Defaults to `USER` on the service side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_type: Option<BackupTypeFilter>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct CreateBackupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_name: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeBackupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_arn: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteBackupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_arn: Option<String>,
}
