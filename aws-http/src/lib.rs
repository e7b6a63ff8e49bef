/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS JSON protocol support and AWS specific error classification

pub mod error;
pub mod json;

use http::StatusCode;
use smithy_types::retry::ErrorKind;

const TRANSIENT_ERROR_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];
const THROTTLING_ERRORS: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "TransactionInProgressException",
    "RequestLimitExceeded",
    "BandwidthLimitExceeded",
    "LimitExceededException",
    "RequestThrottled",
    "SlowDown",
    "PriorRequestNotComplete",
    "EC2ThrottledException",
];
const TRANSIENT_ERRORS: &[&str] = &["RequestTimeout", "RequestTimeoutException"];

/// Classify an unmodeled AWS error
///
/// In order of priority:
/// 1. The code is checked against a predetermined list of throttling errors & transient error codes
/// 2. The status code is checked against a predetermined list of status codes
///
/// The result is advisory. Nothing in the request pipeline retries.
pub fn classify(code: Option<&str>, status: StatusCode) -> Option<ErrorKind> {
    if let Some(code) = code {
        if THROTTLING_ERRORS.contains(&code) {
            return Some(ErrorKind::ThrottlingError);
        }
        if TRANSIENT_ERRORS.contains(&code) {
            return Some(ErrorKind::TransientError);
        }
    };
    if TRANSIENT_ERROR_STATUS_CODES.contains(&status.as_u16()) {
        return Some(ErrorKind::TransientError);
    };
    None
}
