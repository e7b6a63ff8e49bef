/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::{DynamoDbErrorKind, ERRORS};
use crate::input::*;
use crate::output::*;
use aws_http::json::{build_operation, BuildError, JsonOperation, JsonResponseHandler, JsonService};
use smithy_http::operation::Operation;

/// DynamoDB, API version `2012-08-10`
#[derive(Debug, Clone, Copy)]
pub struct DynamoDbService;

impl JsonService for DynamoDbService {
    const SERVICE_NAME: &'static str = "dynamodb";
    const TARGET_PREFIX: &'static str = "DynamoDB_20120810";
    const JSON_VERSION: &'static str = "1.0";
    const SIGNING_SERVICE: &'static str = "dynamodb";
    type ErrorKind = DynamoDbErrorKind;
    const ERRORS: &'static [(&'static str, DynamoDbErrorKind)] = ERRORS;
    const UNHANDLED: DynamoDbErrorKind = DynamoDbErrorKind::Unhandled;
}

/// Build the operation for `input`, configured from `config`
pub fn make_operation<O>(
    input: &O::Input,
    config: &Config,
) -> Result<Operation<JsonResponseHandler<O>>, BuildError>
where
    O: JsonOperation<Service = DynamoDbService>,
{
    let mut operation = build_operation::<O>(input)?;
    config.apply(operation.properties_mut());
    Ok(operation)
}

macro_rules! define_operations {
    ($($op:ident($input:ident) -> $output:ident => $method:ident;)+) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $op;

            impl JsonOperation for $op {
                const NAME: &'static str = stringify!($op);
                type Service = DynamoDbService;
                type Input = $input;
                type Output = $output;
            }

            impl $input {
                pub fn make_operation(
                    &self,
                    config: &Config,
                ) -> Result<Operation<JsonResponseHandler<$op>>, BuildError> {
                    make_operation::<$op>(self, config)
                }
            }
        )+
    };
}

dynamodb_operations!(define_operations);

#[cfg(test)]
mod test {
    use crate::input::ListBackupsInput;
    use crate::model::BackupTypeFilter;
    use crate::{Config, Instant, Region};
    use protocol_test_helpers::{assert_ok, validate_body, validate_headers, MediaType};

    #[test]
    fn list_backups_is_marshalled() {
        let conf = Config::builder().region(Region::new("us-east-1")).build();
        let input = ListBackupsInput {
            table_name: Some("Music".to_string()),
            limit: Some(10),
            time_range_lower_bound: Some(Instant::from_epoch_seconds(1489173575)),
            backup_type: Some(BackupTypeFilter::All),
            ..Default::default()
        };
        let op = input.make_operation(&conf).expect("valid input");
        let req = op.request().http();
        assert_ok(validate_headers(
            req,
            &[
                ("content-type", "application/x-amz-json-1.0"),
                ("x-amz-target", "DynamoDB_20120810.ListBackups"),
            ],
        ));
        assert_ok(validate_body(
            req.body().bytes().unwrap(),
            r#"{"TableName":"Music","Limit":10,"TimeRangeLowerBound":1489173575,"BackupType":"ALL"}"#,
            MediaType::from("application/x-amz-json-1.0"),
        ));
    }
}
