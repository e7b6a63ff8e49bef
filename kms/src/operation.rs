/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

use crate::config::Config;
use crate::error::{KmsErrorKind, ERRORS};
use crate::input::*;
use crate::output::*;
use aws_http::json::{build_operation, BuildError, JsonOperation, JsonResponseHandler, JsonService};
use smithy_http::operation::Operation;

/// The KMS API, `TrentService` on the wire
#[derive(Debug, Clone, Copy)]
pub struct TrentService;

impl JsonService for TrentService {
    const SERVICE_NAME: &'static str = "kms";
    const TARGET_PREFIX: &'static str = "TrentService";
    const JSON_VERSION: &'static str = "1.1";
    const SIGNING_SERVICE: &'static str = "kms";
    type ErrorKind = KmsErrorKind;
    const ERRORS: &'static [(&'static str, KmsErrorKind)] = ERRORS;
    const UNHANDLED: KmsErrorKind = KmsErrorKind::Unhandled;
}

/// Build the operation for `input`, ready to be sent with an [`aws_hyper::Client`]
///
/// Region, credentials provider and endpoint come from `config`. To sign a single request with
/// other credentials, use [`aws_auth::set_credentials`] on the properties of the operation.
pub fn make_operation<O>(
    input: &O::Input,
    config: &Config,
) -> Result<Operation<JsonResponseHandler<O>>, BuildError>
where
    O: JsonOperation<Service = TrentService>,
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
                type Service = TrentService;
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

kms_operations!(define_operations);

#[cfg(test)]
mod test {
    use crate::input::{EncryptInput, ListKeysInput};
    use crate::operation::Encrypt;
    use crate::{Blob, Config, Region};
    use aws_auth::Credentials;
    use aws_http::json::JsonOperation;
    use aws_types::SigningService;
    use protocol_test_helpers::{assert_ok, validate_body, validate_headers, MediaType};
    use std::collections::HashMap;

    fn config() -> Config {
        Config::builder()
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::from_keys("akid", "secret", None))
            .build()
    }

    #[test]
    fn encrypt_is_marshalled() {
        let mut context = HashMap::new();
        context.insert("purpose".to_string(), "test".to_string());
        let input = EncryptInput {
            key_id: Some("alias/my-key".to_string()),
            plaintext: Some(Blob::new("hello")),
            encryption_context: Some(context),
            grant_tokens: None,
        };
        let op = input.make_operation(&config()).expect("valid input");
        assert_eq!(op.metadata().map(|m| m.name()), Some("Encrypt"));
        assert_eq!(op.metadata().map(|m| m.service()), Some("kms"));
        assert_eq!(
            op.properties().get::<SigningService>(),
            Some(&SigningService::from_static("kms"))
        );
        assert_eq!(op.properties().get::<Region>(), Some(&Region::new("us-east-1")));
        let req = op.request().http();
        assert_ok(validate_headers(
            req,
            &[
                ("content-type", "application/x-amz-json-1.1"),
                ("x-amz-target", "TrentService.Encrypt"),
            ],
        ));
        assert_ok(validate_body(
            req.body().bytes().unwrap(),
            r#"{"KeyId":"alias/my-key","Plaintext":"aGVsbG8=","EncryptionContext":{"purpose":"test"}}"#,
            MediaType::from("application/x-amz-json-1.1"),
        ));
    }

    #[test]
    fn empty_input_is_an_empty_object() {
        let op = ListKeysInput::default()
            .make_operation(&config())
            .expect("valid input");
        assert_eq!(op.request().http().body().bytes(), Some(&b"{}"[..]));
    }

    #[test]
    fn operation_names_match_targets() {
        assert_eq!(Encrypt::NAME, "Encrypt");
        assert_eq!(
            aws_http::json::target::<crate::operation::GenerateDataKeyWithoutPlaintext>(),
            "TrentService.GenerateDataKeyWithoutPlaintext"
        );
        assert_eq!(
            aws_http::json::target::<crate::operation::ReEncrypt>(),
            "TrentService.ReEncrypt"
        );
    }
}
