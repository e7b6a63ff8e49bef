/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! AWS Key Management Service (AWS KMS)
//!
//! Every operation is an AWS JSON 1.1 `POST` with the target header `TrentService.{Operation}`,
//! signed with SigV4.
//!
//! ```no_run
//! use kms::{Client, Config, Credentials, Kms, Region};
//! use kms::input::GenerateRandomInput;
//!
//! # async fn docs() {
//! let config = Config::builder()
//!     .region(Region::new("us-east-1"))
//!     .credentials_provider(Credentials::from_keys("akid", "secret", None))
//!     .build();
//! let client = Client::from_conf(config);
//! let random = client
//!     .generate_random(GenerateRandomInput {
//!         number_of_bytes: Some(64),
//!     })
//!     .await
//!     .expect("failed to generate random data");
//! # }
//! ```

/// Every KMS operation: marker type, input, output and client method
macro_rules! kms_operations {
    ($callback:ident) => {
        $callback! {
            CancelKeyDeletion(CancelKeyDeletionInput) -> CancelKeyDeletionOutput => cancel_key_deletion;
            CreateAlias(CreateAliasInput) -> CreateAliasOutput => create_alias;
            CreateGrant(CreateGrantInput) -> CreateGrantOutput => create_grant;
            CreateKey(CreateKeyInput) -> CreateKeyOutput => create_key;
            Decrypt(DecryptInput) -> DecryptOutput => decrypt;
            DeleteAlias(DeleteAliasInput) -> DeleteAliasOutput => delete_alias;
            DeleteImportedKeyMaterial(DeleteImportedKeyMaterialInput) -> DeleteImportedKeyMaterialOutput => delete_imported_key_material;
            DescribeKey(DescribeKeyInput) -> DescribeKeyOutput => describe_key;
            DisableKey(DisableKeyInput) -> DisableKeyOutput => disable_key;
            DisableKeyRotation(DisableKeyRotationInput) -> DisableKeyRotationOutput => disable_key_rotation;
            EnableKey(EnableKeyInput) -> EnableKeyOutput => enable_key;
            EnableKeyRotation(EnableKeyRotationInput) -> EnableKeyRotationOutput => enable_key_rotation;
            Encrypt(EncryptInput) -> EncryptOutput => encrypt;
            GenerateDataKey(GenerateDataKeyInput) -> GenerateDataKeyOutput => generate_data_key;
            GenerateDataKeyWithoutPlaintext(GenerateDataKeyWithoutPlaintextInput) -> GenerateDataKeyWithoutPlaintextOutput => generate_data_key_without_plaintext;
            GenerateRandom(GenerateRandomInput) -> GenerateRandomOutput => generate_random;
            GetKeyPolicy(GetKeyPolicyInput) -> GetKeyPolicyOutput => get_key_policy;
            GetKeyRotationStatus(GetKeyRotationStatusInput) -> GetKeyRotationStatusOutput => get_key_rotation_status;
            GetParametersForImport(GetParametersForImportInput) -> GetParametersForImportOutput => get_parameters_for_import;
            ImportKeyMaterial(ImportKeyMaterialInput) -> ImportKeyMaterialOutput => import_key_material;
            ListAliases(ListAliasesInput) -> ListAliasesOutput => list_aliases;
            ListGrants(ListGrantsInput) -> ListGrantsOutput => list_grants;
            ListKeyPolicies(ListKeyPoliciesInput) -> ListKeyPoliciesOutput => list_key_policies;
            ListKeys(ListKeysInput) -> ListKeysOutput => list_keys;
            ListResourceTags(ListResourceTagsInput) -> ListResourceTagsOutput => list_resource_tags;
            ListRetirableGrants(ListRetirableGrantsInput) -> ListRetirableGrantsOutput => list_retirable_grants;
            PutKeyPolicy(PutKeyPolicyInput) -> PutKeyPolicyOutput => put_key_policy;
            ReEncrypt(ReEncryptInput) -> ReEncryptOutput => re_encrypt;
            RetireGrant(RetireGrantInput) -> RetireGrantOutput => retire_grant;
            RevokeGrant(RevokeGrantInput) -> RevokeGrantOutput => revoke_grant;
            ScheduleKeyDeletion(ScheduleKeyDeletionInput) -> ScheduleKeyDeletionOutput => schedule_key_deletion;
            TagResource(TagResourceInput) -> TagResourceOutput => tag_resource;
            UntagResource(UntagResourceInput) -> UntagResourceOutput => untag_resource;
            UpdateAlias(UpdateAliasInput) -> UpdateAliasOutput => update_alias;
            UpdateKeyDescription(UpdateKeyDescriptionInput) -> UpdateKeyDescriptionOutput => update_key_description;
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
pub use client::{Client, Kms};
pub use config::Config;
pub use error::{KmsError, KmsErrorKind};

pub use aws_auth::Credentials;
pub use aws_types::region::Region;
pub use smithy_types::{Blob, Instant};
