/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

//! Credentials used to sign requests, and the providers that load them
//!
//! Fixed keys are themselves a provider. Anything that loads keys at call time implements
//! [`ProvideCredentials`] and returns a boxed future:
//!
//! ```rust
//! use aws_types::credential::provide_credentials::future;
//! use aws_types::credential::{Credentials, CredentialsError, ProvideCredentials};
//! use std::sync::Mutex;
//!
//! /// Hands out the most recently rotated keys
//! struct Rotating {
//!     current: Mutex<Option<Credentials>>,
//! }
//!
//! impl ProvideCredentials for Rotating {
//!     fn provide_credentials<'a>(&'a self) -> future::ProvideCredentials<'a>
//!     where
//!         Self: 'a,
//!     {
//!         let current = self.current.lock().unwrap().clone();
//!         future::ProvideCredentials::ready(current.ok_or(CredentialsError::CredentialsNotLoaded))
//!     }
//! }
//! ```

pub mod credentials;
pub mod provide_credentials;

pub use credentials::Credentials;
pub use provide_credentials::{CredentialsError, ProvideCredentials, Result, SharedCredentialsProvider};
