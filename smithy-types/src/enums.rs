/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0.
 */

/// Declare a closed set of wire strings as an enum
///
/// The generated enum carries an extra `Unknown(String)` variant so values added to the service
/// after this client was generated are preserved verbatim instead of failing deserialization.
/// The caller crate must depend on `serde`.
///
/// ```rust
/// smithy_types::string_enum! {
///     /// Status of a thing
///     ThingStatus {
///         Creating => "CREATING",
///         Available => "AVAILABLE",
///     }
/// }
/// assert_eq!(ThingStatus::from("AVAILABLE"), ThingStatus::Available);
/// assert_eq!(ThingStatus::from("ARCHIVED").as_str(), "ARCHIVED");
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
            /// A value this version of the client does not know about
            Unknown(String),
        }

        impl $name {
            /// The wire representation of this value
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Unknown(value) => value.as_str(),
                }
            }

            /// Every value known to this version of the client
            pub fn values() -> &'static [&'static str] {
                &[$($value),+]
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(value: &'a str) -> Self {
                match value {
                    $($value => $name::$variant,)+
                    other => $name::Unknown(other.to_owned()),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name::from(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::from(value.as_str()))
            }
        }
    };
}
