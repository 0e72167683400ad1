//! Newtype IDs for type-safe record references.
//!
//! Records are keyed by strings derived from their creation timestamp in
//! milliseconds. Older holiday data stored numeric ids, so every id type also
//! deserializes from a JSON integer.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, Visitor};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize` as a plain string, `Deserialize` from a string or an integer
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()` and `generate()` for timestamp-based allocation
/// - `From<String>`, `From<&str>` and `Display`
///
/// # Example
///
/// ```rust
/// # use doughda_core::define_id;
/// define_id!(LoafId);
/// define_id!(OvenId);
///
/// let loaf = LoafId::new("1700000000000");
/// assert_eq!(loaf.as_str(), "1700000000000");
///
/// // These are different types, so this won't compile:
/// // let _: OvenId = loaf;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Allocate an ID from a millisecond timestamp that is not in `existing`.
            #[must_use]
            pub fn generate<'a, I>(now_millis: i64, existing: I) -> Self
            where
                I: IntoIterator<Item = &'a Self>,
            {
                Self($crate::types::id::unique_timestamp_id(
                    now_millis,
                    existing.into_iter().map(Self::as_str),
                ))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::types::id::deserialize_string_or_integer(deserializer).map(Self)
            }
        }
    };
}

/// Pick the first timestamp at or after `now_millis` whose string form is not taken.
///
/// Two records created in the same millisecond get consecutive ids instead of
/// colliding.
#[must_use]
pub fn unique_timestamp_id<'a, I>(now_millis: i64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}

#[doc(hidden)]
pub fn deserialize_string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or integer id")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    define_id!(TestId);

    #[test]
    fn test_unique_timestamp_id_free_slot() {
        assert_eq!(unique_timestamp_id(1000, ["999", "1001"]), "1000");
    }

    #[test]
    fn test_unique_timestamp_id_bumps_past_collisions() {
        assert_eq!(unique_timestamp_id(1000, ["1000", "1001", "1003"]), "1002");
    }

    #[test]
    fn test_generate_avoids_existing() {
        let existing = vec![TestId::new("42"), TestId::new("43")];
        let id = TestId::generate(42, &existing);
        assert_eq!(id.as_str(), "44");
        assert!(!existing.contains(&id));
    }

    #[test]
    fn test_deserialize_from_integer() {
        let id: TestId = serde_json::from_str("1734567890123").unwrap();
        assert_eq!(id.as_str(), "1734567890123");
    }

    #[test]
    fn test_deserialize_from_string_and_serialize_as_string() {
        let id: TestId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_deserialize_rejects_bool() {
        assert!(serde_json::from_str::<TestId>("true").is_err());
    }
}
