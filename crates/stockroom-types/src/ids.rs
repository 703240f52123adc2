//! Type-safe identifier wrappers around the catalog's integer keys.
//!
//! The backing store assigns ids from `BIGSERIAL` sequences, so ids are
//! plain `i64` values on the wire. Wrapping them in a newtype keeps item
//! ids from being confused with the other integer columns (quantities,
//! minor-unit prices) they travel alongside.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`i64`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub i64);

        impl $name {
            /// Wrap a raw store-assigned key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the inner [`i64`] value.
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a catalog item.
    ItemId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_wraps_and_unwraps_raw_value() {
        let id = ItemId::new(1);
        assert_eq!(id.into_inner(), 1);
        assert_eq!(i64::from(id), 1);
        assert_eq!(ItemId::from(1), id);
    }

    #[test]
    fn id_serializes_as_bare_integer() {
        let id = ItemId::new(42);
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("42"));
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = ItemId::new(7);
        let json = serde_json::to_string(&original).ok();
        let restored: Result<ItemId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_matches_raw() {
        let id = ItemId::new(99);
        assert_eq!(id.to_string(), "99");
    }
}
