use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for an assignment (UUID v7 for time-ordering).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(uuid::Uuid);

/// Unique identifier for an answer within an assignment (UUID v7).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerId(uuid::Uuid);

macro_rules! uuid_id {
    ($name:ident, $label:literal) => {
        impl $name {
            /// Generate a new time-ordered id (UUID v7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Parse from the canonical hyphenated string form.
            pub fn parse(s: &str) -> Result<Self, TypeError> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| TypeError::InvalidId(e.to_string()))
            }

            /// Short representation (first 8 characters of the UUID).
            pub fn short_id(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(AssignmentId, "AssignmentId");
uuid_id!(AnswerId, "AnswerId");

/// Opaque principal identifier issued by the identity provider.
///
/// The board never generates these; they arrive with the authenticated
/// session and double as document keys (most importantly as vote-record
/// keys, where the key itself enforces one vote per user).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Wrap a provider-issued id. Fails on an empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::EmptyUserId);
        }
        Ok(Self(id))
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_ids_are_unique() {
        assert_ne!(AssignmentId::new(), AssignmentId::new());
    }

    #[test]
    fn answer_ids_are_time_ordered() {
        let first = AnswerId::new();
        let second = AnswerId::new();
        assert!(first < second);
    }

    #[test]
    fn parse_roundtrip() {
        let id = AssignmentId::new();
        let parsed = AssignmentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = AnswerId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, TypeError::InvalidId(_)));
    }

    #[test]
    fn short_id_length() {
        assert_eq!(AssignmentId::new().short_id().len(), 8);
    }

    #[test]
    fn user_id_rejects_empty() {
        assert!(matches!(UserId::new(""), Err(TypeError::EmptyUserId)));
    }

    #[test]
    fn user_id_roundtrip() {
        let uid = UserId::new("uid-1234").unwrap();
        assert_eq!(uid.as_str(), "uid-1234");
        assert_eq!(uid.to_string(), "uid-1234");
    }

    #[test]
    fn serde_roundtrip() {
        let id = AnswerId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: AnswerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parse_roundtrips_any_uuid(bits in any::<u128>()) {
                let id = AssignmentId::from_uuid(uuid::Uuid::from_u128(bits));
                prop_assert_eq!(AssignmentId::parse(&id.to_string()).unwrap(), id);
            }

            #[test]
            fn user_id_preserves_any_non_empty(s in "[a-zA-Z0-9_-]{1,40}") {
                let uid = UserId::new(s.clone()).unwrap();
                prop_assert_eq!(uid.as_str(), s.as_str());
            }
        }
    }
}
