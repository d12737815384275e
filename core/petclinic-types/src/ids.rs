//! Identifier types used throughout PetClinic.
//!
//! Identities are integers assigned by the store on first save. An entity
//! that has not been saved yet carries no identifier at all; on the wire
//! both `null` and `0` mean "not assigned".

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behaviour shared by every entity identifier.
pub trait Identity: Copy + Eq + Ord + fmt::Display {
    /// Reads an identity as it appears on the wire.
    ///
    /// Absent and zero both mean the entity is new.
    fn from_wire(raw: Option<i32>) -> Option<Self>;

    /// Returns the raw integer.
    fn get(&self) -> i32;
}

/// Deserializes an optional identity, reading `0` as "not assigned".
///
/// For use with `#[serde(default, deserialize_with = "...")]`.
pub fn deserialize_optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Identity,
{
    let raw = Option::<i32>::deserialize(deserializer)?;
    Ok(T::from_wire(raw))
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw identity value.
            #[must_use]
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Reads an identity as it appears on the wire.
            ///
            /// Absent and zero both mean the entity is new.
            #[must_use]
            pub const fn from_wire(raw: Option<i32>) -> Option<Self> {
                match raw {
                    None | Some(0) => None,
                    Some(raw) => Some(Self(raw)),
                }
            }

            /// Returns the raw integer.
            #[must_use]
            pub const fn get(&self) -> i32 {
                self.0
            }
        }

        impl Identity for $name {
            fn from_wire(raw: Option<i32>) -> Option<Self> {
                $name::from_wire(raw)
            }

            fn get(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identity of an owner row.
    OwnerId
);

entity_id!(
    /// Identity of a pet row.
    PetId
);

entity_id!(
    /// Identity of a pet type row.
    PetTypeId
);

entity_id!(
    /// Identity of a visit row.
    VisitId
);

entity_id!(
    /// Identity of a vet row.
    VetId
);

entity_id!(
    /// Identity of a specialty row.
    SpecialtyId
);
