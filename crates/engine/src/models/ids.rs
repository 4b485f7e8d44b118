use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

id_type!(
    /// A driver *identity*: one real driver who changed teams mid-season is
    /// represented by two distinct identities, each tied to one team.
    DriverId
);

id_type!(TeamId);

id_type!(
    /// Race slug, e.g. "bahrain" or "miami-sprint".
    RaceId
);

id_type!(PointsSystemId);

id_type!(
    /// Prediction owner: an authenticated user id or an anonymous browser
    /// fingerprint. The engine treats both uniformly.
    Owner
);

/// Season year, e.g. 2025.
pub type Season = u16;
