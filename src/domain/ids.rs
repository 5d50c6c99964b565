use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn parse(id: &str) -> Result<Self, ValidationError> {
                let parsed = Uuid::try_parse(id).map_err(|e| {
                    ValidationError::new(format!(
                        concat!("Invalid ", $label, " ID: {}"),
                        e
                    ))
                })?;
                Ok(Self(parsed))
            }

            pub fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_id!(UserId, "customer");
uuid_id!(TripId, "trip");
uuid_id!(MemberId, "member");
