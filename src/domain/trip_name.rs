use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripName(String);

impl TripName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        match trimmed.chars().count() {
            0 => Err(ValidationError::new(
                "Trip name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max trip name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(trimmed.to_owned())),
        }
    }
}

impl AsRef<String> for TripName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_trip_names() {
    let valid_names = ["a".to_string(), "a".repeat(255)];
    for valid_name in valid_names.iter() {
        let parsed =
            TripName::parse(valid_name).expect("Failed to parse valid trip name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_empty_trip_names() {
    for empty in ["", "  "] {
        let result = TripName::parse(empty);
        assert_eq!(result.unwrap_err().as_ref(), "Trip name cannot be empty");
    }
}

#[test]
fn test_long_trip_names() {
    let result = TripName::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max trip name length is 255 characters"
    );
}
