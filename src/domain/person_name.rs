use super::ValidationError;
use serde::{Deserialize, Serialize};

const MAX_NAME_LENGTH: usize = 255;

/// Display name of a trip member or a registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        match trimmed.chars().count() {
            0 => Err(ValidationError::new("Name cannot be empty".to_string())),
            x if x > MAX_NAME_LENGTH => Err(ValidationError::new(format!(
                "Max name length is {MAX_NAME_LENGTH} characters"
            ))),
            _ => Ok(Self(trimmed.to_owned())),
        }
    }
}

impl AsRef<String> for PersonName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[test]
fn test_valid_person_names() {
    let valid_names = ["a".to_string(), "a".repeat(255), "Ann Lee".to_string()];
    for valid_name in valid_names.iter() {
        let parsed = PersonName::parse(valid_name)
            .expect("Failed to parse valid name");

        assert_eq!(parsed.as_ref(), valid_name);
    }
}

#[test]
fn test_names_are_trimmed() {
    let parsed = PersonName::parse("  Bo \n").expect("Failed to parse name");
    assert_eq!(parsed.as_ref(), "Bo");
}

#[test]
fn test_blank_person_names() {
    for blank in ["", "   ", "\t"] {
        let result = PersonName::parse(blank);
        assert_eq!(result.unwrap_err().as_ref(), "Name cannot be empty");
    }
}

#[test]
fn test_long_person_names() {
    let result = PersonName::parse(&"a".repeat(256));
    assert_eq!(
        result.unwrap_err().as_ref(),
        "Max name length is 255 characters"
    );
}
