use lazy_static::lazy_static;
use regex::Regex;

use super::ValidationError;

lazy_static! {
    static ref PHONE_NUMBER: Regex =
        Regex::new(r"^\+?[0-9(][0-9 ().\-]{5,18}[0-9]$")
            .expect("Regex for PhoneNumber parser is invalid");
}

/// Contact number from a customer's profile, kept as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(number: &str) -> Result<Self, ValidationError> {
        let trimmed = number.trim();
        if PHONE_NUMBER.is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(ValidationError::new("Invalid phone number".to_string()))
        }
    }
}

impl AsRef<String> for PhoneNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
