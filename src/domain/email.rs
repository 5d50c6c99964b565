use secrecy::{ExposeSecret, Secret};
use std::hash::Hash;

use super::ValidationError;

/// A syntactically valid email address with surrounding whitespace removed.
///
/// Equality and hashing are exact. Use [`Email::normalized`] when two
/// addresses should be compared the way members of a trip are matched.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Hash for Email {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

impl Eq for Email {}

impl Email {
    pub fn parse(s: Secret<String>) -> Result<Self, ValidationError> {
        let trimmed = s.expose_secret().trim();
        if !validator::validate_email(trimmed) {
            return Err(ValidationError::new(
                "Invalid email address".to_string(),
            ));
        }

        Ok(Self(Secret::new(trimmed.to_owned())))
    }

    /// Lower-cased comparison key.
    pub fn normalized(&self) -> String {
        self.0.expose_secret().to_lowercase()
    }

    pub fn matches(&self, other: &Email) -> bool {
        self.normalized() == other.normalized()
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
