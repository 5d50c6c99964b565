use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

const MIN_CHARACTERS: usize = 8;
const MAX_CHARACTERS: usize = 128;

/// A plaintext password that satisfies the length policy. Only ever held
/// long enough to hash or verify it.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Password {
    pub fn parse(s: Secret<String>) -> Result<Password, ValidationError> {
        let char_count = s.expose_secret().chars().count();

        if char_count < MIN_CHARACTERS {
            return Err(ValidationError::new(format!(
                "Password too short. Should be {} to {} characters.",
                MIN_CHARACTERS, MAX_CHARACTERS
            )));
        }

        if char_count > MAX_CHARACTERS {
            return Err(ValidationError::new(format!(
                "Password too long. Should be {} to {} characters.",
                MIN_CHARACTERS, MAX_CHARACTERS
            )));
        }

        Ok(Self(s))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
