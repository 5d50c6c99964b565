use crate::domain::{Email, Password, User, UserStore, UserStoreError};
use std::collections::HashMap;

/// Keyed by normalized email so that `Ann@X.com` and `ann@x.com` are the
/// same account.
#[derive(Default)]
pub struct HashmapUserStore {
    users: HashMap<String, User>,
}

#[async_trait::async_trait]
impl UserStore for HashmapUserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError> {
        let key = user.email.normalized();

        if self.users.contains_key(&key) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        self.users.insert(key, user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        match self.users.get(&email.normalized()) {
            Some(user) => Ok(user.clone()),
            None => Err(UserStoreError::UserNotFound),
        }
    }

    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError> {
        let user = self.get_user(email).await?;
        user.hash
            .verify(password)
            .await
            .map_err(|_| UserStoreError::InvalidCredentials)
    }
}
