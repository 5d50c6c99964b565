use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{EmailClient, TripStore, UserStore};

pub type UserStoreType = Arc<RwLock<dyn UserStore + Send + Sync>>;
pub type TripStoreType = Arc<RwLock<dyn TripStore + Send + Sync>>;
pub type EmailClientType = Arc<dyn EmailClient + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub user_store: UserStoreType,
    pub trip_store: TripStoreType,
    pub email_client: EmailClientType,
}

impl AppState {
    pub fn new(
        user_store: UserStoreType,
        trip_store: TripStoreType,
        email_client: EmailClientType,
    ) -> Self {
        Self {
            user_store,
            trip_store,
            email_client,
        }
    }
}
