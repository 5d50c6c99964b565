pub mod auth;
pub mod trips;
