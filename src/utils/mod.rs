pub mod auth;
pub mod constants;
pub mod tracing;
pub mod trip;
