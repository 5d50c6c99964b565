mod data_stores;
mod email;
mod email_client;
mod error;
mod ids;
mod member;
mod password;
mod person_name;
mod phone_number;
mod reconcile;
mod trip;
mod trip_dates;
mod trip_name;
mod user;
mod user_password_hash;

pub use data_stores::*;
pub use email::*;
pub use email_client::*;
pub use error::*;
pub use ids::*;
pub use member::*;
pub use password::*;
pub use person_name::*;
pub use phone_number::*;
pub use reconcile::*;
pub use trip::*;
pub use trip_dates::*;
pub use trip_name::*;
pub use user::*;
pub use user_password_hash::*;
