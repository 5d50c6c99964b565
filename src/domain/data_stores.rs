use super::{
    Email, Member, MemberChanges, Password, Trip, TripDates, TripId, TripName, User,
    UserId,
};
use color_eyre::eyre::Report;
use thiserror::Error;

#[async_trait::async_trait]
pub trait UserStore {
    async fn add_user(&mut self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn validate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<(), UserStoreError>;
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::InvalidCredentials, Self::InvalidCredentials)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence for trips and their members.
///
/// Every write is all-or-nothing: a failed call leaves the stored trip and
/// its members as they were.
#[async_trait::async_trait]
pub trait TripStore {
    /// Stores a new trip and all of its members.
    async fn add_trip(&mut self, trip: &Trip) -> Result<(), TripStoreError>;

    async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, TripStoreError>;

    /// Trips owned by `customer_id`, latest start date first.
    async fn get_trips_with_members(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Trip>, TripStoreError>;

    /// Trips with a member whose email matches `email` ignoring case,
    /// latest start date first.
    async fn get_invited_trips(
        &self,
        email: &Email,
    ) -> Result<Vec<Trip>, TripStoreError>;

    async fn get_members(
        &self,
        trip_id: &TripId,
    ) -> Result<Vec<Member>, TripStoreError>;

    /// Overwrites the trip's fields and applies `changes` to its members.
    async fn update_trip(
        &mut self,
        trip_id: &TripId,
        trip_name: &TripName,
        dates: &TripDates,
        changes: &MemberChanges,
    ) -> Result<(), TripStoreError>;

    /// Removes the trip's members, then the trip.
    async fn delete_trip(&mut self, trip_id: &TripId) -> Result<(), TripStoreError>;

    /// Attaches every member row with a matching email to `customer_id` and
    /// marks it accepted. Returns the number of rows linked.
    async fn link_members(
        &mut self,
        email: &Email,
        customer_id: &UserId,
    ) -> Result<u64, TripStoreError>;
}

#[derive(Debug, Error)]
pub enum TripStoreError {
    #[error("Trip ID exists")]
    TripIDExists,
    #[error("Trip ID not found")]
    TripIDNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for TripStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TripIDExists, Self::TripIDExists)
                | (Self::TripIDNotFound, Self::TripIDNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
