use super::{Email, PersonName, PhoneNumber, CalendarDate, UserId, UserPasswordHash};

/// A registered customer. Created at registration and read at login.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub hash: UserPasswordHash,
    pub profile: UserProfile,
}

impl User {
    pub fn new(email: Email, hash: UserPasswordHash, profile: UserProfile) -> Self {
        Self {
            id: UserId::default(),
            email,
            hash,
            profile,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub address: Option<String>,
    pub phone_number: Option<PhoneNumber>,
    pub travel_interests: Option<String>,
    pub dob: Option<CalendarDate>,
}
