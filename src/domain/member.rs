use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

use super::{Email, MemberId, PersonName, TripId, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Pending,
    Accepted,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Pending => "pending",
            MemberStatus::Accepted => "accepted",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MemberStatus::Pending),
            "accepted" => Ok(MemberStatus::Accepted),
            _ => Err(ValidationError::new(format!("Invalid member status: {s}"))),
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored member of a trip. `customer_id` stays empty until the invitee
/// registers with the same email.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub member_id: MemberId,
    pub trip_id: TripId,
    pub customer_id: Option<UserId>,
    pub name: PersonName,
    pub email: Email,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(trip_id: TripId, draft: &MemberDraft) -> Self {
        Self {
            member_id: MemberId::default(),
            trip_id,
            customer_id: None,
            name: draft.name.clone(),
            email: draft.email.clone(),
            status: MemberStatus::Pending,
        }
    }
}

/// A member as submitted by the trip owner: the editable fields only.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub name: PersonName,
    pub email: Email,
}

impl MemberDraft {
    pub fn parse(name: &str, email: String) -> Result<Self, ValidationError> {
        Ok(Self {
            name: PersonName::parse(name)?,
            email: Email::parse(Secret::new(email))?,
        })
    }
}

/// The desired member list of a trip. No two entries share an email once
/// case and surrounding whitespace are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberList(Vec<MemberDraft>);

impl MemberList {
    pub fn parse(drafts: Vec<MemberDraft>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(drafts.len());
        for draft in drafts.iter() {
            if !seen.insert(draft.email.normalized()) {
                return Err(ValidationError::new(format!(
                    "Duplicate member email: {}",
                    draft.email.normalized()
                )));
            }
        }
        Ok(Self(drafts))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberDraft> {
        self.0.iter()
    }
}
