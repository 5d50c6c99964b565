mod create_trip;
mod delete_trip;
mod get_trip;
mod list_invited_trips;
mod list_trips;
mod update_trip;

pub use create_trip::*;
pub use delete_trip::*;
pub use get_trip::*;
pub use list_invited_trips::*;
pub use list_trips::*;
pub use update_trip::*;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::{Member, MemberDraft, MemberList, Trip, ValidationError};

#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    pub name: String,
    pub email: String,
}

/// Parses the submitted members. An absent or `null` list is an empty one.
pub fn parse_members(
    members: Option<Vec<MemberRequest>>,
) -> Result<MemberList, ValidationError> {
    let drafts = members
        .unwrap_or_default()
        .into_iter()
        .map(|member| MemberDraft::parse(&member.name, member.email))
        .collect::<Result<Vec<_>, _>>()?;
    MemberList::parse(drafts)
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    pub trip_id: String,
    pub trip_name: String,
    pub start_date: String,
    pub end_date: String,
    pub customer_id: String,
    pub group_members: Vec<MemberResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub status: String,
}

impl From<&Trip> for TripResponse {
    fn from(trip: &Trip) -> Self {
        Self {
            trip_id: trip.trip_id.to_string(),
            trip_name: trip.trip_name.as_ref().to_owned(),
            start_date: trip.dates.start().to_string(),
            end_date: trip.dates.end().to_string(),
            customer_id: trip.customer_id.to_string(),
            group_members: trip.group_members.iter().map(MemberResponse::from).collect(),
        }
    }
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.member_id.to_string(),
            name: member.name.as_ref().to_owned(),
            email: member.email.as_ref().expose_secret().to_owned(),
            status: member.status.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TripMessageResponse {
    pub message: String,
}
