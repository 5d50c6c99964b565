use chrono::NaiveDate;
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;
use uuid::Uuid;

use super::{
    CalendarDate, Email, Member, MemberId, MemberList, MemberStatus, PersonName, TripDates, TripId,
    TripName, UserId, ValidationError,
};

/// A trip together with its members, in member row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub trip_id: TripId,
    pub customer_id: UserId,
    pub trip_name: TripName,
    pub dates: TripDates,
    pub group_members: Vec<Member>,
}

impl Trip {
    /// A fresh trip whose members are all new, pending invitations.
    pub fn new(
        customer_id: UserId,
        trip_name: TripName,
        dates: TripDates,
        members: &MemberList,
    ) -> Self {
        let trip_id = TripId::default();
        Self {
            trip_id,
            customer_id,
            trip_name,
            dates,
            group_members: members.iter().map(|draft| Member::new(trip_id, draft)).collect(),
        }
    }
}

/// One row of `trips LEFT JOIN group_members`. Member columns are all empty
/// for a trip without members.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TripMemberRow {
    pub trip_id: Uuid,
    pub customer_id: Uuid,
    pub trip_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub member_id: Option<Uuid>,
    pub member_customer_id: Option<Uuid>,
    pub member_name: Option<String>,
    pub member_email: Option<String>,
    pub member_status: Option<String>,
}

impl TripMemberRow {
    pub fn from_parts(trip: &Trip, member: Option<&Member>) -> Self {
        Self {
            trip_id: *trip.trip_id.as_ref(),
            customer_id: *trip.customer_id.as_ref(),
            trip_name: trip.trip_name.as_ref().to_owned(),
            start_date: trip.dates.start().value_of(),
            end_date: trip.dates.end().value_of(),
            member_id: member.map(|m| *m.member_id.as_ref()),
            member_customer_id: member.and_then(|m| m.customer_id.map(|id| *id.as_ref())),
            member_name: member.map(|m| m.name.as_ref().to_owned()),
            member_email: member.map(|m| m.email.as_ref().expose_secret().to_owned()),
            member_status: member.map(|m| m.status.as_str().to_owned()),
        }
    }

    fn member(&self) -> Result<Option<Member>, ValidationError> {
        let (Some(member_id), Some(name), Some(email)) =
            (self.member_id, self.member_name.as_ref(), self.member_email.as_ref())
        else {
            return Ok(None);
        };

        let status = match self.member_status.as_deref() {
            Some(status) => status.parse()?,
            None => MemberStatus::Pending,
        };

        Ok(Some(Member {
            member_id: MemberId::new(member_id),
            trip_id: TripId::new(self.trip_id),
            customer_id: self.member_customer_id.map(UserId::new),
            name: PersonName::parse(name)?,
            email: Email::parse(Secret::new(email.to_owned()))?,
            status,
        }))
    }
}

/// Rebuilds nested trips from flat join rows.
///
/// Trips appear in the order their first row appears and keep the field
/// values of that row. A member is attached only when its row carries an
/// identifier, a name and an email.
pub fn aggregate_trip_rows(
    rows: impl IntoIterator<Item = TripMemberRow>,
) -> Result<Vec<Trip>, ValidationError> {
    let mut trips: Vec<Trip> = Vec::new();
    let mut positions = HashMap::<Uuid, usize>::new();

    for row in rows {
        let position = match positions.get(&row.trip_id) {
            Some(position) => *position,
            None => {
                trips.push(Trip {
                    trip_id: TripId::new(row.trip_id),
                    customer_id: UserId::new(row.customer_id),
                    trip_name: TripName::parse(&row.trip_name)?,
                    dates: TripDates::new(
                        CalendarDate::new(row.start_date),
                        CalendarDate::new(row.end_date),
                    )?,
                    group_members: Vec::new(),
                });
                positions.insert(row.trip_id, trips.len() - 1);
                trips.len() - 1
            }
        };

        if let Some(member) = row.member()? {
            trips[position].group_members.push(member);
        }
    }

    Ok(trips)
}
