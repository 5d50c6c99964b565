use std::cmp::Reverse;

use color_eyre::eyre::eyre;

use crate::domain::{
    aggregate_trip_rows, apply_member_changes, Email, Member, MemberChanges,
    MemberStatus, Trip, TripDates, TripId, TripMemberRow, TripName, TripStore,
    TripStoreError, UserId,
};

/// In-memory trip store. Trips and members are kept in insertion order so
/// that reads behave like the row order of the SQL store.
#[derive(Default)]
pub struct HashmapTripStore {
    trips: Vec<Trip>,
}

impl HashmapTripStore {
    fn find(&self, trip_id: &TripId) -> Result<&Trip, TripStoreError> {
        self.trips
            .iter()
            .find(|trip| &trip.trip_id == trip_id)
            .ok_or(TripStoreError::TripIDNotFound)
    }

    fn find_mut(&mut self, trip_id: &TripId) -> Result<&mut Trip, TripStoreError> {
        self.trips
            .iter_mut()
            .find(|trip| &trip.trip_id == trip_id)
            .ok_or(TripStoreError::TripIDNotFound)
    }

    /// Flattens the selected trips into join rows, latest start first, and
    /// rebuilds them through the same aggregation the SQL store uses.
    fn select<'a>(
        &'a self,
        trips: impl Iterator<Item = &'a Trip>,
    ) -> Result<Vec<Trip>, TripStoreError> {
        let mut selected: Vec<&Trip> = trips.collect();
        selected.sort_by_key(|trip| Reverse(trip.dates.start()));

        let rows = selected.into_iter().flat_map(|trip| {
            if trip.group_members.is_empty() {
                vec![TripMemberRow::from_parts(trip, None)]
            } else {
                trip.group_members
                    .iter()
                    .map(|member| TripMemberRow::from_parts(trip, Some(member)))
                    .collect()
            }
        });

        aggregate_trip_rows(rows).map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }
}

#[async_trait::async_trait]
impl TripStore for HashmapTripStore {
    async fn add_trip(&mut self, trip: &Trip) -> Result<(), TripStoreError> {
        if self.find(&trip.trip_id).is_ok() {
            return Err(TripStoreError::TripIDExists);
        }
        self.trips.push(trip.clone());
        Ok(())
    }

    async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, TripStoreError> {
        self.find(trip_id).cloned()
    }

    async fn get_trips_with_members(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Trip>, TripStoreError> {
        self.select(
            self.trips
                .iter()
                .filter(|trip| &trip.customer_id == customer_id),
        )
    }

    async fn get_invited_trips(
        &self,
        email: &Email,
    ) -> Result<Vec<Trip>, TripStoreError> {
        self.select(self.trips.iter().filter(|trip| {
            trip.group_members
                .iter()
                .any(|member| member.email.matches(email))
        }))
    }

    async fn get_members(
        &self,
        trip_id: &TripId,
    ) -> Result<Vec<Member>, TripStoreError> {
        Ok(self
            .trips
            .iter()
            .filter(|trip| &trip.trip_id == trip_id)
            .flat_map(|trip| trip.group_members.iter().cloned())
            .collect())
    }

    async fn update_trip(
        &mut self,
        trip_id: &TripId,
        trip_name: &TripName,
        dates: &TripDates,
        changes: &MemberChanges,
    ) -> Result<(), TripStoreError> {
        let trip = self.find_mut(trip_id)?;
        trip.trip_name = trip_name.clone();
        trip.dates = *dates;
        apply_member_changes(&mut trip.group_members, changes);
        Ok(())
    }

    async fn delete_trip(&mut self, trip_id: &TripId) -> Result<(), TripStoreError> {
        let before = self.trips.len();
        self.trips.retain(|trip| &trip.trip_id != trip_id);
        if self.trips.len() == before {
            return Err(TripStoreError::TripIDNotFound);
        }
        Ok(())
    }

    async fn link_members(
        &mut self,
        email: &Email,
        customer_id: &UserId,
    ) -> Result<u64, TripStoreError> {
        let mut linked = 0;
        for member in self
            .trips
            .iter_mut()
            .flat_map(|trip| trip.group_members.iter_mut())
            .filter(|member| member.email.matches(email))
        {
            member.customer_id = Some(*customer_id);
            member.status = MemberStatus::Accepted;
            linked += 1;
        }
        Ok(linked)
    }
}
