use color_eyre::eyre::eyre;

use crate::{
    app_state::TripStoreType,
    domain::{Trip, TripAPIError, TripId, TripStoreError, UserId},
};

/// Loads a trip for its owner. A trip owned by another customer is reported
/// exactly like a missing one.
#[tracing::instrument(name = "Check customer permissions for trip", skip_all)]
pub async fn check_permissions_for_trip(
    trip_store: &TripStoreType,
    customer_id: &UserId,
    trip_id: &TripId,
) -> Result<Trip, TripAPIError> {
    let trip = trip_store
        .read()
        .await
        .get_trip(trip_id)
        .await
        .map_err(|e| match e {
            TripStoreError::TripIDNotFound => {
                TripAPIError::IDNotFoundError(*trip_id.as_ref())
            }
            err => TripAPIError::UnexpectedError(eyre!(err)),
        })?;

    if &trip.customer_id != customer_id {
        return Err(TripAPIError::IDNotFoundError(*trip_id.as_ref()));
    }

    Ok(trip)
}
