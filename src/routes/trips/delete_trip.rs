use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use super::TripMessageResponse;
use crate::{
    domain::{TripAPIError, TripId, TripStoreError},
    utils::{auth::get_claims, trip::check_permissions_for_trip},
    AppState,
};

#[tracing::instrument(name = "Delete trip route handler", skip_all)]
pub async fn delete_trip(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(trip_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<TripMessageResponse>), TripAPIError> {
    let customer_id = get_claims(&jar)?.customer_id();
    let trip_id = TripId::parse(&trip_id)?;

    check_permissions_for_trip(&state.trip_store, &customer_id, &trip_id).await?;

    state
        .trip_store
        .write()
        .await
        .delete_trip(&trip_id)
        .await
        .map_err(|e| match e {
            TripStoreError::TripIDNotFound => {
                TripAPIError::IDNotFoundError(*trip_id.as_ref())
            }
            e => TripAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(TripMessageResponse {
        message: "Trip deleted successfully".to_owned(),
    });

    Ok((StatusCode::OK, jar, response))
}
