use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use super::TripResponse;
use crate::{
    domain::{TripAPIError, UserId},
    utils::auth::get_claims,
    AppState,
};

/// Trips owned by the session's customer with their members, latest start
/// date first.
#[tracing::instrument(name = "List trips route handler", skip_all)]
pub async fn list_trips(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(customer_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<Vec<TripResponse>>), TripAPIError> {
    let claims = get_claims(&jar)?;
    let customer_id = UserId::parse(&customer_id)?;
    claims.ensure_customer(&customer_id)?;

    let trips = state
        .trip_store
        .read()
        .await
        .get_trips_with_members(&customer_id)
        .await
        .map_err(|e| TripAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(trips.iter().map(TripResponse::from).collect());

    Ok((StatusCode::OK, jar, response))
}
