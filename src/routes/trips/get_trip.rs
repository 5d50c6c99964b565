use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;

use super::TripResponse;
use crate::{
    domain::{TripAPIError, TripId},
    utils::{auth::get_claims, trip::check_permissions_for_trip},
    AppState,
};

#[tracing::instrument(name = "Get trip route handler", skip_all)]
pub async fn get_trip(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(trip_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<TripResponse>), TripAPIError> {
    let customer_id = get_claims(&jar)?.customer_id();
    let trip_id = TripId::parse(&trip_id)?;

    let trip =
        check_permissions_for_trip(&state.trip_store, &customer_id, &trip_id)
            .await?;

    Ok((StatusCode::OK, jar, Json(TripResponse::from(&trip))))
}
