use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::Secret;

use super::TripResponse;
use crate::{
    domain::{AuthAPIError, Email, TripAPIError, UserId},
    utils::auth::get_claims,
    AppState,
};

#[tracing::instrument(name = "List invited trips route handler", skip_all)]
pub async fn list_invited_trips(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(customer_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<Vec<TripResponse>>), TripAPIError> {
    let claims = get_claims(&jar)?;
    let customer_id = UserId::parse(&customer_id)?;
    claims.ensure_customer(&customer_id)?;

    let email = Email::parse(Secret::new(claims.sub))
        .map_err(|_| AuthAPIError::InvalidToken)?;

    let trips = state
        .trip_store
        .read()
        .await
        .get_invited_trips(&email)
        .await
        .map_err(|e| TripAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(trips.iter().map(TripResponse::from).collect());

    Ok((StatusCode::OK, jar, response))
}
