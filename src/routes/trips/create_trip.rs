use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use super::{parse_members, MemberRequest, TripResponse};
use crate::{
    domain::{Trip, TripAPIError, TripDates, TripName, UserId},
    services::invitations::send_invitations,
    utils::{auth::get_claims, constants::INVITE_BASE_URL},
    AppState,
};

#[tracing::instrument(name = "Create trip route handler", skip_all)]
pub async fn create_trip(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, CookieJar, Json<CreateTripResponse>), TripAPIError> {
    let claims = get_claims(&jar)?;
    let customer_id = UserId::parse(&request.customer_id)?;
    claims.ensure_customer(&customer_id)?;

    let trip_name = TripName::parse(&request.trip_name)?;
    let dates = TripDates::parse(&request.start_date, &request.end_date)?;
    let members = parse_members(request.group_members)?;

    let trip = Trip::new(customer_id, trip_name, dates, &members);

    state
        .trip_store
        .write()
        .await
        .add_trip(&trip)
        .await
        .map_err(|e| TripAPIError::UnexpectedError(eyre!(e)))?;

    send_invitations(
        state.email_client.clone(),
        &INVITE_BASE_URL,
        &trip.trip_name,
        &trip.group_members,
    );

    let message = if members.is_empty() {
        "Trip created"
    } else {
        "Trip and group created"
    };
    let response = Json(CreateTripResponse {
        message: message.to_owned(),
        trip: TripResponse::from(&trip),
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub customer_id: String,
    pub trip_name: String,
    pub start_date: String,
    pub end_date: String,
    pub group_members: Option<Vec<MemberRequest>>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTripResponse {
    pub message: String,
    pub trip: TripResponse,
}
