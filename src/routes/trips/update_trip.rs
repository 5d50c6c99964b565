use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use super::{parse_members, MemberRequest, TripMessageResponse};
use crate::{
    domain::{
        reconcile_members, TripAPIError, TripDates, TripId, TripName,
        TripStoreError,
    },
    services::invitations::send_invitations,
    utils::{
        auth::get_claims, constants::INVITE_BASE_URL,
        trip::check_permissions_for_trip,
    },
    AppState,
};

/// Overwrites the trip fields and reconciles the stored members against the
/// submitted list. Only newly added members are invited.
#[tracing::instrument(name = "Update trip route handler", skip_all)]
pub async fn update_trip(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(trip_id): Path<String>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<(StatusCode, CookieJar, Json<TripMessageResponse>), TripAPIError> {
    let customer_id = get_claims(&jar)?.customer_id();
    let trip_id = TripId::parse(&trip_id)?;

    let trip_name = TripName::parse(&request.trip_name)?;
    let dates = TripDates::parse(&request.start_date, &request.end_date)?;
    let members = parse_members(request.group_members)?;

    check_permissions_for_trip(&state.trip_store, &customer_id, &trip_id).await?;

    let changes = {
        let mut trip_store = state.trip_store.write().await;

        let stored = trip_store
            .get_members(&trip_id)
            .await
            .map_err(|e| TripAPIError::UnexpectedError(eyre!(e)))?;
        let changes = reconcile_members(&trip_id, &stored, &members);

        trip_store
            .update_trip(&trip_id, &trip_name, &dates, &changes)
            .await
            .map_err(|e| match e {
                TripStoreError::TripIDNotFound => {
                    TripAPIError::IDNotFoundError(*trip_id.as_ref())
                }
                e => TripAPIError::UnexpectedError(eyre!(e)),
            })?;
        changes
    };

    send_invitations(
        state.email_client.clone(),
        &INVITE_BASE_URL,
        &trip_name,
        &changes.inserts,
    );

    let message = if members.is_empty() {
        "Trip updated (no group members)"
    } else {
        "Trip and group updated"
    };
    let response = Json(TripMessageResponse {
        message: message.to_owned(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub trip_name: String,
    pub start_date: String,
    pub end_date: String,
    pub group_members: Option<Vec<MemberRequest>>,
}
