use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use color_eyre::eyre::eyre;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{
        AuthAPIError, CalendarDate, Email, Password, PersonName, PhoneNumber,
        User, UserPasswordHash, UserProfile, UserStoreError,
    },
};

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthAPIError> {
    let email = Email::parse(Secret::new(request.email))?;
    let password = Password::parse(request.password)?;
    let profile = UserProfile {
        first_name: PersonName::parse(&request.first_name)?,
        last_name: PersonName::parse(&request.last_name)?,
        address: non_blank(request.address),
        phone_number: non_blank(request.phone_number)
            .map(|number| PhoneNumber::parse(&number))
            .transpose()?,
        travel_interests: non_blank(request.travel_interests),
        dob: non_blank(request.dob)
            .map(|dob| CalendarDate::parse(&dob))
            .transpose()?,
    };

    let hash = UserPasswordHash::from_password(&password)
        .await
        .map_err(AuthAPIError::UnexpectedError)?;
    let user = User::new(email, hash, profile);
    let (email, customer_id) = (user.email.clone(), user.id);

    {
        let mut user_store = state.user_store.write().await;
        user_store.add_user(user).await.map_err(|e| match e {
            UserStoreError::UserAlreadyExists => {
                AuthAPIError::UserAlreadyExists
            }
            err => AuthAPIError::UnexpectedError(eyre!(err)),
        })?;
    }

    let linked = state
        .trip_store
        .write()
        .await
        .link_members(&email, &customer_id)
        .await
        .map_err(|e| AuthAPIError::UnexpectedError(eyre!(e)))?;
    tracing::debug!(linked, "linked pending invitations to new customer");

    let response = Json(RegisterResponse {
        message: "User registered successfully".to_string(),
    });

    Ok((StatusCode::CREATED, response))
}

// Blank optional form fields arrive as empty strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Secret<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub travel_interests: Option<String>,
    pub dob: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}
