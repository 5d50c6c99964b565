use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{AuthAPIError, Email, Password, User, UserStoreError},
    utils::auth::generate_auth_cookie,
};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), AuthAPIError> {
    let email = Email::parse(Secret::new(request.email))?;
    let password = Password::parse(request.password)?;
    let user_store = &state.user_store.read().await;

    user_store
        .validate_user(&email, &password)
        .await
        .map_err(|e| match e {
            UserStoreError::InvalidCredentials
            | UserStoreError::UserNotFound => {
                AuthAPIError::IncorrectCredentials
            }
            _ => AuthAPIError::UnexpectedError(eyre!(e)),
        })?;

    let user = user_store
        .get_user(&email)
        .await
        .map_err(|e| AuthAPIError::UnexpectedError(eyre!(e)))?;

    let auth_cookie = generate_auth_cookie(&user.email, &user.id)
        .map_err(AuthAPIError::UnexpectedError)?;
    let updated_jar = jar.add(auth_cookie);

    let response = Json(LoginResponse {
        message: "Login successful".to_string(),
        customer: CustomerResponse::from(&user),
    });

    Ok((StatusCode::OK, updated_jar, response))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub customer: CustomerResponse,
}

/// The customer's profile as shown after login. Never carries the hash.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct CustomerResponse {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub travel_interests: Option<String>,
    pub dob: Option<String>,
}

impl From<&User> for CustomerResponse {
    fn from(user: &User) -> Self {
        let profile = &user.profile;
        Self {
            customer_id: user.id.to_string(),
            first_name: profile.first_name.as_ref().to_owned(),
            last_name: profile.last_name.as_ref().to_owned(),
            email: user.email.as_ref().expose_secret().to_owned(),
            address: profile.address.clone(),
            phone_number: profile
                .phone_number
                .as_ref()
                .map(|number| number.as_ref().to_owned()),
            travel_interests: profile.travel_interests.clone(),
            dob: profile.dob.map(|dob| dob.to_string()),
        }
    }
}
