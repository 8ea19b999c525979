//! Customer account endpoints under `/api/users`.

use axum::{Extension, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::{
        AppState,
        error::AppJson,
        models::{
            ForgotPasswordRequest, LoginResponse, MessageResponse,
            RegisterRequest, ResetPasswordRequest, UpdateProfileRequest, UserLoginRequest,
            UserResponse,
        },
    },
    auth::Identity,
    core::user::{self, NewUser, ProfileUpdate},
    errors::{Error, Result},
};

fn customer_id(identity: &Identity) -> Result<i64> {
    if identity.is_admin() {
        return Err(Error::CustomerOnly);
    }
    Ok(identity.id)
}

/// `POST /api/users/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<(StatusCode, AppJson<UserResponse>)> {
    debug!("Registering {}", body.email);

    let user = user::register_user(
        &state.db,
        NewUser {
            name: body.name,
            email: body.email,
            password: body.password,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        AppJson(UserResponse {
            message: Some("Registrasi berhasil".to_string()),
            user,
        }),
    ))
}

/// `POST /api/users/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<UserLoginRequest>,
) -> Result<AppJson<LoginResponse>> {
    let user = user::authenticate_user(&state.db, &body.email, &body.password).await?;
    let token = state.tokens.issue(Identity::user(user.id))?;

    info!("User {} logged in", user.id);
    Ok(AppJson(LoginResponse {
        message: "Login berhasil".to_string(),
        token,
    }))
}

/// `GET /api/users/me`
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<AppJson<UserResponse>> {
    let user_id = customer_id(&identity)?;
    let user = user::get_user_by_id(&state.db, user_id)
        .await?
        .ok_or(Error::UserNotFound)?;

    Ok(AppJson(UserResponse {
        message: None,
        user,
    }))
}

/// `PUT /api/users/me`
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    AppJson(body): AppJson<UpdateProfileRequest>,
) -> Result<AppJson<UserResponse>> {
    let user_id = customer_id(&identity)?;
    debug!("Updating profile of user {}", user_id);

    let user = user::update_profile(
        &state.db,
        user_id,
        ProfileUpdate {
            name: body.name,
            email: body.email,
            old_password: body.old_password,
            new_password: body.new_password,
        },
    )
    .await?;

    Ok(AppJson(UserResponse {
        message: Some("Profil diperbarui".to_string()),
        user,
    }))
}

/// `POST /api/users/forgot-password`
///
/// The token is returned in the response; there is no mail delivery.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<ForgotPasswordRequest>,
) -> Result<AppJson<MessageResponse>> {
    // The token only leaves through the server log, never the response body
    let reset_token = user::request_password_reset(&state.db, &body.email).await?;
    info!("Password reset token for {}: {}", body.email.trim(), reset_token);

    Ok(AppJson(MessageResponse::new("Token reset berhasil dibuat")))
}

/// `POST /api/users/forgot-password/reset`
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<ResetPasswordRequest>,
) -> Result<AppJson<MessageResponse>> {
    user::reset_password(&state.db, &body.token, &body.new_password).await?;
    Ok(AppJson(MessageResponse::new("Password berhasil direset")))
}
