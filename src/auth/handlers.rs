use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, MethodRouter},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{CheckEmailRequest, CheckEmailResponse, Credentials, ResetPasswordRequest, SuccessResponse},
        extractors::JsonBody,
        repo::StoreError,
    },
    error::AppError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post_only(post(signup)))
        .route("/login", post_only(post(login)))
        .route("/check-email", post_only(post(check_email)))
        .route("/reset-password", post_only(post(reset_password)))
}

fn post_only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(method_not_allowed)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Credentials>,
) -> Result<Json<SuccessResponse>, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("signup missing email or password");
        return Err(AppError::MissingFields(
            "Please provide both email and password",
        ));
    }

    if state.users.count_by_email(&payload.email).await? > 0 {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::EmailTaken);
    }

    let hash = state.hasher.hash_blocking(payload.password).await?;

    match state.users.create(&payload.email, &hash).await {
        Ok(user) => info!(user_id = %user.id, email = %user.email, "user registered"),
        Err(StoreError::DuplicateEmail) => {
            // Concurrent signup inserted the row after our count.
            warn!(email = %payload.email, "email registered concurrently");
            return Err(AppError::EmailTaken);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Json(SuccessResponse::new("Signup successful")))
}

/// Unknown email, wrong password and lookup failures all answer the same 401.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Credentials>,
) -> Result<Json<SuccessResponse>, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        warn!("login missing email or password");
        return Err(AppError::MissingFields(
            "Please provide both email and password",
        ));
    }

    let user = match state.users.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::InvalidCredentials);
        }
    };

    let ok = match state
        .hasher
        .verify_blocking(payload.password, user.password_hash)
        .await
    {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !ok {
        warn!(email = %user.email, user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(SuccessResponse::new("Login successful")))
}

/// Reveals whether an account exists: 200 `{exists:true}` or 404 `{exists:false}`.
#[instrument(skip(state, payload))]
pub async fn check_email(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CheckEmailRequest>,
) -> Result<(StatusCode, Json<CheckEmailResponse>), AppError> {
    if payload.email.is_empty() {
        warn!("check-email missing email");
        return Err(AppError::MissingFields("Please provide an email"));
    }

    let exists = state.users.count_by_email(&payload.email).await? > 0;
    let status = if exists {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    Ok((status, Json(CheckEmailResponse { exists })))
}

/// Overwrites the stored hash for any existing email. Callers are not
/// authenticated.
#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if payload.email.is_empty() || payload.new_password.is_empty() {
        warn!("reset-password missing email or new_password");
        return Err(AppError::MissingFields(
            "Please provide both email and new password",
        ));
    }

    if state.users.count_by_email(&payload.email).await? == 0 {
        warn!(email = %payload.email, "reset-password unknown email");
        return Err(AppError::EmailNotFound);
    }

    let hash = state.hasher.hash_blocking(payload.new_password).await?;

    if !state.users.update_password(&payload.email, &hash).await? {
        warn!(email = %payload.email, "reset-password row vanished before update");
        return Err(AppError::EmailNotFound);
    }

    info!(email = %payload.email, "password reset");
    Ok(Json(SuccessResponse::new("Password reset successful")))
}
