//! Account endpoints: registration, login, profile.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use ordex_server_infrastructure::store::User;

use crate::auth::middleware::AuthenticatedUser;
use crate::http::ErrorBody;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/users` — create an account. Only the bcrypt hash of the
/// password is stored.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    if request.username.is_empty() || request.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("username and password are required")),
        )
            .into_response();
    }

    // bcrypt is CPU-bound; keep it off the async workers.
    let password = request.password.clone();
    let hashed =
        tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await;

    let password_hash = match hashed {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            warn!(error = %e, "password hashing failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to create user")),
            )
                .into_response();
        }
        Err(e) => {
            warn!(error = %e, "password hashing task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to create user")),
            )
                .into_response();
        }
    };

    let user = User {
        username: request.username.clone(),
        password: password_hash,
        prefix: request.prefix,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        date_of_birth: request.date_of_birth,
    };

    if !state.users.insert(user) {
        return (
            StatusCode::CONFLICT,
            Json(ErrorBody::new("username already exists")),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({"status": "success", "username": request.username})),
    )
        .into_response()
}

/// `POST /api/login` — verify the password, then issue a signed
/// credential for the principal.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let Some(user) = state.users.get(&request.username) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("user not found")),
        )
            .into_response();
    };

    let password = request.password;
    let stored_hash = user.password.clone();
    let verified =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored_hash)).await;

    match verified {
        Ok(Ok(true)) => {}
        Ok(Ok(false)) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody::new("invalid password")),
            )
                .into_response();
        }
        Ok(Err(e)) => {
            warn!(error = %e, "password verification failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to verify password")),
            )
                .into_response();
        }
        Err(e) => {
            warn!(error = %e, "password verification task failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to verify password")),
            )
                .into_response();
        }
    }

    match state.codec.issue(&user.username) {
        Ok(token) => Json(json!({"status": "success", "token": token})).into_response(),
        Err(e) => {
            warn!(error = %e, "credential issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("failed to generate token")),
            )
                .into_response()
        }
    }
}

/// `GET /api/profile` — protected; the caller is identified by the
/// verified claims the gate attached, never by anything in the request
/// body.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Response {
    let Some(record) = state.users.get(&user.claims.sub) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("user not found")),
        )
            .into_response();
    };

    Json(json!({
        "status": "success",
        "data": {
            "username": record.username,
            "prefix": record.prefix,
            "first_name": record.first_name,
            "last_name": record.last_name,
            "email": record.email,
        }
    }))
    .into_response()
}
