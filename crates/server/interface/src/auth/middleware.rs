//! Request authentication gate.
//!
//! One middleware serves both credential transports. Standard calls carry
//! `Authorization: Bearer <token>`; connection-upgrade requests carry a
//! `token` query parameter instead, because upgrade requests cannot rely
//! on the header convention from browser clients. The gate branches once
//! on the upgrade predicate, then both paths converge on a single
//! verification call.

use axum::{
    Json,
    extract::{Query, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::auth::jwt::Claims;
use crate::http::ErrorBody;
use crate::state::AppState;

/// Verified identity attached to the request once the gate passes.
///
/// Downstream handlers identify the caller by `claims.sub`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: Claims,
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

enum GateRejection {
    MissingCredential(&'static str),
    InvalidCredential,
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let message = match self {
            GateRejection::MissingCredential(message) => message,
            // Codec detail stays in the log; the caller learns only that
            // the credential did not pass.
            GateRejection::InvalidCredential => "invalid or expired token",
        };

        (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
    }
}

/// Authentication gate applied as a route layer on protected routes.
///
/// Rejections short-circuit: no downstream handler runs, and for upgrade
/// requests no handshake is performed.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match extract_credential(&request) {
        Ok(token) => token,
        Err(rejection) => return rejection.into_response(),
    };

    match state.codec.verify(&token) {
        Ok(claims) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { claims });
            next.run(request).await
        }
        Err(e) => {
            warn!(error = %e, "credential rejected");
            GateRejection::InvalidCredential.into_response()
        }
    }
}

fn extract_credential(request: &Request) -> Result<String, GateRejection> {
    if is_upgrade_request(request) {
        token_from_query(request).ok_or(GateRejection::MissingCredential(
            "authentication token is required as a query parameter 'token'",
        ))
    } else {
        token_from_bearer_header(request).ok_or(GateRejection::MissingCredential(
            "Authorization header is required and must be a Bearer token",
        ))
    }
}

fn is_upgrade_request(request: &Request) -> bool {
    let upgrade = request
        .headers()
        .get(header::UPGRADE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("websocket"));

    let connection_upgrade = request
        .headers()
        .get(header::CONNECTION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().contains("upgrade"));

    upgrade && connection_upgrade
}

fn token_from_query(request: &Request) -> Option<String> {
    Query::<TokenQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(query)| query.token)
        .filter(|token| !token.is_empty())
}

fn token_from_bearer_header(request: &Request) -> Option<String> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = value.strip_prefix("Bearer ")?;

    (!token.is_empty()).then(|| token.to_string())
}
