use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, Extension, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use confide_application::RateLimitRule;
use confide_core::AppError;
use confide_domain::RateLimitDecision;
use tracing::warn;

use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;

const UNKNOWN_CLIENT: &str = "unknown";
const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";

/// Gives axum's bodiless 405 the JSON error payload, keeping its `Allow`
/// header.
pub async fn method_not_allowed_json(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let mut json_response = (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new(METHOD_NOT_ALLOWED_MESSAGE)),
    )
        .into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        json_response
            .headers_mut()
            .insert(header::ALLOW, allow.clone());
    }

    json_response
}

/// Counts the request against the route group's rule before anything else
/// runs. Rejected requests never reach authentication.
pub async fn rate_limit(
    State(state): State<AppState>,
    Extension(rule): Extension<RateLimitRule>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let client = client_identifier(&request);

    if let RateLimitDecision::Rejected {
        retry_after_seconds,
    } = state.rate_limit_service.check_and_consume(&rule, &client)
    {
        warn!(
            category = %rule.category,
            client = %client,
            retry_after_seconds,
            "rate limit exceeded"
        );
        return Err(AppError::RateLimited {
            retry_after_seconds,
        }
        .into());
    }

    Ok(next.run(request).await)
}

/// Resolves the bearer token to a live user and stores the user record in
/// the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_owned()))?;
    let user = state.user_service.authenticate(&token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn client_identifier(request: &Request) -> String {
    forwarded_client(request.headers())
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(address)| address.ip().to_string())
        })
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_owned())
}

fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    let scheme = parts.next()?;
    let token = parts.next().filter(|token| !token.is_empty())?;

    (scheme == "Bearer").then(|| token.to_owned())
}
