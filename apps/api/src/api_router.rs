use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};
use confide_application::RateLimitRule;
use confide_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;


const RATE_WINDOW_SECONDS: i64 = 60;

/// Per-category request budgets, each counted over a one minute window.
const RATE_LIMITS: [(&str, u32); 12] = [
    ("auth-signup", 10),
    ("auth-login", 20),
    ("auth-me", 120),
    ("billing-fake-payment", 30),
    ("account", 30),
    ("profile", 180),
    ("logs", 120),
    ("logs-item", 120),
    ("sessions", 180),
    ("sessions-item", 180),
    ("homework", 200),
    ("homework-item", 200),
];

fn rate_rule(category: &str) -> Result<RateLimitRule, AppError> {
    RATE_LIMITS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(name, limit)| RateLimitRule::new(*name, *limit, RATE_WINDOW_SECONDS))
        .ok_or_else(|| {
            AppError::Internal(format!("no rate limit configured for category '{category}'"))
        })
}

/// Wraps a route group with rate limiting and, when `authenticated`, bearer
/// auth. Rate limiting always runs first.
fn guarded(
    routes: Router<AppState>,
    app_state: &AppState,
    category: &str,
    authenticated: bool,
) -> Result<Router<AppState>, AppError> {
    let routes = if authenticated {
        routes.route_layer(from_fn_with_state(app_state.clone(), middleware::require_auth))
    } else {
        routes
    };

    Ok(routes
        .route_layer(from_fn_with_state(app_state.clone(), middleware::rate_limit))
        .layer(Extension(rate_rule(category)?)))
}

pub fn build_router(app_state: AppState, cors_origins: &[String]) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(cors_origins)?;

    let signup_routes = guarded(
        Router::new().route("/api/auth/signup", post(handlers::auth::signup_handler)),
        &app_state,
        "auth-signup",
        false,
    )?;
    let login_routes = guarded(
        Router::new().route("/api/auth/login", post(handlers::auth::login_handler)),
        &app_state,
        "auth-login",
        false,
    )?;
    let me_routes = guarded(
        Router::new().route("/api/auth/me", get(handlers::auth::me_handler)),
        &app_state,
        "auth-me",
        true,
    )?;
    let billing_routes = guarded(
        Router::new().route(
            "/api/billing/fake-payment",
            post(handlers::billing::fake_payment_handler),
        ),
        &app_state,
        "billing-fake-payment",
        true,
    )?;
    let account_routes = guarded(
        Router::new().route(
            "/api/account",
            delete(handlers::account::delete_account_handler),
        ),
        &app_state,
        "account",
        true,
    )?;
    let profile_routes = guarded(
        Router::new().route(
            "/api/profile",
            get(handlers::profile::get_profile_handler)
                .put(handlers::profile::update_profile_handler),
        ),
        &app_state,
        "profile",
        true,
    )?;
    let log_routes = guarded(
        Router::new().route(
            "/api/logs",
            get(handlers::logs::list_logs_handler).post(handlers::logs::create_log_handler),
        ),
        &app_state,
        "logs",
        true,
    )?;
    let log_item_routes = guarded(
        Router::new().route(
            "/api/logs/{log_id}",
            patch(handlers::logs::update_log_handler).delete(handlers::logs::delete_log_handler),
        ),
        &app_state,
        "logs-item",
        true,
    )?;
    let session_routes = guarded(
        Router::new().route(
            "/api/sessions",
            get(handlers::sessions::list_sessions_handler)
                .post(handlers::sessions::create_session_handler),
        ),
        &app_state,
        "sessions",
        true,
    )?;
    let session_item_routes = guarded(
        Router::new().route(
            "/api/sessions/{session_id}",
            patch(handlers::sessions::update_session_handler)
                .delete(handlers::sessions::delete_session_handler),
        ),
        &app_state,
        "sessions-item",
        true,
    )?;
    let homework_routes = guarded(
        Router::new().route(
            "/api/homework",
            get(handlers::homework::list_homework_handler)
                .post(handlers::homework::create_homework_handler),
        ),
        &app_state,
        "homework",
        true,
    )?;
    let homework_item_routes = guarded(
        Router::new().route(
            "/api/homework/{homework_id}",
            patch(handlers::homework::update_homework_handler)
                .delete(handlers::homework::delete_homework_handler),
        ),
        &app_state,
        "homework-item",
        true,
    )?;

    Ok(Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route("/api/users/count", get(handlers::users::user_count_handler))
        .merge(signup_routes)
        .merge(login_routes)
        .merge(me_routes)
        .merge(billing_routes)
        .merge(account_routes)
        .merge(profile_routes)
        .merge(log_routes)
        .merge(log_item_routes)
        .merge(session_routes)
        .merge(session_item_routes)
        .merge(homework_routes)
        .merge(homework_item_routes)
        .layer(from_fn(middleware::method_not_allowed_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(from_fn(cors::preflight_no_content))
        .with_state(app_state))
}
