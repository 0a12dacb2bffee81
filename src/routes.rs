use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::protected::{auth as protected_auth, surveys};
use crate::handlers::public::auth as public_auth;
use crate::middleware::auth::jwt_auth;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(protected_routes(state.clone()))
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(public_auth::register))
        .route("/api/auth/login", post(public_auth::login))
        .route("/api/auth/refresh", post(public_auth::refresh))
        .route("/api/auth/logout", post(public_auth::logout))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/surveys",
            post(surveys::survey_create).get(surveys::survey_list),
        )
        // Static segment must be declared alongside the :id routes
        .route("/api/surveys/analytics", get(surveys::analytics_get))
        .route(
            "/api/surveys/:id",
            get(surveys::survey_show)
                .put(surveys::survey_update)
                .delete(surveys::survey_delete),
        )
        .route("/api/auth/whoami", get(protected_auth::whoami))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Surveyflow API",
            "version": version,
            "description": "Survey eligibility-flow builder backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/auth/register, /api/auth/login, /api/auth/refresh, /api/auth/logout (public)",
                "whoami": "/api/auth/whoami (protected)",
                "surveys": "/api/surveys[/:id] (protected)",
                "analytics": "/api/surveys/analytics (protected)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.surveys.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
