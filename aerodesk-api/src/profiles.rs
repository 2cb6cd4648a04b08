use aerodesk_core::Profile;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Profiles answer under both `/api/users` and `/api/profile`.
pub fn routes() -> Router<AppState> {
    let mut router = Router::new();
    for base in ["/api/users", "/api/profile"] {
        router = router
            .route(base, get(list_profiles).post(create_profile))
            .route(&format!("{}/{{email}}", base), delete(delete_profile));
    }
    router
}

async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    Ok(Json(state.profiles.list().await?))
}

async fn create_profile(
    State(state): State<AppState>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let Json(profile) = payload?;
    profile.validate()?;

    let profile = state.profiles.append(profile).await?;
    info!("Profile created for {}", profile.name);
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Removes every profile with this email. Succeeds whether or not one existed.
async fn delete_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, AppError> {
    let removed = state
        .profiles
        .remove(&|p: &Profile| p.has_email(&email))
        .await?;

    info!("Removed {} profile(s)", removed);
    Ok(Json(json!({ "success": true })))
}
