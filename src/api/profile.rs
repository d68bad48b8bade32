//! Profile endpoint

use axum::{extract::State, Json};

use crate::{models::profile::Profile, AppState};

/// Homepage owner profile, positions timeline and news
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Profile", body = Profile)
    )
)]
pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    Json(state.config.profile.clone())
}
