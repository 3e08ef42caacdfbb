// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes, plus the per-user workout history and statistics views.

use crate::error::Result;
use crate::models::{NewUser, TimeRange, User, UserPatch, UserStats, Workout};
use crate::routes::DeleteResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{user_id}/workouts", get(list_user_workouts))
        .route("/api/users/{user_id}/stats", get(get_user_stats))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>> {
    Ok(Json(state.users.get(&user_id).await?))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(payload) = payload?;
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(patch) = payload?;
    Ok(Json(state.users.update(&user_id, patch).await?))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.users.delete(&user_id).await?;
    Ok(Json(DeleteResponse::new("User deleted successfully")))
}

/// All workouts referencing this user, whether or not the user still exists.
async fn list_user_workouts(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.workouts.list_for_user(&user_id).await?))
}

#[derive(Deserialize)]
struct StatsQuery {
    /// Window for the workout-time total
    #[serde(default = "default_time_range")]
    time_range: TimeRange,
    /// Window for the calories total
    #[serde(default = "default_calorie_range")]
    calorie_range: TimeRange,
}

fn default_time_range() -> TimeRange {
    TimeRange::Daily
}
fn default_calorie_range() -> TimeRange {
    TimeRange::Weekly
}

/// Summary figures for the user detail view, evaluated on the server's
/// local calendar.
async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    query: std::result::Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<UserStats>> {
    let Query(params) = query?;
    let now = chrono::Local::now();

    let stats = state
        .stats
        .user_stats(&user_id, params.time_range, params.calorie_range, &now)
        .await?;

    Ok(Json(stats))
}
