// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes.

use crate::error::Result;
use crate::models::{NewWorkout, Workout, WorkoutPatch};
use crate::routes::DeleteResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{workout_id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Workout>>> {
    Ok(Json(state.workouts.list().await?))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
) -> Result<Json<Workout>> {
    Ok(Json(state.workouts.get(&workout_id).await?))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewWorkout>, JsonRejection>,
) -> Result<(StatusCode, Json<Workout>)> {
    let Json(payload) = payload?;
    let workout = state.workouts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
    payload: std::result::Result<Json<WorkoutPatch>, JsonRejection>,
) -> Result<Json<Workout>> {
    let Json(patch) = payload?;
    Ok(Json(state.workouts.update(&workout_id, patch).await?))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.workouts.delete(&workout_id).await?;
    Ok(Json(DeleteResponse::new("Workout deleted successfully")))
}
