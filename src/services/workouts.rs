// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout CRUD service.

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::{NewWorkout, Workout, WorkoutPatch};
use crate::time_utils::now_rfc3339;
use validator::Validate;

/// Create, read, update and delete workouts by `workout_id`.
///
/// The owning `user_id` is stored as given; it is never checked against
/// the users collection.
#[derive(Clone)]
pub struct WorkoutService {
    store: EntityStore,
}

impl WorkoutService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Workout>> {
        self.store.list_workouts().await
    }

    /// Every workout referencing `user_id`, including orphans of deleted users.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Workout>> {
        self.store.list_workouts_for_user(user_id).await
    }

    pub async fn get(&self, workout_id: &str) -> Result<Workout> {
        self.store
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| not_found(workout_id))
    }

    /// Validate and persist a new workout.
    pub async fn create(&self, payload: NewWorkout) -> Result<Workout> {
        payload.validate()?;

        let NewWorkout {
            workout_id: Some(workout_id),
            user_id: Some(user_id),
            workout_type: Some(workout_type),
            duration: Some(duration),
            calories_burned: Some(calories_burned),
            date,
        } = payload
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let now = now_rfc3339();
        let workout = Workout {
            workout_id,
            user_id,
            workout_type,
            duration,
            calories_burned,
            date,
            created_at: now.clone(),
            updated_at: now,
        };

        self.store.insert_workout(&workout).await?;
        tracing::info!(
            workout_id = %workout.workout_id,
            user_id = %workout.user_id,
            workout_type = %workout.workout_type,
            "Workout created"
        );

        Ok(workout)
    }

    /// Apply a partial update. The `workout_id` itself never changes.
    pub async fn update(&self, workout_id: &str, patch: WorkoutPatch) -> Result<Workout> {
        patch.validate()?;

        tracing::debug!(workout_id, patch = ?patch, "Applying workout update");
        let workout = self
            .store
            .update_workout(workout_id, patch, &now_rfc3339())
            .await?
            .ok_or_else(|| not_found(workout_id))?;
        tracing::info!(workout_id, "Workout updated");

        Ok(workout)
    }

    pub async fn delete(&self, workout_id: &str) -> Result<()> {
        self.get(workout_id).await?;
        self.store.delete_workout(workout_id).await?;
        tracing::info!(workout_id, "Workout deleted");
        Ok(())
    }
}

fn not_found(workout_id: &str) -> AppError {
    AppError::NotFound(format!("Workout {} not found", workout_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> WorkoutService {
        WorkoutService::new(EntityStore::in_memory())
    }

    fn running(workout_id: &str, user_id: &str) -> NewWorkout {
        serde_json::from_value(json!({
            "workout_id": workout_id,
            "user_id": user_id,
            "type": "Running",
            "duration": 30,
            "calories_burned": 280,
            "date": "2025-03-01",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let workouts = service();
        let created = workouts.create(running("W1", "U1")).await.unwrap();

        let fetched = workouts.get("W1").await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.workout_type, "Running");
        assert_eq!(fetched.duration, 30.0);
        assert_eq!(fetched.date.as_deref(), Some("2025-03-01"));
    }

    #[tokio::test]
    async fn test_create_without_duration_is_rejected() {
        let payload: NewWorkout = serde_json::from_value(json!({
            "workout_id": "W1",
            "user_id": "U1",
            "type": "Running",
            "calories_burned": 280,
        }))
        .unwrap();

        let workouts = service();
        let err = workouts.create(payload).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(workouts.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_id_is_not_enforced() {
        let workouts = service();
        workouts.create(running("W1", "nobody")).await.unwrap();

        let owned = workouts.list_for_user("nobody").await.unwrap();
        assert_eq!(owned.len(), 1);
    }

    #[tokio::test]
    async fn test_list_for_user_matches_exactly() {
        let workouts = service();
        workouts.create(running("W1", "U1")).await.unwrap();
        workouts.create(running("W2", "U2")).await.unwrap();
        workouts.create(running("W3", "u1")).await.unwrap();

        let owned = workouts.list_for_user("U1").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].workout_id, "W1");
    }

    #[tokio::test]
    async fn test_update_cannot_change_workout_id() {
        let workouts = service();
        workouts.create(running("W1", "U1")).await.unwrap();

        let patch: WorkoutPatch = serde_json::from_value(json!({
            "workout_id": "W2",
            "duration": "45",
        }))
        .unwrap();
        let updated = workouts.update("W1", patch).await.unwrap();

        assert_eq!(updated.workout_id, "W1");
        assert_eq!(updated.duration, 45.0);
        assert!(workouts.get("W2").await.is_err());
        assert_eq!(workouts.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_update_changes_nothing() {
        let workouts = service();
        workouts.create(running("W1", "U1")).await.unwrap();

        let patch: WorkoutPatch = serde_json::from_value(json!({
            "type": "Cycling",
            "calories_burned": -5,
        }))
        .unwrap();
        let err = workouts.update("W1", patch).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let workout = workouts.get("W1").await.unwrap();
        assert_eq!(workout.workout_type, "Running");
        assert_eq!(workout.calories_burned, 280.0);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let workouts = service();
        workouts.create(running("W1", "U1")).await.unwrap();
        workouts.delete("W1").await.unwrap();

        assert!(matches!(
            workouts.get("W1").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_after_delete_is_not_found() {
        let workouts = service();
        workouts.create(running("W1", "U1")).await.unwrap();
        workouts.delete("W1").await.unwrap();

        let patch: WorkoutPatch = serde_json::from_value(json!({ "duration": 50 })).unwrap();
        let err = workouts.update("W1", patch).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(workouts.list().await.unwrap().is_empty());
    }
}
