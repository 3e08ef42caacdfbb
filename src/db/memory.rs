// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store for local development and tests.
//!
//! Mirrors the Firestore layout: one map per collection, keyed by business id.

use crate::error::AppError;
use crate::models::{User, UserPatch, Workout, WorkoutPatch};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory collections. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, User>>,
    workouts: Arc<DashMap<String, Workout>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn list_users(&self) -> Vec<User> {
        self.users.iter().map(|e| e.value().clone()).collect()
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|e| e.value().clone())
    }

    pub fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self.users.entry(user.user_id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "User {} already exists",
                user.user_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    /// Patch a user in place under the entry lock. `None` if absent.
    pub fn update_user(&self, user_id: &str, patch: UserPatch, updated_at: &str) -> Option<User> {
        let mut entry = self.users.get_mut(user_id)?;
        patch.apply(entry.value_mut());
        entry.updated_at = updated_at.to_string();
        Some(entry.value().clone())
    }

    pub fn delete_user(&self, user_id: &str) {
        self.users.remove(user_id);
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub fn list_workouts(&self) -> Vec<Workout> {
        self.workouts.iter().map(|e| e.value().clone()).collect()
    }

    pub fn list_workouts_for_user(&self, user_id: &str) -> Vec<Workout> {
        self.workouts
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect()
    }

    pub fn get_workout(&self, workout_id: &str) -> Option<Workout> {
        self.workouts.get(workout_id).map(|e| e.value().clone())
    }

    pub fn insert_workout(&self, workout: &Workout) -> Result<(), AppError> {
        match self.workouts.entry(workout.workout_id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(format!(
                "Workout {} already exists",
                workout.workout_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(workout.clone());
                Ok(())
            }
        }
    }

    /// Patch a workout in place under the entry lock. `None` if absent.
    pub fn update_workout(
        &self,
        workout_id: &str,
        patch: WorkoutPatch,
        updated_at: &str,
    ) -> Option<Workout> {
        let mut entry = self.workouts.get_mut(workout_id)?;
        patch.apply(entry.value_mut());
        entry.updated_at = updated_at.to_string();
        Some(entry.value().clone())
    }

    pub fn delete_workout(&self, workout_id: &str) {
        self.workouts.remove(workout_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            user_id: id.to_string(),
            name: "Test".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let db = MemoryDb::new();
        db.insert_user(&user("U1")).unwrap();

        let err = db.insert_user(&user("U1")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(db.list_users().len(), 1);
    }

    #[test]
    fn test_clones_share_data() {
        let db = MemoryDb::new();
        let other = db.clone();
        db.insert_user(&user("U1")).unwrap();

        assert!(other.get_user("U1").is_some());
        other.delete_user("U1");
        assert!(db.get_user("U1").is_none());
    }

    #[test]
    fn test_update_after_delete_does_not_recreate() {
        let db = MemoryDb::new();
        db.insert_user(&user("U1")).unwrap();
        db.delete_user("U1");

        let patch = UserPatch {
            name: Some("Back".to_string()),
            ..Default::default()
        };
        assert!(db.update_user("U1", patch, "2025-01-01T00:00:00Z").is_none());
        assert!(db.get_user("U1").is_none());
    }

    #[test]
    fn test_updates_to_different_fields_both_stick() {
        let db = MemoryDb::new();
        db.insert_user(&user("U1")).unwrap();
        let writer = db.clone();

        let name = UserPatch {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        let age = UserPatch {
            age: Some(31.0),
            ..Default::default()
        };
        writer.update_user("U1", name, "2025-01-01T00:00:00Z").unwrap();
        let updated = db.update_user("U1", age, "2025-01-02T00:00:00Z").unwrap();

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.age, 31.0);
        assert_eq!(updated.updated_at, "2025-01-02T00:00:00Z");
        assert_eq!(db.get_user("U1"), Some(updated));
    }
}
