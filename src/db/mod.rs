// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore, or in-memory for development).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::{User, UserPatch, Workout, WorkoutPatch};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
}

/// Document ID for a business id. Firestore IDs may not contain `/`.
pub fn doc_id(business_id: &str) -> String {
    urlencoding::encode(business_id).into_owned()
}

/// Persistence for users and workouts, keyed by business id.
///
/// Reads and writes are independent single-document operations; nothing
/// spans documents or collections. Updates are atomic per document, only
/// touch the patched fields, and never recreate a deleted record.
#[derive(Clone)]
pub enum EntityStore {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl EntityStore {
    /// Open the backend selected in the configuration.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.store_backend {
            StoreBackend::Firestore => Ok(Self::Firestore(
                FirestoreDb::new(&config.gcp_project_id).await?,
            )),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Self::Memory(MemoryDb::new()))
            }
        }
    }

    /// Fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryDb::new())
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        match self {
            Self::Firestore(db) => db.list_users().await,
            Self::Memory(db) => Ok(db.list_users()),
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.get_user(user_id).await,
            Self::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.insert_user(user).await,
            Self::Memory(db) => db.insert_user(user),
        }
    }

    /// Apply `patch` and stamp `updated_at`. `None` if the user does not exist.
    pub async fn update_user(
        &self,
        user_id: &str,
        patch: UserPatch,
        updated_at: &str,
    ) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(db) => db.update_user(user_id, patch, updated_at).await,
            Self::Memory(db) => Ok(db.update_user(user_id, patch, updated_at)),
        }
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.delete_user(user_id).await,
            Self::Memory(db) => {
                db.delete_user(user_id);
                Ok(())
            }
        }
    }

    // ─── Workouts ────────────────────────────────────────────────

    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        match self {
            Self::Firestore(db) => db.list_workouts().await,
            Self::Memory(db) => Ok(db.list_workouts()),
        }
    }

    pub async fn list_workouts_for_user(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        match self {
            Self::Firestore(db) => db.list_workouts_for_user(user_id).await,
            Self::Memory(db) => Ok(db.list_workouts_for_user(user_id)),
        }
    }

    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        match self {
            Self::Firestore(db) => db.get_workout(workout_id).await,
            Self::Memory(db) => Ok(db.get_workout(workout_id)),
        }
    }

    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.insert_workout(workout).await,
            Self::Memory(db) => db.insert_workout(workout),
        }
    }

    /// Apply `patch` and stamp `updated_at`. `None` if the workout does not exist.
    pub async fn update_workout(
        &self,
        workout_id: &str,
        patch: WorkoutPatch,
        updated_at: &str,
    ) -> Result<Option<Workout>, AppError> {
        match self {
            Self::Firestore(db) => db.update_workout(workout_id, patch, updated_at).await,
            Self::Memory(db) => Ok(db.update_workout(workout_id, patch, updated_at)),
        }
    }

    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.delete_workout(workout_id).await,
            Self::Memory(db) => {
                db.delete_workout(workout_id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_escapes_slashes() {
        assert_eq!(doc_id("U1"), "U1");
        assert_eq!(doc_id("team/alice"), "team%2Falice");
    }
}
