// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles, keyed by `user_id`)
//! - Workouts (keyed by `workout_id`)
//!
//! Document IDs are the URL-encoded business ids, so lookups never need a
//! query.

use crate::db::{collections, doc_id};
use crate::error::AppError;
use crate::models::{User, UserPatch, Workout, WorkoutPatch};
use firestore::errors::FirestoreError;
use firestore::FirestoreWritePrecondition;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline client for testing.
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// List every user.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by business id.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(&doc_id(user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a user. Fails with `Conflict` if the id is taken.
    pub async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let result: Result<(), FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(doc_id(&user.user_id))
            .object(user)
            .execute()
            .await;

        result.map_err(|e| conflict_or_database(e, "User", &user.user_id))
    }

    /// Write only the patched fields of an existing user.
    ///
    /// The document must exist, so an update racing a delete does not bring
    /// the user back. Returns the stored document after the write.
    pub async fn update_user(
        &self,
        user_id: &str,
        patch: UserPatch,
        updated_at: &str,
    ) -> Result<Option<User>, AppError> {
        let mut fields = patch.changed_fields();
        fields.push("updated_at");

        let mut staged = User {
            user_id: user_id.to_string(),
            updated_at: updated_at.to_string(),
            ..Default::default()
        };
        patch.apply(&mut staged);

        let result: Result<User, FirestoreError> = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::USERS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(doc_id(user_id))
            .object(&staged)
            .execute()
            .await;

        missing_or_database(result)
    }

    /// Delete a user document. Workouts referencing it are left alone.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(doc_id(user_id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// List every workout.
    pub async fn list_workouts(&self) -> Result<Vec<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List workouts whose `user_id` matches exactly.
    pub async fn list_workouts_for_user(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a workout by business id.
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(&doc_id(workout_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a workout. Fails with `Conflict` if the id is taken.
    pub async fn insert_workout(&self, workout: &Workout) -> Result<(), AppError> {
        let result: Result<(), FirestoreError> = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::WORKOUTS)
            .document_id(doc_id(&workout.workout_id))
            .object(workout)
            .execute()
            .await;

        result.map_err(|e| conflict_or_database(e, "Workout", &workout.workout_id))
    }

    /// Write only the patched fields of an existing workout.
    pub async fn update_workout(
        &self,
        workout_id: &str,
        patch: WorkoutPatch,
        updated_at: &str,
    ) -> Result<Option<Workout>, AppError> {
        let mut fields = patch.changed_fields();
        fields.push("updated_at");

        let mut staged = Workout {
            workout_id: workout_id.to_string(),
            updated_at: updated_at.to_string(),
            ..Default::default()
        };
        patch.apply(&mut staged);

        let result: Result<Workout, FirestoreError> = self
            .get_client()?
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::WORKOUTS)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(doc_id(workout_id))
            .object(&staged)
            .execute()
            .await;

        missing_or_database(result)
    }

    /// Delete a workout document.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(doc_id(workout_id))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Firestore reports an existing document on insert as a data conflict.
fn conflict_or_database(err: FirestoreError, kind: &str, id: &str) -> AppError {
    match err {
        FirestoreError::DataConflictError(_) => {
            AppError::Conflict(format!("{} {} already exists", kind, id))
        }
        other => AppError::Database(other.to_string()),
    }
}

/// A failed `Exists(true)` precondition comes back as not found.
fn missing_or_database<T>(result: Result<T, FirestoreError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(doc) => Ok(Some(doc)),
        Err(FirestoreError::DataNotFoundError(_)) => Ok(None),
        Err(other) => Err(AppError::Database(other.to_string())),
    }
}
