// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User CRUD service.

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User, UserPatch};
use crate::time_utils::now_rfc3339;
use validator::Validate;

/// Create, read, update and delete users by `user_id`.
#[derive(Clone)]
pub struct UserService {
    store: EntityStore,
}

impl UserService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    pub async fn get(&self, user_id: &str) -> Result<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| not_found(user_id))
    }

    /// Validate and persist a new user.
    ///
    /// Only `user_id` and `name` are required; measurements default to 0.
    pub async fn create(&self, payload: NewUser) -> Result<User> {
        payload.validate()?;

        let NewUser {
            user_id: Some(user_id),
            name: Some(name),
            age,
            weight,
            height,
            photo,
        } = payload
        else {
            return Err(AppError::Validation(
                "user_id and name are required".to_string(),
            ));
        };

        let now = now_rfc3339();
        let user = User {
            user_id,
            name,
            age: age.unwrap_or(0.0),
            weight: weight.unwrap_or(0.0),
            height: height.unwrap_or(0.0),
            photo,
            created_at: now.clone(),
            updated_at: now,
        };

        self.store.insert_user(&user).await?;
        tracing::info!(user_id = %user.user_id, "User created");

        Ok(user)
    }

    /// Apply a partial update. The `user_id` itself never changes.
    pub async fn update(&self, user_id: &str, patch: UserPatch) -> Result<User> {
        patch.validate()?;

        let user = self
            .store
            .update_user(user_id, patch, &now_rfc3339())
            .await?
            .ok_or_else(|| not_found(user_id))?;
        tracing::info!(user_id, "User updated");

        Ok(user)
    }

    /// Delete a user. Their workouts are not touched.
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        // Firestore deletes of missing documents succeed silently.
        self.get(user_id).await?;
        self.store.delete_user(user_id).await?;
        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}

fn not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", user_id))
}
