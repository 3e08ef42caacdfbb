// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::numeric;

/// User profile stored in Firestore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Caller-assigned business id (also used as document ID)
    pub user_id: String,
    /// Display name
    pub name: String,
    /// Age in years
    #[serde(default)]
    pub age: f64,
    /// Weight in kg
    #[serde(default)]
    pub weight: f64,
    /// Height in cm
    #[serde(default)]
    pub height: f64,
    /// Profile picture URL or inline data URL
    #[serde(default)]
    pub photo: Option<String>,
    /// When the record was created (RFC3339)
    #[serde(default)]
    pub created_at: String,
    /// When the record was last modified (RFC3339)
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for creating a user.
///
/// Missing or unparseable body measurements become 0.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        required(message = "user_id is required"),
        length(min = 1, message = "user_id must not be empty")
    )]
    pub user_id: Option<String>,
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub height: Option<f64>,
    pub photo: Option<String>,
}

/// Partial update for a user.
///
/// `user_id` is deliberately absent: unknown fields in the body are ignored,
/// so a payload carrying a different id cannot rename the record.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub age: Option<f64>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "numeric::deserialize_coerced")]
    pub height: Option<f64>,
    pub photo: Option<String>,
}

impl UserPatch {
    /// Stored field names this patch writes, not counting `updated_at`.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("age", self.age.is_some()),
            ("weight", self.weight.is_some()),
            ("height", self.height.is_some()),
            ("photo", self.photo.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }

    /// Overwrite the fields present in this patch.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(weight) = self.weight {
            user.weight = weight;
        }
        if let Some(height) = self.height {
            user.height = height;
        }
        if let Some(photo) = self.photo {
            user.photo = Some(photo);
        }
    }
}
