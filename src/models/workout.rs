// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::numeric;

/// Stored workout record in Firestore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    /// Caller-assigned business id (also used as document ID)
    pub workout_id: String,
    /// Owning user's business id (not enforced)
    pub user_id: String,
    /// Free-text workout type (Running, Yoga, ...)
    #[serde(rename = "type", default)]
    pub workout_type: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration: f64,
    /// Calories burned
    #[serde(default)]
    pub calories_burned: f64,
    /// Workout date as supplied by the client (`YYYY-MM-DD` or RFC3339)
    #[serde(default)]
    pub date: Option<String>,
    /// When the record was created (RFC3339)
    #[serde(default)]
    pub created_at: String,
    /// When the record was last modified (RFC3339)
    #[serde(default)]
    pub updated_at: String,
}

impl Workout {
    /// The workout date as an instant, if present and parseable.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_workout_date)
    }
}

/// Parse a client-supplied workout date.
///
/// Accepts RFC3339 timestamps and bare `YYYY-MM-DD` dates. Bare dates are
/// midnight UTC.
pub fn parse_workout_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Payload for creating a workout.
///
/// Unlike users, the numeric fields are mandatory and must be positive.
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_new_workout_date"))]
pub struct NewWorkout {
    #[validate(
        required(message = "workout_id is required"),
        length(min = 1, message = "workout_id must not be empty")
    )]
    pub workout_id: Option<String>,
    #[validate(
        required(message = "user_id is required"),
        length(min = 1, message = "user_id must not be empty")
    )]
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    #[validate(
        required(message = "type is required"),
        length(min = 1, message = "type must not be empty")
    )]
    pub workout_type: Option<String>,
    #[serde(default, deserialize_with = "numeric::deserialize_lenient")]
    #[validate(
        required(message = "duration must be a number"),
        range(exclusive_min = 0.0, message = "duration must be positive")
    )]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "numeric::deserialize_lenient")]
    #[validate(
        required(message = "calories_burned must be a number"),
        range(exclusive_min = 0.0, message = "calories_burned must be positive")
    )]
    pub calories_burned: Option<f64>,
    pub date: Option<String>,
}

fn validate_new_workout_date(workout: &NewWorkout) -> Result<(), ValidationError> {
    match workout.date.as_deref() {
        Some(date) if parse_workout_date(date).is_none() => Err(invalid_date()),
        _ => Ok(()),
    }
}

/// Partial update for a workout.
///
/// `workout_id` is absent so it cannot be changed through an update.
/// `user_id` can: it is a reference, not this record's key.
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutPatch {
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
    #[serde(default, deserialize_with = "numeric::deserialize_present")]
    pub duration: Option<Option<f64>>,
    #[serde(default, deserialize_with = "numeric::deserialize_present")]
    pub calories_burned: Option<Option<f64>>,
    pub date: Option<String>,
}

impl Validate for WorkoutPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.user_id.as_deref().is_some_and(str::is_empty) {
            errors.add("user_id", error("length", "user_id must not be empty"));
        }
        if self.workout_type.as_deref().is_some_and(str::is_empty) {
            errors.add("type", error("length", "type must not be empty"));
        }
        if matches!(self.duration, Some(v) if !is_positive(v)) {
            errors.add("duration", error("range", "duration must be a positive number"));
        }
        if matches!(self.calories_burned, Some(v) if !is_positive(v)) {
            errors.add(
                "calories_burned",
                error("range", "calories_burned must be a positive number"),
            );
        }
        if matches!(self.date.as_deref(), Some(d) if parse_workout_date(d).is_none()) {
            errors.add("date", invalid_date());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl WorkoutPatch {
    /// Stored field names this patch writes, not counting `updated_at`.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("user_id", self.user_id.is_some()),
            ("type", self.workout_type.is_some()),
            ("duration", self.duration.is_some()),
            ("calories_burned", self.calories_burned.is_some()),
            ("date", self.date.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }

    /// Overwrite the fields present in this patch. Call after `validate`.
    pub fn apply(self, workout: &mut Workout) {
        if let Some(user_id) = self.user_id {
            workout.user_id = user_id;
        }
        if let Some(workout_type) = self.workout_type {
            workout.workout_type = workout_type;
        }
        if let Some(Some(duration)) = self.duration {
            workout.duration = duration;
        }
        if let Some(Some(calories)) = self.calories_burned {
            workout.calories_burned = calories;
        }
        if let Some(date) = self.date {
            workout.date = Some(date);
        }
    }
}

fn is_positive(value: Option<f64>) -> bool {
    value.is_some_and(|n| n > 0.0)
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn invalid_date() -> ValidationError {
    error("date", "date must be YYYY-MM-DD or an RFC3339 timestamp")
}
