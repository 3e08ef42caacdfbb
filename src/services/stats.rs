// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics for a user's workout history.

use crate::db::EntityStore;
use crate::error::{AppError, Result};
use crate::models::{TimeRange, UserStats};
use chrono::{DateTime, TimeZone};

/// Loads a user's history and runs it through the statistics engine.
#[derive(Clone)]
pub struct StatsService {
    store: EntityStore,
}

impl StatsService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Compute summary figures for `user_id` as of `now`.
    ///
    /// The user must exist; their full workout list is fetched fresh on
    /// every call.
    pub async fn user_stats<Tz: TimeZone>(
        &self,
        user_id: &str,
        time_range: TimeRange,
        calorie_range: TimeRange,
        now: &DateTime<Tz>,
    ) -> Result<UserStats> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        let workouts = self.store.list_workouts_for_user(user_id).await?;
        let stats = UserStats::compute(user_id, &workouts, time_range, calorie_range, now);

        tracing::debug!(
            user_id,
            workouts = workouts.len(),
            %time_range,
            %calorie_range,
            "Computed user stats"
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, Workout};
    use chrono::{Duration, Utc};

    fn user(id: &str) -> User {
        User {
            user_id: id.to_string(),
            name: "Ana".to_string(),
            age: 0.0,
            weight: 0.0,
            height: 0.0,
            photo: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn workout(id: &str, user_id: &str, kind: &str, date: DateTime<Utc>) -> Workout {
        Workout {
            workout_id: id.to_string(),
            user_id: user_id.to_string(),
            workout_type: kind.to_string(),
            duration: 25.0,
            calories_burned: 100.0,
            date: Some(date.to_rfc3339()),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_user_stats_only_counts_own_workouts() {
        let store = EntityStore::in_memory();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        store.insert_user(&user("U1")).await.unwrap();
        store
            .insert_workout(&workout("W1", "U1", "Yoga", now))
            .await
            .unwrap();
        store
            .insert_workout(&workout("W2", "U1", "Yoga", now - Duration::days(2)))
            .await
            .unwrap();
        store
            .insert_workout(&workout("W3", "U2", "Running", now))
            .await
            .unwrap();

        let stats = StatsService::new(store)
            .user_stats("U1", TimeRange::Daily, TimeRange::Weekly, &now)
            .await
            .unwrap();

        assert_eq!(stats.workout_count, 2);
        assert_eq!(stats.total_duration, 25.0);
        assert_eq!(stats.total_calories, 200.0);
        assert_eq!(stats.favorite_workout.as_deref(), Some("Yoga"));
    }

    #[tokio::test]
    async fn test_user_stats_for_unknown_user() {
        let now = Utc::now();
        let err = StatsService::new(EntityStore::in_memory())
            .user_stats("ghost", TimeRange::Daily, TimeRange::Weekly, &now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_user_without_workouts_has_empty_stats() {
        let store = EntityStore::in_memory();
        store.insert_user(&user("U1")).await.unwrap();

        let stats = StatsService::new(store)
            .user_stats("U1", TimeRange::Monthly, TimeRange::Monthly, &Utc::now())
            .await
            .unwrap();

        assert_eq!(stats.total_duration, 0.0);
        assert_eq!(stats.total_calories, 0.0);
        assert_eq!(stats.favorite_workout, None);
    }
}
