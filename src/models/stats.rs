// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user workout statistics.
//!
//! Everything here is a pure function of an already-fetched workout list and
//! an explicit "now", so callers decide the clock and time zone.

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Workout;

/// Named time window used to filter a workout history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Same calendar day as now.
    Daily,
    /// Within 7 days of now, either direction.
    Weekly,
    /// Within 30 days of now, either direction.
    Monthly,
}

impl TimeRange {
    /// Does a workout at `date` fall inside this range around `now`?
    ///
    /// Weekly and monthly windows are symmetric: future-dated workouts
    /// within the window count too.
    pub fn contains<Tz: TimeZone>(self, now: &DateTime<Tz>, date: &DateTime<Tz>) -> bool {
        match self {
            TimeRange::Daily => now.date_naive() == date.date_naive(),
            TimeRange::Weekly => within_days(now, date, 7),
            TimeRange::Monthly => within_days(now, date, 30),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Daily => "daily",
            TimeRange::Weekly => "weekly",
            TimeRange::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(TimeRange::Daily),
            "weekly" => Ok(TimeRange::Weekly),
            "monthly" => Ok(TimeRange::Monthly),
            other => Err(format!("unknown time range: {other}")),
        }
    }
}

fn within_days<Tz: TimeZone>(now: &DateTime<Tz>, date: &DateTime<Tz>, days: i64) -> bool {
    now.clone().signed_duration_since(date.clone()).abs() <= TimeDelta::days(days)
}

/// Workouts whose date falls inside `range` around `now`.
///
/// Workouts with a missing or unparseable date are always excluded.
pub fn filter_by_range<'a, Tz: TimeZone>(
    workouts: &'a [Workout],
    range: TimeRange,
    now: &DateTime<Tz>,
) -> Vec<&'a Workout> {
    let tz = now.timezone();
    workouts
        .iter()
        .filter(|w| {
            w.date_time()
                .map(|date| range.contains(now, &date.with_timezone(&tz)))
                .unwrap_or(false)
        })
        .collect()
}

/// Total minutes over the workouts in `range`.
pub fn total_duration<Tz: TimeZone>(
    workouts: &[Workout],
    range: TimeRange,
    now: &DateTime<Tz>,
) -> f64 {
    filter_by_range(workouts, range, now)
        .iter()
        .map(|w| w.duration)
        .sum()
}

/// Total calories over the workouts in `range`.
pub fn total_calories<Tz: TimeZone>(
    workouts: &[Workout],
    range: TimeRange,
    now: &DateTime<Tz>,
) -> f64 {
    filter_by_range(workouts, range, now)
        .iter()
        .map(|w| w.calories_burned)
        .sum()
}

/// Most frequent workout type across the whole history.
///
/// Types are compared exactly (no case or whitespace folding) and empty
/// types are skipped. Ties go to the type seen first. `None` when no
/// workout has a type.
pub fn favorite_workout_type(workouts: &[Workout]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for workout in workouts {
        let workout_type = workout.workout_type.as_str();
        if workout_type.is_empty() {
            continue;
        }
        let count = counts.entry(workout_type).or_insert(0);
        if *count == 0 {
            first_seen.push(workout_type);
        }
        *count += 1;
    }

    let mut favorite = None;
    let mut max_count = 0;
    for workout_type in first_seen {
        let count = counts[workout_type];
        if count > max_count {
            max_count = count;
            favorite = Some(workout_type);
        }
    }
    favorite
}

/// Summary card figures for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserStats {
    pub user_id: String,
    /// Range applied to `total_duration`
    pub time_range: TimeRange,
    /// Minutes of exercise in `time_range`
    pub total_duration: f64,
    /// Range applied to `total_calories`
    pub calorie_range: TimeRange,
    /// Calories burned in `calorie_range`
    pub total_calories: f64,
    /// Most frequent type over the whole history
    pub favorite_workout: Option<String>,
    /// Number of workouts in the history
    pub workout_count: usize,
}

impl UserStats {
    /// Compute all figures for a user's full workout history.
    ///
    /// The duration and calorie ranges are independent.
    pub fn compute<Tz: TimeZone>(
        user_id: &str,
        workouts: &[Workout],
        time_range: TimeRange,
        calorie_range: TimeRange,
        now: &DateTime<Tz>,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            time_range,
            total_duration: total_duration(workouts, time_range, now),
            calorie_range,
            total_calories: total_calories(workouts, calorie_range, now),
            favorite_workout: favorite_workout_type(workouts).map(str::to_string),
            workout_count: workouts.len(),
        }
    }
}
