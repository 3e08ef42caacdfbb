// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod numeric;
pub mod stats;
pub mod user;
pub mod workout;

pub use stats::{TimeRange, UserStats};
pub use user::{NewUser, User, UserPatch};
pub use workout::{NewWorkout, Workout, WorkoutPatch};
