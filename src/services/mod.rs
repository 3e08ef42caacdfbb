// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod stats;
pub mod users;
pub mod workouts;

pub use stats::StatsService;
pub use users::UserService;
pub use workouts::WorkoutService;
