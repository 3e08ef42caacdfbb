// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness Tracker: users, workouts and workout statistics
//!
//! This crate provides the REST backend that stores user profiles and
//! workouts in a document store and summarizes a user's training history.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::EntityStore;
use services::{StatsService, UserService, WorkoutService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserService,
    pub workouts: WorkoutService,
    pub stats: StatsService,
}

impl AppState {
    /// Wire every service to the same store.
    pub fn new(config: Config, store: EntityStore) -> Self {
        Self {
            config,
            users: UserService::new(store.clone()),
            workouts: WorkoutService::new(store.clone()),
            stats: StatsService::new(store),
        }
    }
}
