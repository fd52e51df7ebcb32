// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod config;
pub mod model;
pub mod roster;
pub mod seating;
pub mod seed;
pub mod state;

pub use config::Config;
pub use model::*;
pub use roster::*;
pub use seating::*;
pub use seed::*;
pub use state::*;
