#![forbid(unsafe_code)]

//! Core domain model and business logic for the rehab tracker.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, pain log, progress record)
//! - The seven-day programme generator
//! - Progress transitions and their persisted store
//! - Dashboard summaries, meal scanning and CSV export

pub mod types;
pub mod error;
pub mod clock;
pub mod config;
pub mod logging;
pub mod program;
pub mod progress;
pub mod state;
pub mod history;
pub mod nutrition;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use program::{day_of_week, validate_program, week_number, workout_for_day, ProgramDay};
pub use state::ProgressStore;
pub use history::{summarize, ProgressSummary, RecoveryStatus};
pub use nutrition::{lookup_meal, JsonlMealLog, Meal, MealSink, MealTotals};
pub use export::export_pain_log;
