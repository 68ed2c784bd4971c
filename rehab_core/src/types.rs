//! Core domain types for the rehab tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise categories and generated workout structures
//! - Pain log entries and the persisted progress record
//! - Partial updates applied to historical log entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Highest value on the subjective pain scale
pub const MAX_PAIN: u8 = 10;

/// Verbal band for a 0-10 pain score
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PainLevel {
    NoPain,
    Mild,
    Moderate,
    Significant,
    Severe,
    Worst,
}

impl PainLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => PainLevel::NoPain,
            1..=3 => PainLevel::Mild,
            4..=5 => PainLevel::Moderate,
            6..=7 => PainLevel::Significant,
            8..=9 => PainLevel::Severe,
            _ => PainLevel::Worst,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PainLevel::NoPain => "No Pain",
            PainLevel::Mild => "Mild Discomfort",
            PainLevel::Moderate => "Moderate Pain",
            PainLevel::Significant => "Significant Pain",
            PainLevel::Severe => "Severe Pain",
            PainLevel::Worst => "Worst Possible",
        }
    }
}

impl fmt::Display for PainLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Exercise Types
// ============================================================================

/// Category shared by exercises and the blocks that group them
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseCategory {
    Strength,
    RehabBack,
    RehabKnee,
    Core,
    Cardio,
    Warmup,
    Cooldown,
}

impl ExerciseCategory {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "Strength",
            ExerciseCategory::RehabBack => "Back Rehab",
            ExerciseCategory::RehabKnee => "Knee Rehab",
            ExerciseCategory::Core => "Core",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Warmup => "Warm Up",
            ExerciseCategory::Cooldown => "Cool Down",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Demonstration video hosted on YouTube
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRef {
    pub video_id: String,
    pub start_seconds: u32,
}

impl VideoRef {
    /// Embeddable player URL starting at `start_seconds`
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.youtube.com/embed/{}?start={}&rel=0&modestbranding=1&playsinline=1",
            self.video_id, self.start_seconds
        )
    }

    /// Medium-quality still image for the video
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", self.video_id)
    }
}

/// One prescribed movement within a generated workout
///
/// The id is unique within a single generation call only; it is never
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub category: ExerciseCategory,
    pub sets: Option<u32>,
    pub reps: Option<String>,
    pub tempo: Option<String>,
    pub rest: Option<String>,
    pub notes: Option<String>,
    pub video: Option<VideoRef>,
}

/// Ordered group of exercises sharing a category
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutBlock {
    pub title: String,
    pub category: ExerciseCategory,
    pub exercises: Vec<Exercise>,
}

/// Outdoor/indoor cardio choice offered alongside a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardioOption {
    pub outdoor: String,
    pub indoor: String,
    pub notes: String,
}

/// A full day of the programme, derived entirely from the day number
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyWorkout {
    pub day_number: u32,
    pub week_number: u32,
    pub title: String,
    pub duration_minutes: u32,
    pub blocks: Vec<WorkoutBlock>,
    pub cardio: CardioOption,
}

impl DailyWorkout {
    /// Iterate every exercise across all blocks in display order
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.blocks.iter().flat_map(|b| b.exercises.iter())
    }
}

// ============================================================================
// Progress Types
// ============================================================================

/// Pain scores and notes recorded for one calendar date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PainLogEntry {
    #[serde(deserialize_with = "deserialize_pain")]
    pub back_pain: u8,
    #[serde(deserialize_with = "deserialize_pain")]
    pub knee_pain: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
}

impl PainLogEntry {
    /// Build an entry for a completed programme day, clamping scores to 0-10
    pub fn new(back_pain: u8, knee_pain: u8, notes: impl Into<String>, day_number: u32) -> Self {
        Self {
            back_pain: clamp_pain(back_pain),
            knee_pain: clamp_pain(knee_pain),
            notes: notes.into(),
            day_number: Some(day_number),
        }
    }

    /// Worst of the two scores
    pub fn max_pain(&self) -> u8 {
        self.back_pain.max(self.knee_pain)
    }

    /// True when either score is strictly above `threshold`
    pub fn is_high_pain(&self, threshold: u8) -> bool {
        self.max_pain() > threshold
    }
}

/// The single persisted record
///
/// Serialized with the camelCase field names of the stored JSON blob. Any
/// field missing from a stored record falls back to its default.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub current_day: u32,
    pub completed_days: Vec<u32>,
    pub pain_log: BTreeMap<NaiveDate, PainLogEntry>,
    pub streak: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            current_day: 1,
            completed_days: Vec::new(),
            pain_log: BTreeMap::new(),
            streak: 0,
        }
    }
}

/// Fields to overwrite on an existing log entry; `None` keeps the old value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogUpdate {
    pub back_pain: Option<u8>,
    pub knee_pain: Option<u8>,
    pub notes: Option<String>,
}

impl LogUpdate {
    /// True when the update would not touch any field
    pub fn is_empty(&self) -> bool {
        self.back_pain.is_none() && self.knee_pain.is_none() && self.notes.is_none()
    }
}

pub(crate) fn clamp_pain(score: u8) -> u8 {
    if score > MAX_PAIN {
        tracing::warn!("Pain score {} above {}, clamping", score, MAX_PAIN);
    }
    score.min(MAX_PAIN)
}

// Stored scores may be any JSON number; out-of-range values are clamped
fn deserialize_pain<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    let max = f64::from(MAX_PAIN);
    if !(0.0..=max).contains(&raw) {
        tracing::warn!("Stored pain score {} outside 0-{}, clamping", raw, MAX_PAIN);
    }
    Ok(raw.round().clamp(0.0, max) as u8)
}
