//! Programme generator: day number to a full day's workout.
//!
//! The programme is a fixed seven-day template cycle. Day 1 is a Monday and
//! the cycle repeats forever, so days past the nominal programme length
//! still produce a workout. Exercise templates live in static tables and are
//! instantiated with fresh ids on every call.

use crate::types::*;
use crate::types::ExerciseCategory::{Cardio, Core, RehabBack, RehabKnee, Strength, Warmup};
use std::collections::HashSet;
use uuid::Uuid;

/// Nominal programme length, used for completion percentages only
pub const PROGRAM_LENGTH_DAYS: u32 = 42;

/// Static description of an exercise before instantiation
struct ExerciseTemplate {
    name: &'static str,
    category: ExerciseCategory,
    sets: u32,
    reps: &'static str,
    notes: &'static str,
    video_id: Option<&'static str>,
}

const fn ex(
    name: &'static str,
    category: ExerciseCategory,
    sets: u32,
    reps: &'static str,
    notes: &'static str,
    video_id: Option<&'static str>,
) -> ExerciseTemplate {
    ExerciseTemplate {
        name,
        category,
        sets,
        reps,
        notes,
        video_id,
    }
}

// ============================================================================
// Shared blocks
// ============================================================================

const WARMUP: &[ExerciseTemplate] = &[
    ex("Cat-Cow", Warmup, 2, "10 reps", "Move mostly through thoracic spine, gentle on lumbar.", Some("y_cKHKi9UaM")),
    ex("Glute Bridge (Two leg)", Warmup, 2, "15 reps", "Squeeze glutes at top, no back arch.", Some("vPBb5zzMBoc")),
    ex("World's Greatest Stretch", Warmup, 1, "5/side", "Slow and controlled.", Some("-CiWQ2IvY34")),
];

// McGill Big 3
const BACK_REHAB: &[ExerciseTemplate] = &[
    ex("McGill Curl Up", RehabBack, 3, "10s hold x 6 reps", "Hands under lower back, one leg bent. Lift head slightly.", Some("S8VFbkSjCsQ")),
    ex("Side Plank (Knees)", RehabBack, 3, "10s hold x 4 reps", "Focus on hinge from knees, keep spine neutral.", Some("ecgU1u0xST0")),
    ex("Bird Dog", RehabBack, 3, "10s hold x 6 reps", "Opposite arm/leg. Do not hyperextend back.", Some("S1QbyYZaXIg")),
];

const KNEE_REHAB: &[ExerciseTemplate] = &[
    ex("VMO Terminal Knee Extension", RehabKnee, 2, "15 reps", "Lock out knee fully against band tension.", Some("nfJ5QCx_fSg")),
    ex("Clam Shells", RehabKnee, 2, "15 reps/side", "Glute medius focus.", Some("DAAjOdwZdks")),
    ex("Single Leg Balance", RehabKnee, 2, "30s/side", "Soft knee, engage core.", Some("2BcSwcxN6Rk")),
];

// ============================================================================
// Day-specific blocks
// ============================================================================

const UPPER_PUSH: &[ExerciseTemplate] = &[
    ex("Seated DB Shoulder Press", Strength, 3, "10-12", "Keep back firmly against bench. No arching.", Some("B-aVuyhvLHU")),
    ex("Incline DB Chest Press", Strength, 3, "10-12", "Control the descent (3s down).", Some("8iPEnn-ltC8")),
    ex("Cable Tricep Pushdowns", Strength, 3, "12-15", "Keep elbows tucked.", Some("2-LAMcpzODU")),
    ex("Pallof Press (Iso Hold)", Core, 3, "20s hold", "Anti-rotation core work.", Some("DsVso3c92ZI")),
];

const UPPER_PULL: &[ExerciseTemplate] = &[
    ex("Chest Supported Row (Machine)", Strength, 3, "10-12", "Support chest fully to offload spine.", Some("0UBRfiO4zDs")),
    ex("Lat Pulldown (Neutral Grip)", Strength, 3, "10-12", "Pull to upper chest. Don't lean back.", Some("CAwf7n6Luuc")),
    ex("Face Pulls", Strength, 3, "15", "Focus on rear delts and posture.", Some("V8dZqdIe_sI")),
    ex("Dead Bug (Core)", Core, 3, "10 total", "Press lower back into floor hard.", Some("I5xbsA71v1A")),
];

const MOBILITY_FLOW: &[ExerciseTemplate] = &[
    ex("Hip Flexor Stretch (Kneeling)", RehabBack, 2, "30s/side", "Squeeze glute of kneeling leg.", Some("YQmpO9VT2X4")),
    ex("Thoracic Rotation", RehabBack, 2, "10/side", "Open chest.", Some("L-o2W9F_F2s")),
    ex("Child's Pose", RehabBack, 2, "1 min", "Gentle stretch.", Some("EqkQ594e9QM")),
];

const LEG_STRENGTH: &[ExerciseTemplate] = &[
    ex("Glute Bridge (Weighted)", Strength, 3, "12", "DB on hips. Squeeze glutes.", Some("Jt478Ic8pLE")),
    ex("Seated Leg Curl", Strength, 3, "12-15", "Hamstring focus to protect ACL/Knee.", Some("OrxowW5nqaM")),
    ex("Leg Press", Strength, 3, "10-12", "Do NOT go deep. 90 degrees max. Protect lumbar.", Some("IZxyjW7MPJQ")),
    ex("Calf Raises (Seated)", Strength, 3, "15", "Full range.", Some("JbyjNymZOt0")),
];

const ACCESSORY: &[ExerciseTemplate] = &[
    ex("DB Lateral Raises", Strength, 3, "15", "Strict form.", Some("3VcKaXpzqRo")),
    ex("Bicep Curls (Seated)", Strength, 3, "12", "Keep torso still.", Some("Efd2p10pTgw")),
    ex("Suitcase Carry", Core, 3, "30s/side", "Hold DB in one hand, walk keeping spine perfectly straight.", Some("BqvpnLLwWNc")),
    ex("Bird Dog", Core, 3, "10/side", "Perfect form focus.", Some("S1QbyYZaXIg")),
];

const OUTDOOR_PREP: &[ExerciseTemplate] = &[
    ex("Ankle Mobilization", Warmup, 2, "10 reps", "Knee over toe (gently).", Some("IikP_ScSjb4")),
    ex("Leg Swings", Warmup, 2, "10/side", "Controlled.", Some("lM8n7Y5_sxo")),
];

const DECOMPRESSION: &[ExerciseTemplate] = &[
    ex("90/90 Breathing", RehabBack, 1, "5 mins", "Lie on back, legs up on chair/couch at 90 deg. Breathe deeply.", Some("9-3iK-jQ-Qk")),
    ex("Gentle Walking", Cardio, 1, "20 mins", "Optional evening stroll.", None),
];

// ============================================================================
// Day arithmetic
// ============================================================================

/// Programme week containing `day` (`ceil(day / 7)`)
pub fn week_number(day: u32) -> u32 {
    day.div_ceil(7)
}

/// Position within the weekly cycle, 1 (Monday) through 7 (Sunday)
pub fn day_of_week(day: u32) -> u32 {
    match day % 7 {
        0 => 7,
        n => n,
    }
}

/// Template selected for each position in the weekly cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProgramDay {
    UpperPush,
    UpperPull,
    ActiveRecovery,
    LowerBody,
    FullBody,
    OutdoorChallenge,
    Rest,
}

impl ProgramDay {
    /// Every template in weekly order
    pub const ALL: [ProgramDay; 7] = [
        ProgramDay::UpperPush,
        ProgramDay::UpperPull,
        ProgramDay::ActiveRecovery,
        ProgramDay::LowerBody,
        ProgramDay::FullBody,
        ProgramDay::OutdoorChallenge,
        ProgramDay::Rest,
    ];

    pub fn from_day(day: u32) -> Self {
        match day_of_week(day) {
            1 => ProgramDay::UpperPush,
            2 => ProgramDay::UpperPull,
            3 => ProgramDay::ActiveRecovery,
            4 => ProgramDay::LowerBody,
            5 => ProgramDay::FullBody,
            6 => ProgramDay::OutdoorChallenge,
            _ => ProgramDay::Rest,
        }
    }

    /// Weekday name for display
    pub fn weekday_name(&self) -> &'static str {
        match self {
            ProgramDay::UpperPush => "Monday",
            ProgramDay::UpperPull => "Tuesday",
            ProgramDay::ActiveRecovery => "Wednesday",
            ProgramDay::LowerBody => "Thursday",
            ProgramDay::FullBody => "Friday",
            ProgramDay::OutdoorChallenge => "Saturday",
            ProgramDay::Rest => "Sunday",
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Build the workout for a programme day
///
/// Total over every day number. The structure depends only on the day, but
/// exercise ids are regenerated on every call.
pub fn workout_for_day(day: u32) -> DailyWorkout {
    let week = week_number(day);
    let program_day = ProgramDay::from_day(day);

    tracing::debug!(
        "Generating day {} (week {}, {:?})",
        day,
        week,
        program_day
    );

    let warmup = || block("Warm Up & Activation", Warmup, WARMUP);
    let back_rehab = || block("Back Rehab (McGill Big 3)", RehabBack, BACK_REHAB);
    let knee_rehab = || block("Knee Stability & VMO", RehabKnee, KNEE_REHAB);

    let (title, duration_minutes, blocks, cardio) = match program_day {
        ProgramDay::UpperPush => (
            format!("Week {} - Upper Push & Core", week),
            50,
            vec![
                warmup(),
                back_rehab(),
                block("Strength: Push (Spine Neutral)", Strength, UPPER_PUSH),
                knee_rehab(),
            ],
            default_cardio(),
        ),
        ProgramDay::UpperPull => (
            format!("Week {} - Upper Pull & Posture", week),
            50,
            vec![
                warmup(),
                back_rehab(),
                block("Strength: Pull (Hinge Supported)", Strength, UPPER_PULL),
                knee_rehab(),
            ],
            default_cardio(),
        ),
        ProgramDay::ActiveRecovery => (
            format!("Week {} - Active Recovery", week),
            45,
            vec![
                warmup(),
                back_rehab(),
                block("Mobility Flow", RehabBack, MOBILITY_FLOW),
            ],
            cardio_option(
                "45 min Walk or 20 min Swim",
                "30 min Recumbent Bike",
                "Focus on movement quality. Swimming is excellent for spine decompression.",
            ),
        ),
        ProgramDay::LowerBody => (
            format!("Week {} - Lower Body (Knee/Back Safe)", week),
            60,
            vec![
                warmup(),
                knee_rehab(),
                back_rehab(),
                block("Leg Strength (No Axial Load)", Strength, LEG_STRENGTH),
            ],
            default_cardio(),
        ),
        ProgramDay::FullBody => (
            format!("Week {} - Full Body Tune-Up", week),
            45,
            vec![
                warmup(),
                back_rehab(),
                block("Accessory Work", Strength, ACCESSORY),
            ],
            default_cardio(),
        ),
        ProgramDay::OutdoorChallenge => (
            format!("Week {} - Outdoor Activity", week),
            60,
            vec![
                warmup(),
                back_rehab(),
                block("Outdoor Prep", Warmup, OUTDOOR_PREP),
            ],
            cardio_option(
                "Rucking (Weighted Walk)",
                "Incline Walking (Treadmill)",
                "For Rucking: Use a backpack with 5-10kg max. Keep posture upright. Engaging core protects back.",
            ),
        ),
        ProgramDay::Rest => (
            "Rest & Decompress".to_string(),
            15,
            vec![block("Optional Decompression", RehabBack, DECOMPRESSION)],
            default_cardio(),
        ),
    };

    DailyWorkout {
        day_number: day,
        week_number: week,
        title,
        duration_minutes,
        blocks,
        cardio,
    }
}

fn block(
    title: &str,
    category: ExerciseCategory,
    templates: &[ExerciseTemplate],
) -> WorkoutBlock {
    WorkoutBlock {
        title: title.to_string(),
        category,
        exercises: templates.iter().map(instantiate).collect(),
    }
}

fn instantiate(template: &ExerciseTemplate) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        name: template.name.to_string(),
        category: template.category,
        sets: Some(template.sets),
        reps: Some(template.reps.to_string()),
        tempo: None,
        rest: None,
        notes: (!template.notes.is_empty()).then(|| template.notes.to_string()),
        video: template.video_id.map(|id| VideoRef {
            video_id: id.to_string(),
            start_seconds: 0,
        }),
    }
}

fn cardio_option(outdoor: &str, indoor: &str, notes: &str) -> CardioOption {
    CardioOption {
        outdoor: outdoor.to_string(),
        indoor: indoor.to_string(),
        notes: notes.to_string(),
    }
}

fn default_cardio() -> CardioOption {
    cardio_option(
        "30 min Brisk Walk (Evening)",
        "20 min Elliptical (Low resistance)",
        "Keep heart rate < 130bpm. Stop if knee pain > 3/10.",
    )
}

/// Sanity-check every template in the weekly cycle
///
/// Returns a list of problems, or an empty Vec if the programme is usable.
pub fn validate_program() -> Vec<String> {
    let mut errors = Vec::new();

    for (offset, program_day) in ProgramDay::ALL.iter().enumerate() {
        let day = offset as u32 + 1;
        let workout = workout_for_day(day);
        let name = program_day.weekday_name();

        if workout.title.is_empty() {
            errors.push(format!("{} has an empty title", name));
        }
        if workout.duration_minutes == 0 {
            errors.push(format!("{} has zero duration", name));
        }
        if workout.blocks.is_empty() {
            errors.push(format!("{} has no blocks", name));
        }

        for block in &workout.blocks {
            if block.exercises.is_empty() {
                errors.push(format!("{}: block '{}' has no exercises", name, block.title));
            }
            for exercise in &block.exercises {
                if exercise.name.is_empty() {
                    errors.push(format!("{}: block '{}' has an unnamed exercise", name, block.title));
                }
                if exercise.sets == Some(0) {
                    errors.push(format!("{}: '{}' has zero sets", name, exercise.name));
                }
            }
        }

        let mut seen = HashSet::new();
        if !workout.exercises().all(|e| seen.insert(e.id)) {
            errors.push(format!("{} generated duplicate exercise ids", name));
        }

        if workout.cardio.outdoor.is_empty() || workout.cardio.indoor.is_empty() {
            errors.push(format!("{} has an incomplete cardio option", name));
        }
    }

    errors
}
