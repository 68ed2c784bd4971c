//! Meal scanning and the meal journal.
//!
//! Scanning is a lookup of the scanned code in a fixed table of prepared
//! meals; unknown codes fall back to the standard meal. Logged meals are
//! appended to a JSONL journal with file locking.

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use fs2::FileExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Nutrition facts for a prepared meal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealInfo {
    pub name: &'static str,
    pub calories: u32,
    pub protein: u32,
}

const DEFAULT_CODE: &str = "default";

static MEAL_TABLE: Lazy<HashMap<&'static str, MealInfo>> = Lazy::new(|| {
    let entries = [
        (DEFAULT_CODE, "Standard Fitt Chicken & Rice", 450, 40),
        ("fitt-001", "Lean Beef Bowl", 520, 45),
        ("fitt-002", "Salmon & Quinoa", 480, 35),
        ("fitt-003", "Vegan Power Bowl", 400, 25),
        ("fitt-004", "Chicken Pesto Pasta", 600, 42),
        ("fitt-005", "Turkey Meatballs & Zoodles", 350, 38),
    ];
    entries
        .into_iter()
        .map(|(code, name, calories, protein)| {
            (
                code,
                MealInfo {
                    name,
                    calories,
                    protein,
                },
            )
        })
        .collect()
});

/// Resolve a scanned code to a meal
///
/// Tries the lowercased code, then the code as scanned, then the default.
pub fn lookup_meal(code: &str) -> &'static MealInfo {
    let code = code.trim();
    let lowered = code.to_lowercase();

    MEAL_TABLE
        .get(lowered.as_str())
        .or_else(|| MEAL_TABLE.get(code))
        .unwrap_or_else(|| {
            tracing::debug!("Unknown meal code {:?}, using default meal", code);
            &MEAL_TABLE[DEFAULT_CODE]
        })
}

/// A meal that has been eaten and logged
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub logged_at: DateTime<Utc>,
}

impl Meal {
    /// Log a scanned code at `logged_at`
    pub fn from_scan(code: &str, logged_at: DateTime<Utc>) -> Self {
        let info = lookup_meal(code);
        Self {
            id: Uuid::new_v4(),
            name: info.name.to_string(),
            calories: info.calories,
            protein: info.protein,
            logged_at,
        }
    }

    /// Timestamp for a meal logged after the fact: local noon on `date`
    pub fn backdated(date: NaiveDate) -> DateTime<Utc> {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));
        Local
            .from_local_datetime(&noon)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| noon.and_utc())
    }

    /// Local calendar date the meal was logged on
    pub fn local_date(&self) -> NaiveDate {
        self.logged_at.with_timezone(&Local).date_naive()
    }
}

/// Calorie and protein sums over a set of meals
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MealTotals {
    pub calories: u32,
    pub protein: u32,
}

impl MealTotals {
    pub fn of<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        meals.into_iter().fold(Self::default(), |acc, meal| Self {
            calories: acc.calories.saturating_add(meal.calories),
            protein: acc.protein.saturating_add(meal.protein),
        })
    }
}

/// Destination for logged meals
pub trait MealSink {
    fn append(&mut self, meal: &Meal) -> Result<()>;
}

/// JSONL meal journal with file locking
pub struct JsonlMealLog {
    path: PathBuf,
}

impl JsonlMealLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Every readable meal in the journal, oldest first
    pub fn read_all(&self) -> Result<Vec<Meal>> {
        read_meals(&self.path)
    }

    /// Meals logged on a given local date, newest first
    pub fn meals_on(&self, date: NaiveDate) -> Result<Vec<Meal>> {
        let mut meals: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|m| m.local_date() == date)
            .collect();
        meals.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));
        Ok(meals)
    }

    /// Drop the meal with `id`, rewriting the journal atomically
    ///
    /// Returns the removed meal, or `None` when no meal has that id.
    pub fn remove(&self, id: Uuid) -> Result<Option<Meal>> {
        let meals = self.read_all()?;
        let Some(pos) = meals.iter().position(|m| m.id == id) else {
            return Ok(None);
        };

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for (i, meal) in meals.iter().enumerate() {
                if i == pos {
                    continue;
                }
                serde_json::to_writer(&mut writer, meal)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Removed meal {} from journal", id);
        Ok(meals.into_iter().nth(pos))
    }
}

impl MealSink for JsonlMealLog {
    fn append(&mut self, meal: &Meal) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(meal)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended meal {} to journal", meal.id);
        Ok(())
    }
}

/// Read all meals from a journal file, skipping lines that fail to parse
pub fn read_meals(path: &Path) -> Result<Vec<Meal>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut meals = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Meal>(&line) {
            Ok(meal) => meals.push(meal),
            Err(e) => {
                tracing::warn!("Failed to parse meal at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} meals from journal", meals.len());
    Ok(meals)
}
