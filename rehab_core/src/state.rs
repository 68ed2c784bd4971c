//! Progress record persistence with file locking.
//!
//! The whole record lives in one JSON file. Every mutation is a full
//! read-modify-write of that file; writes go through a locked temp file that
//! is renamed over the original so readers never see a partial record.

use crate::clock::{Clock, SystemClock};
use crate::{Error, LogUpdate, Result, UserProgress};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

impl UserProgress {
    /// Load the progress record from a file with shared locking
    ///
    /// Never fails: a missing, unreadable or corrupt file yields the default
    /// record (day 1, nothing logged) and a warning.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No progress file found, starting at day 1");
            return Self::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open progress file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                return Self::default();
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock progress file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Self::default();
        }

        let mut contents = String::new();
        let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
        if let Err(e) = file.unlock() {
            tracing::warn!("Failed to unlock progress file {:?}: {}", path, e);
        }
        if let Err(e) = read {
            tracing::warn!(
                "Failed to read progress file {:?}: {}. Using defaults.",
                path,
                e
            );
            return Self::default();
        }

        match serde_json::from_str::<UserProgress>(&contents) {
            Ok(progress) => {
                tracing::debug!("Loaded progress from {:?}", path);
                progress
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse progress file {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Replace the progress file with this record
    ///
    /// Writes compact JSON to a locked temp file in the same directory,
    /// syncs it, then renames it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved progress to {:?}", path);
        Ok(())
    }

    /// Load, apply `f`, and save only if `f` reports a change
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut UserProgress) -> bool,
    {
        let mut progress = Self::load(path);
        if f(&mut progress) {
            progress.save(path)?;
        }
        Ok(progress)
    }
}

/// The four progress operations bound to one slot and one clock
#[derive(Clone, Debug)]
pub struct ProgressStore<C = SystemClock> {
    path: PathBuf,
    clock: C,
}

impl ProgressStore<SystemClock> {
    /// Store backed by `path`, keying logs by the local date
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> ProgressStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Date new pain logs are filed under
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Current record, or the default one when nothing usable is stored
    pub fn load(&self) -> UserProgress {
        UserProgress::load(&self.path)
    }

    pub fn save(&self, progress: &UserProgress) -> Result<()> {
        progress.save(&self.path)
    }

    /// Mark `day` complete and log today's pain scores
    pub fn mark_day_complete(
        &self,
        day: u32,
        back_pain: u8,
        knee_pain: u8,
        notes: &str,
    ) -> Result<UserProgress> {
        let today = self.clock.today();
        UserProgress::update(&self.path, |progress| {
            progress.complete_day(day, today, back_pain, knee_pain, notes);
            true
        })
    }

    /// Delete the log for `date`, rolling back its completion
    ///
    /// Unknown dates return the stored record untouched.
    pub fn delete_workout_log(&self, date: NaiveDate) -> Result<UserProgress> {
        UserProgress::update(&self.path, |progress| progress.delete_log(date))
    }

    /// Edit the scores or notes of the log for `date`
    ///
    /// Unknown dates return the stored record untouched.
    pub fn update_workout_log(&self, date: NaiveDate, update: &LogUpdate) -> Result<UserProgress> {
        UserProgress::update(&self.path, |progress| progress.update_log(date, update))
    }
}
