//! State transitions on the progress record.
//!
//! These operate purely in memory with an explicit date; `state` wraps them
//! in load/save against the persisted slot.

use crate::types::{clamp_pain, LogUpdate, PainLogEntry, UserProgress};
use chrono::NaiveDate;

impl UserProgress {
    /// Record completion of `day` with the pain scores logged on `date`
    ///
    /// - A day already in `completed_days` is not added again and does not
    ///   bump the streak.
    /// - `current_day` only advances when `day` is the current day.
    /// - The log entry for `date` is overwritten, whatever day it held.
    pub fn complete_day(
        &mut self,
        day: u32,
        date: NaiveDate,
        back_pain: u8,
        knee_pain: u8,
        notes: impl Into<String>,
    ) {
        if !self.completed_days.contains(&day) {
            self.completed_days.push(day);
            self.streak = self.streak.saturating_add(1);
        }

        if day == self.current_day {
            self.current_day = day.saturating_add(1);
        }

        let entry = PainLogEntry::new(back_pain, knee_pain, notes, day);
        if self.pain_log.insert(date, entry).is_some() {
            tracing::debug!("Overwrote existing pain log for {}", date);
        }

        tracing::info!(
            "Completed day {} (current day now {}, streak {})",
            day,
            self.current_day,
            self.streak
        );
    }

    /// Remove the log for `date` and roll back the completion it recorded
    ///
    /// Returns false (and changes nothing) when there is no entry for `date`.
    /// `current_day` is only rolled back when the entry was for the most
    /// recent completion (`current_day - 1`); older deletions leave it as is.
    pub fn delete_log(&mut self, date: NaiveDate) -> bool {
        let Some(entry) = self.pain_log.remove(&date) else {
            tracing::debug!("No pain log for {}, nothing to delete", date);
            return false;
        };

        if let Some(day) = entry.day_number {
            self.completed_days.retain(|&d| d != day);

            if self.current_day.checked_sub(1) == Some(day) {
                self.current_day = day;
            }
        }

        self.streak = self.streak.saturating_sub(1);

        tracing::info!(
            "Deleted pain log for {} (current day now {}, streak {})",
            date,
            self.current_day,
            self.streak
        );
        true
    }

    /// Merge `update` over the existing entry for `date`
    ///
    /// Returns false when there is no entry for `date`. The day number is
    /// never touched.
    pub fn update_log(&mut self, date: NaiveDate, update: &LogUpdate) -> bool {
        let Some(entry) = self.pain_log.get_mut(&date) else {
            tracing::debug!("No pain log for {}, nothing to update", date);
            return false;
        };

        if let Some(back) = update.back_pain {
            entry.back_pain = clamp_pain(back);
        }
        if let Some(knee) = update.knee_pain {
            entry.knee_pain = clamp_pain(knee);
        }
        if let Some(ref notes) = update.notes {
            entry.notes = notes.clone();
        }

        tracing::info!("Updated pain log for {}", date);
        true
    }

    /// Whether `day` has been marked complete
    pub fn is_completed(&self, day: u32) -> bool {
        self.completed_days.contains(&day)
    }

    /// Most recent pain log entry by date
    pub fn latest_entry(&self) -> Option<(&NaiveDate, &PainLogEntry)> {
        self.pain_log.iter().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn after_first_day() -> UserProgress {
        let mut progress = UserProgress::default();
        progress.complete_day(1, date("2024-01-01"), 2, 1, "felt fine");
        progress
    }

    #[test]
    fn test_complete_current_day() {
        let progress = after_first_day();

        assert_eq!(progress.current_day, 2);
        assert_eq!(progress.completed_days, vec![1]);
        assert_eq!(progress.streak, 1);
        assert_eq!(
            progress.pain_log.get(&date("2024-01-01")),
            Some(&PainLogEntry {
                back_pain: 2,
                knee_pain: 1,
                notes: "felt fine".into(),
                day_number: Some(1),
            })
        );
    }

    #[test]
    fn test_complete_is_idempotent_for_membership() {
        let mut progress = after_first_day();
        progress.complete_day(1, date("2024-01-02"), 3, 3, "again");

        assert_eq!(progress.completed_days, vec![1]);
        assert_eq!(progress.streak, 1);
        assert_eq!(progress.current_day, 2);
        assert_eq!(progress.pain_log.len(), 2);
    }

    #[test]
    fn test_complete_other_day_keeps_current_day() {
        let mut progress = after_first_day();
        progress.complete_day(5, date("2024-01-02"), 0, 0, "");

        assert_eq!(progress.current_day, 2);
        assert!(progress.is_completed(5));
        assert_eq!(progress.streak, 2);
    }

    #[test]
    fn test_same_date_overwrites_log() {
        let mut progress = after_first_day();
        progress.complete_day(2, date("2024-01-01"), 7, 6, "second session");

        assert_eq!(progress.pain_log.len(), 1);
        let entry = &progress.pain_log[&date("2024-01-01")];
        assert_eq!(entry.day_number, Some(2));
        assert_eq!(entry.back_pain, 7);
        assert_eq!(progress.current_day, 3);
    }

    #[test]
    fn test_delete_reverts_latest_completion() {
        let mut progress = after_first_day();
        assert!(progress.delete_log(date("2024-01-01")));
        assert_eq!(progress, UserProgress::default());
    }

    #[test]
    fn test_delete_missing_date_is_noop() {
        let mut progress = after_first_day();
        let before = progress.clone();
        assert!(!progress.delete_log(date("2023-12-31")));
        assert_eq!(progress, before);
    }

    #[test]
    fn test_delete_older_completion_keeps_current_day() {
        let mut progress = after_first_day();
        progress.complete_day(2, date("2024-01-02"), 1, 1, "");
        progress.complete_day(3, date("2024-01-03"), 1, 1, "");

        assert!(progress.delete_log(date("2024-01-01")));
        assert_eq!(progress.current_day, 4);
        assert_eq!(progress.completed_days, vec![2, 3]);
        assert_eq!(progress.streak, 2);
    }

    #[test]
    fn test_delete_never_underflows_streak() {
        let mut progress = UserProgress::default();
        progress.pain_log.insert(
            date("2024-02-01"),
            PainLogEntry {
                back_pain: 1,
                knee_pain: 1,
                notes: String::new(),
                day_number: None,
            },
        );

        assert!(progress.delete_log(date("2024-02-01")));
        assert_eq!(progress.streak, 0);
        assert_eq!(progress.current_day, 1);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut progress = after_first_day();
        let update = LogUpdate {
            back_pain: Some(5),
            knee_pain: Some(1),
            notes: Some("updated".into()),
        };

        assert!(progress.update_log(date("2024-01-01"), &update));
        let entry = &progress.pain_log[&date("2024-01-01")];
        assert_eq!(entry.back_pain, 5);
        assert_eq!(entry.knee_pain, 1);
        assert_eq!(entry.notes, "updated");
        assert_eq!(entry.day_number, Some(1));
    }

    #[test]
    fn test_update_preserves_unset_fields() {
        let mut progress = after_first_day();
        let update = LogUpdate {
            knee_pain: Some(4),
            ..Default::default()
        };

        assert!(progress.update_log(date("2024-01-01"), &update));
        let entry = &progress.pain_log[&date("2024-01-01")];
        assert_eq!(entry.back_pain, 2);
        assert_eq!(entry.knee_pain, 4);
        assert_eq!(entry.notes, "felt fine");
    }

    #[test]
    fn test_update_missing_date_is_noop() {
        let mut progress = after_first_day();
        let before = progress.clone();
        assert!(!progress.update_log(date("2030-01-01"), &LogUpdate::default()));
        assert_eq!(progress, before);
    }

    #[test]
    fn test_latest_entry() {
        let mut progress = after_first_day();
        progress.complete_day(2, date("2024-01-05"), 4, 0, "");
        let (latest, entry) = progress.latest_entry().unwrap();
        assert_eq!(*latest, date("2024-01-05"));
        assert_eq!(entry.day_number, Some(2));
    }
}
