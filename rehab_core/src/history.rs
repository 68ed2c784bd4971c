//! Dashboard views over the pain log.
//!
//! Everything here is read-only and derived from a loaded `UserProgress`.

use crate::{Config, PainLogEntry, UserProgress};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// One point on the pain chart
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub back_pain: u8,
    pub knee_pain: u8,
}

/// Headline recovery indicator
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum RecoveryStatus {
    Stable,
    Monitor,
}

impl fmt::Display for RecoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryStatus::Stable => f.write_str("Stable"),
            RecoveryStatus::Monitor => f.write_str("Monitor"),
        }
    }
}

/// Everything the dashboard shows at a glance
#[derive(Clone, Debug, Serialize)]
pub struct ProgressSummary {
    pub current_day: u32,
    pub program_length: u32,
    pub streak: u32,
    pub completed: usize,
    pub completion_percent: u32,
    pub status: RecoveryStatus,
    pub trend: Vec<TrendPoint>,
}

/// The last `limit` log entries in chronological order
pub fn pain_trend(progress: &UserProgress, limit: usize) -> Vec<TrendPoint> {
    let skip = progress.pain_log.len().saturating_sub(limit);
    progress
        .pain_log
        .iter()
        .skip(skip)
        .map(|(date, entry)| TrendPoint {
            date: *date,
            back_pain: entry.back_pain,
            knee_pain: entry.knee_pain,
        })
        .collect()
}

/// All log entries, newest first
pub fn recent_history(progress: &UserProgress) -> Vec<(NaiveDate, &PainLogEntry)> {
    progress
        .pain_log
        .iter()
        .rev()
        .map(|(date, entry)| (*date, entry))
        .collect()
}

/// Completed days as a rounded percentage of the programme length
///
/// Can exceed 100 once the cycle has been repeated past its nominal end.
pub fn completion_percent(progress: &UserProgress, program_length: u32) -> u32 {
    if program_length == 0 {
        return 0;
    }
    let ratio = progress.completed_days.len() as f64 / program_length as f64;
    (ratio * 100.0).round() as u32
}

/// `Monitor` when the latest entry's worst score is above `threshold`
pub fn recovery_status(progress: &UserProgress, threshold: u8) -> RecoveryStatus {
    match progress.latest_entry() {
        Some((_, entry)) if entry.max_pain() > threshold => RecoveryStatus::Monitor,
        _ => RecoveryStatus::Stable,
    }
}

pub fn summarize(progress: &UserProgress, config: &Config) -> ProgressSummary {
    ProgressSummary {
        current_day: progress.current_day,
        program_length: config.program.length_days,
        streak: progress.streak,
        completed: progress.completed_days.len(),
        completion_percent: completion_percent(progress, config.program.length_days),
        status: recovery_status(progress, config.alerts.status_monitor_threshold),
        trend: pain_trend(progress, config.history.trend_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn progress_with_logs(days: u32) -> UserProgress {
        let mut progress = UserProgress::default();
        let start = date("2024-01-01");
        for day in 1..=days {
            let logged = start + chrono::Duration::days(day as i64 - 1);
            progress.complete_day(day, logged, (day % 10) as u8, 1, "");
        }
        progress
    }

    #[test]
    fn test_trend_keeps_latest_in_order() {
        let progress = progress_with_logs(20);
        let trend = pain_trend(&progress, 14);

        assert_eq!(trend.len(), 14);
        assert_eq!(trend[0].date, date("2024-01-07"));
        assert_eq!(trend[13].date, date("2024-01-20"));
        assert!(trend.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_trend_shorter_than_limit() {
        let progress = progress_with_logs(3);
        assert_eq!(pain_trend(&progress, 14).len(), 3);
        assert!(pain_trend(&UserProgress::default(), 14).is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let progress = progress_with_logs(3);
        let history = recent_history(&progress);
        let dates: Vec<_> = history.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-03"), date("2024-01-02"), date("2024-01-01")]
        );
        assert_eq!(history[0].1.day_number, Some(3));
    }

    #[test]
    fn test_completion_percent() {
        assert_eq!(completion_percent(&UserProgress::default(), 42), 0);
        assert_eq!(completion_percent(&progress_with_logs(21), 42), 50);
        assert_eq!(completion_percent(&progress_with_logs(1), 42), 2);
        assert_eq!(completion_percent(&progress_with_logs(5), 0), 0);
    }

    #[test]
    fn test_recovery_status() {
        let mut progress = UserProgress::default();
        assert_eq!(recovery_status(&progress, 4), RecoveryStatus::Stable);

        progress.complete_day(1, date("2024-01-01"), 6, 0, "");
        assert_eq!(recovery_status(&progress, 4), RecoveryStatus::Monitor);

        progress.complete_day(2, date("2024-01-02"), 2, 4, "");
        assert_eq!(recovery_status(&progress, 4), RecoveryStatus::Stable);
    }

    #[test]
    fn test_summarize() {
        let progress = progress_with_logs(7);
        let summary = summarize(&progress, &Config::default());

        assert_eq!(summary.current_day, 8);
        assert_eq!(summary.streak, 7);
        assert_eq!(summary.completed, 7);
        assert_eq!(summary.completion_percent, 17);
        assert_eq!(summary.program_length, 42);
        assert_eq!(summary.trend.len(), 7);
    }
}
