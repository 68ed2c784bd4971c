use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rehab_core::config::DataConfig;
use rehab_core::history::recent_history;
use rehab_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rehab")]
#[command(about = "Back and knee rehab programme tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day's workout (default: the next day to do)
    Today {
        /// Programme day to show instead of the current one
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        day: Option<u32>,
    },

    /// Mark a workout complete and log pain scores
    Complete {
        /// Back pain, 0-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        back: u8,

        /// Knee pain, 0-10
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        knee: u8,

        /// How the session went
        #[arg(long, default_value = "")]
        notes: String,

        /// Programme day completed (default: the current day)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        day: Option<u32>,

        /// Log under this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Edit the pain log for a date
    Edit {
        /// Date of the entry (YYYY-MM-DD)
        date: NaiveDate,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        back: Option<u8>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        knee: Option<u8>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete the log for a date and undo its completion
    Delete {
        /// Date of the entry (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// List logged sessions, newest first
    History,

    /// Progress overview and pain trend
    Status,

    /// Log a meal from a scanned code
    Scan {
        /// Code read from the meal packaging
        code: String,

        /// Log under this date instead of now (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show meals logged on a date
    Meals {
        /// Date to show (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a logged meal
    RemoveMeal {
        id: uuid::Uuid,
    },

    /// Export the pain log to CSV
    Export {
        /// Output file (default: <data-dir>/pain_log.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        rehab_core::logging::init_with_level("debug");
    } else {
        rehab_core::logging::init();
    }

    let errors = validate_program();
    if !errors.is_empty() {
        eprintln!("Program validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::ProgramValidation("Invalid program".into()));
    }

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let progress_path = DataConfig::progress_path(&data_dir);

    match cli.command.unwrap_or(Commands::Today { day: None }) {
        Commands::Today { day } => cmd_today(&progress_path, day, cli.verbose),
        Commands::Complete {
            back,
            knee,
            notes,
            day,
            date,
        } => {
            let clock = FixedClock(date.unwrap_or_else(|| SystemClock.today()));
            let store = ProgressStore::with_clock(&progress_path, clock);
            cmd_complete(&store, &config, day, back, knee, &notes)
        }
        Commands::Edit {
            date,
            back,
            knee,
            notes,
        } => {
            let update = LogUpdate {
                back_pain: back,
                knee_pain: knee,
                notes,
            };
            cmd_edit(&ProgressStore::new(&progress_path), date, &update)
        }
        Commands::Delete { date } => cmd_delete(&ProgressStore::new(&progress_path), date),
        Commands::History => cmd_history(&progress_path, &config),
        Commands::Status => cmd_status(&progress_path, &config),
        Commands::Scan { code, date } => {
            let logged_at = date.map(Meal::backdated).unwrap_or_else(Utc::now);
            cmd_scan(&data_dir, &code, logged_at)
        }
        Commands::Meals { date } => cmd_meals(&data_dir, &config, date),
        Commands::RemoveMeal { id } => cmd_remove_meal(&data_dir, id),
        Commands::Export { output } => {
            let output = output.unwrap_or_else(|| data_dir.join("pain_log.csv"));
            cmd_export(&progress_path, &output)
        }
    }
}

fn cmd_today(progress_path: &Path, day: Option<u32>, verbose: bool) -> Result<()> {
    let progress = UserProgress::load(progress_path);
    let day = day.unwrap_or(progress.current_day);
    let workout = workout_for_day(day);

    display_workout(&workout, progress.is_completed(day), verbose);
    Ok(())
}

fn cmd_complete<C: Clock>(
    store: &ProgressStore<C>,
    config: &Config,
    day: Option<u32>,
    back: u8,
    knee: u8,
    notes: &str,
) -> Result<()> {
    let day = match day {
        Some(d) => d,
        None => store.load().current_day,
    };

    let progress = store.mark_day_complete(day, back, knee, notes)?;
    let today = store.today();

    println!("✓ Day {} complete (logged for {})", day, today);
    println!(
        "  Back: {}/10 ({})  Knee: {}/10 ({})",
        back,
        PainLevel::from_score(back),
        knee,
        PainLevel::from_score(knee)
    );
    println!("  Streak: {}", progress.streak);
    println!("  Next up: day {}", progress.current_day);

    let threshold = config.alerts.pain_warning_threshold;
    if back.max(knee) > threshold {
        eprintln!(
            "⚠ Warning: your pain level is high (above {}/10). Consider a regression next session.",
            threshold
        );
    }

    Ok(())
}

fn cmd_edit<C: Clock>(store: &ProgressStore<C>, date: NaiveDate, update: &LogUpdate) -> Result<()> {
    if update.is_empty() {
        println!("Nothing to change - pass --back, --knee or --notes.");
        return Ok(());
    }

    let progress = store.update_workout_log(date, update)?;
    match progress.pain_log.get(&date) {
        Some(entry) => {
            println!("✓ Updated log for {}", date);
            display_entry(date, entry);
        }
        None => println!("No log found for {} - nothing changed.", date),
    }
    Ok(())
}

fn cmd_delete<C: Clock>(store: &ProgressStore<C>, date: NaiveDate) -> Result<()> {
    let existed = store.load().pain_log.contains_key(&date);
    let progress = store.delete_workout_log(date)?;

    if existed {
        println!("✓ Deleted log for {}", date);
        println!("  Current day: {}", progress.current_day);
        println!("  Streak: {}", progress.streak);
    } else {
        println!("No log found for {} - nothing changed.", date);
    }
    Ok(())
}

fn cmd_history(progress_path: &Path, config: &Config) -> Result<()> {
    let progress = UserProgress::load(progress_path);
    let history = recent_history(&progress);

    if history.is_empty() {
        println!("No sessions logged yet.");
        return Ok(());
    }

    println!("Logged sessions ({} total):", history.len());
    for (date, entry) in history {
        display_entry(date, entry);
        if entry.is_high_pain(config.alerts.status_monitor_threshold) {
            println!("    ⚠ high pain");
        }
    }
    Ok(())
}

fn cmd_status(progress_path: &Path, config: &Config) -> Result<()> {
    let progress = UserProgress::load(progress_path);
    let summary = summarize(&progress, config);
    let next = workout_for_day(summary.current_day);

    println!(
        "Day {} of {} • Week {}",
        summary.current_day,
        summary.program_length,
        week_number(summary.current_day)
    );
    println!("  Streak:     {} days", summary.streak);
    println!(
        "  Completion: {}% ({} days)",
        summary.completion_percent, summary.completed
    );
    println!("  Status:     {}", summary.status);
    println!("  Up next:    {} (~{} min)", next.title, next.duration_minutes);

    if !summary.trend.is_empty() {
        println!();
        println!("Pain trend (back / knee):");
        for point in &summary.trend {
            println!(
                "  {}  {:>2} {:<10} {:>2} {:<10} {}",
                point.date.format("%a %m-%d"),
                point.back_pain,
                "#".repeat(point.back_pain as usize),
                point.knee_pain,
                "#".repeat(point.knee_pain as usize),
                PainLevel::from_score(point.back_pain.max(point.knee_pain))
            );
        }
    }
    Ok(())
}

fn cmd_scan(data_dir: &Path, code: &str, logged_at: DateTime<Utc>) -> Result<()> {
    let meal = Meal::from_scan(code, logged_at);
    let mut log = JsonlMealLog::new(DataConfig::meals_path(data_dir));
    log.append(&meal)?;

    println!("✓ Logged {}", meal.name);
    println!("  {} kcal • {}g protein", meal.calories, meal.protein);
    println!("  id: {}", meal.id);
    Ok(())
}

fn cmd_meals(data_dir: &Path, config: &Config, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(|| SystemClock.today());
    let log = JsonlMealLog::new(DataConfig::meals_path(data_dir));
    let meals = log.meals_on(date)?;

    if meals.is_empty() {
        println!("No meals logged for {}.", date);
        return Ok(());
    }

    println!("Meals for {}:", date);
    for meal in &meals {
        println!(
            "  {}  {:<30} {:>4} kcal {:>3}g protein  [{}]",
            meal.logged_at.with_timezone(&chrono::Local).format("%H:%M"),
            meal.name,
            meal.calories,
            meal.protein,
            meal.id
        );
    }

    let totals = MealTotals::of(&meals);
    let targets = &config.nutrition;
    println!(
        "Total: {} / {} kcal • {} / {}g protein",
        totals.calories, targets.calorie_target, totals.protein, targets.protein_target
    );
    Ok(())
}

fn cmd_remove_meal(data_dir: &Path, id: uuid::Uuid) -> Result<()> {
    let log = JsonlMealLog::new(DataConfig::meals_path(data_dir));
    match log.remove(id)? {
        Some(meal) => println!("✓ Removed {}", meal.name),
        None => println!("No meal with id {}.", id),
    }
    Ok(())
}

fn cmd_export(progress_path: &Path, output: &Path) -> Result<()> {
    let progress = UserProgress::load(progress_path);
    let count = export_pain_log(&progress, output)?;

    println!("✓ Exported {} entries", count);
    println!("  CSV: {}", output.display());
    Ok(())
}

fn display_workout(workout: &DailyWorkout, completed: bool, verbose: bool) {
    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  DAY {} • {}",
        workout.day_number,
        ProgramDay::from_day(workout.day_number).weekday_name()
    );
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", workout.title);
    println!("  Duration: ~{} min", workout.duration_minutes);
    if completed {
        println!("  ✓ Already completed");
    }

    for block in &workout.blocks {
        println!();
        println!("  [{}] {}", block.category, block.title);
        for exercise in &block.exercises {
            let sets = exercise
                .sets
                .map(|s| format!("{} x ", s))
                .unwrap_or_default();
            let reps = exercise.reps.as_deref().unwrap_or("");
            println!("    • {} - {}{}", exercise.name, sets, reps);
            if let Some(ref notes) = exercise.notes {
                println!("      {}", notes);
            }
            if let Some(ref video) = exercise.video {
                println!("      ▶ {}", video.embed_url());
                if verbose {
                    println!("        {}", video.thumbnail_url());
                }
            }
        }
    }

    println!();
    println!("  Cardio");
    println!("    Outdoor: {}", workout.cardio.outdoor);
    println!("    Indoor:  {}", workout.cardio.indoor);
    println!("    ℹ {}", workout.cardio.notes);
    println!();
}

fn display_entry(date: NaiveDate, entry: &PainLogEntry) {
    let day = entry
        .day_number
        .map(|d| format!("day {}", d))
        .unwrap_or_else(|| "day ?".to_string());
    println!(
        "  {}  {:<7} back {}/10  knee {}/10  {:<16} {}",
        date,
        day,
        entry.back_pain,
        entry.knee_pain,
        PainLevel::from_score(entry.max_pain()).label(),
        entry.notes
    );
}
