use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use habit_core::{parse_day, Period};
use habit_domain::{streak_label, HabitReport, HabitService};
use tracing::{debug, info, warn};

const DEFAULT_STORE_FILE: &str = "habits.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub(crate) store_path: PathBuf,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) default_period: Period,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup("HABITS_FILE") {
            if !path.trim().is_empty() {
                config.store_path = PathBuf::from(path.trim());
            }
        }
        if let Some(raw) = lookup("HABITS_TODAY") {
            match parse_day(&raw) {
                Ok(day) => config.today = Some(day),
                Err(err) => warn!(%err, "ignoring HABITS_TODAY"),
            }
        }
        if let Some(raw) = lookup("HABITS_DEFAULT_PERIOD") {
            match raw.parse::<Period>() {
                Ok(period) => config.default_period = period,
                Err(err) => warn!(%err, "ignoring HABITS_DEFAULT_PERIOD"),
            }
        }
        config
    }

    pub fn with_store_path(mut self, path: impl AsRef<Path>) -> Self {
        self.store_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The configured override, otherwise the local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            today: None,
            default_period: Period::Daily,
        }
    }
}

/// Command-line entry point. No subcommand means `stats`.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "habit_tracker", version, about = "Habit streaks and totals")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Stats)
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show streaks and totals for every habit
    Stats,
    /// Mark a habit done for today, or undo it
    Toggle { id: String },
    /// Track a new habit
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// daily, weekly, monthly or yearly; defaults to HABITS_DEFAULT_PERIOD
        #[arg(long, short)]
        period: Option<Period>,
    },
    /// Change a habit's name
    Rename {
        id: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Stop tracking a habit
    Delete { id: String },
}

pub fn run(config: &AppConfig, command: Command, out: &mut impl Write) -> Result<()> {
    let today = config.today();
    info!(store = %config.store_path.display(), %today, "opening habit store");
    let service = HabitService::builder()
        .with_store(&config.store_path)
        .build()
        .with_context(|| format!("failed to open {}", config.store_path.display()))?;

    match command {
        Command::Stats => render_stats(&service, today, out)?,
        Command::Toggle { id } => {
            let done = service.toggle_completion(&id, today)?;
            let habit = service.get(&id)?;
            let state = if done { "done" } else { "not done" };
            writeln!(out, "{} marked {state} for {today}", habit.name)?;
        }
        Command::Add { name, period } => {
            let period = period.unwrap_or(config.default_period);
            let habit = service.add_habit(&name.join(" "), period, today)?;
            writeln!(out, "added {} ({}) as {}", habit.name, habit.period, habit.id)?;
        }
        Command::Rename { id, name } => {
            service.rename_habit(&id, &name.join(" "))?;
            writeln!(out, "renamed {id}")?;
        }
        Command::Delete { id } => {
            service.delete_habit(&id)?;
            writeln!(out, "deleted {id}")?;
        }
    }
    Ok(())
}

fn render_stats(service: &HabitService, today: NaiveDate, out: &mut impl Write) -> Result<()> {
    let progress = service.daily_progress(today);
    writeln!(
        out,
        "{}: {}/{} done today ({}%)",
        today.format("%A, %B %-d"),
        progress.completed,
        progress.total,
        progress.percent
    )?;
    let reports = service.stats(today);
    debug!(count = reports.len(), "rendering habit stats");
    for report in &reports {
        render_report(report, today, out)?;
    }
    Ok(())
}

fn render_report(report: &HabitReport, today: NaiveDate, out: &mut impl Write) -> Result<()> {
    let HabitReport { habit, stats } = report;
    let period = habit.period;
    let mark = if habit.is_completed_on(today) { "x" } else { " " };
    writeln!(out)?;
    write!(out, "[{mark}] {} ({period})", habit.name)?;
    if stats.current_streak > 0 {
        write!(out, " - {}", streak_label(period, stats.current_streak))?;
    }
    writeln!(out)?;
    writeln!(out, "    id: {}", habit.id)?;
    writeln!(
        out,
        "    current streak: {} {}",
        stats.current_streak,
        period.unit_label(stats.current_streak)
    )?;
    writeln!(
        out,
        "    best streak: {} {}",
        stats.best_streak,
        period.unit_label(stats.best_streak)
    )?;
    writeln!(out, "    total completions: {}", stats.total_completions)?;
    writeln!(out, "    this week: {}", stats.this_week)?;
    writeln!(out, "    this month: {}", stats.this_month)?;
    match (stats.last_completion, stats.days_since_last_completion) {
        (Some(last), Some(0)) => writeln!(out, "    last completed: {last} (today)")?,
        (Some(last), Some(1)) => writeln!(out, "    last completed: {last} (1 day ago)")?,
        (Some(last), Some(days)) => writeln!(out, "    last completed: {last} ({days} days ago)")?,
        _ => writeln!(out, "    last completed: never")?,
    }
    Ok(())
}
