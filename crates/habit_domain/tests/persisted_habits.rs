use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use habit_core::Period;
use habit_domain::{HabitService, LoadOutcome};
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn write_file(path: &PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write fixture");
}

#[test]
fn mutations_survive_reopening_the_store() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("data").join("habits.json");

    let service = HabitService::builder()
        .with_store(&store_path)
        .build()
        .expect("build habit service");
    assert!(service.habits().is_empty());

    let meditate = service
        .add_habit("Meditate", Period::Daily, day(2025, 10, 16))
        .expect("add daily habit");
    let review = service
        .add_habit("Weekly review", Period::Weekly, day(2025, 10, 16))
        .expect("add weekly habit");

    for today in [day(2025, 10, 16), day(2025, 10, 17), day(2025, 10, 18)] {
        service
            .toggle_completion(&meditate.id, today)
            .expect("toggle meditate");
    }
    service
        .toggle_completion(&review.id, day(2025, 10, 14))
        .expect("toggle review");

    let reopened = HabitService::builder()
        .with_store(&store_path)
        .build()
        .expect("reopen habit service");
    assert_eq!(reopened.habits(), service.habits());

    let today = day(2025, 10, 18);
    let stats = reopened.stats_for(&meditate.id, today).expect("stats");
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.best_streak, 3);
    assert_eq!(stats.this_week, 3);
    assert_eq!(stats.days_since_last_completion, Some(0));

    let review_stats = reopened.stats_for(&review.id, today).expect("stats");
    assert_eq!(review_stats.current_streak, 1);
    assert_eq!(review_stats.days_since_last_completion, Some(4));

    let progress = reopened.daily_progress(today);
    assert_eq!((progress.completed, progress.total, progress.percent), (1, 2, 50));

    reopened.delete_habit(&review.id).expect("delete review");
    let stored = fs::read_to_string(&store_path).expect("read store");
    assert!(!stored.contains("Weekly review"));
    assert!(stored.contains("\"completionDates\""));
}

#[test]
fn legacy_store_is_reset_on_open() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("habits.json");
    write_file(&store_path, r#"["Drink water", "Walk the dog"]"#);

    let service = HabitService::builder()
        .with_store(&store_path)
        .build()
        .expect("build habit service");
    assert!(service.habits().is_empty());
    assert_eq!(
        service.reload().expect("reload"),
        LoadOutcome::Loaded(Vec::new())
    );
}

#[test]
fn timestamp_creation_dates_are_accepted() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("habits.json");
    write_file(
        &store_path,
        r#"[{"id":"1760000000000","name":"Floss","period":"monthly","completionDates":["2025-08-03","2025-09-30","2025-10-01"],"createdAt":"2025-08-01T07:30:00.000Z"}]"#,
    );

    let service = HabitService::builder()
        .with_store(&store_path)
        .build()
        .expect("build habit service");
    let habit = service.get("1760000000000").expect("habit present");
    assert_eq!(habit.created_at, day(2025, 8, 1));

    let stats = service
        .stats_for(&habit.id, day(2025, 10, 18))
        .expect("stats");
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.this_month, 1);
}

#[test]
fn failed_save_leaves_habits_untouched() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("habits.json");

    let service = HabitService::builder()
        .with_store(&store_path)
        .build()
        .expect("build habit service");
    let habit = service
        .add_habit("Stretch", Period::Daily, day(2025, 10, 17))
        .expect("add habit");
    service
        .toggle_completion(&habit.id, day(2025, 10, 17))
        .expect("toggle habit");
    let before = service.habits();

    // A directory in place of the file makes every write fail.
    fs::remove_file(&store_path).expect("remove store");
    fs::create_dir(&store_path).expect("block store path");

    let today = day(2025, 10, 18);
    assert!(service.toggle_completion(&habit.id, today).is_err());
    assert!(service
        .toggle_completion(&habit.id, day(2025, 10, 17))
        .is_err());
    assert!(service.add_habit("Read", Period::Weekly, today).is_err());
    assert!(service.rename_habit(&habit.id, "Yoga").is_err());
    assert!(service.delete_habit(&habit.id).is_err());

    assert_eq!(service.habits(), before);
    assert!(!service
        .is_completed_on(&habit.id, today)
        .expect("habit still present"));
}
