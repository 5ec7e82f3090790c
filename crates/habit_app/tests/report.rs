use std::fs;

use chrono::NaiveDate;
use habit_app::app::{run, AppConfig, Command};
use tempfile::tempdir;

fn render(config: &AppConfig, command: Command) -> String {
    let mut out = Vec::new();
    run(config, command, &mut out).expect("run command");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn stats_report_lists_each_habit() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("habits.json");
    fs::write(
        &store_path,
        r#"[
  {"id":"run","name":"Run","period":"daily","completionDates":["2025-10-16","2025-10-17","2025-10-18","2025-10-01"],"createdAt":"2025-09-01"},
  {"id":"call","name":"Call family","period":"weekly","completionDates":["2025-10-01"],"createdAt":"2025-09-01"}
]"#,
    )
    .expect("write fixture");

    let today = NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid date");
    let config = AppConfig::default()
        .with_store_path(&store_path)
        .with_today(today);

    let report = render(&config, Command::Stats);
    assert!(report.starts_with("Saturday, October 18: 1/2 done today (50%)"));
    assert!(report.contains("[x] Run (daily) - 3 day streak"));
    assert!(report.contains("    best streak: 3 days"));
    assert!(report.contains("    this month: 4"));
    assert!(report.contains("[ ] Call family (weekly)\n"));
    assert!(report.contains("    current streak: 0 weeks"));
    assert!(report.contains("    last completed: 2025-10-01 (17 days ago)"));
}

#[test]
fn add_and_toggle_update_the_store() {
    let temp = tempdir().expect("tempdir");
    let store_path = temp.path().join("habits.json");
    let today = NaiveDate::from_ymd_opt(2025, 10, 18).expect("valid date");
    let config = AppConfig::default()
        .with_store_path(&store_path)
        .with_today(today);

    let added = render(
        &config,
        Command::Add {
            name: vec!["Water".to_string(), "plants".to_string()],
            period: None,
        },
    );
    let id = added
        .trim()
        .rsplit(' ')
        .next()
        .expect("id in output")
        .to_string();
    assert!(added.starts_with("added Water plants (daily) as "));

    let toggled = render(&config, Command::Toggle { id: id.clone() });
    assert_eq!(toggled.trim(), "Water plants marked done for 2025-10-18");

    let stored = fs::read_to_string(&store_path).expect("read store");
    assert!(stored.contains("2025-10-18"));

    let report = render(&config, Command::Stats);
    assert!(report.contains("[x] Water plants (daily) - 1 day streak"));

    render(&config, Command::Delete { id });
    let report = render(&config, Command::Stats);
    assert!(report.contains("0/0 done today (0%)"));
}
