use anyhow::Result;
use notizia_testing::TestWorld;
use notizia_testing::assertions::{assert_len, assert_method_count, assert_total_sessions, id_of};
use predicates::prelude::*;

const CSV_HEADER_LINE: &str = "date;client;gender;age;problem_category;problem_text;case_status;method;duration_min;sud_before;sud_after;sud_delta";

fn add_session(world: &TestWorld, case_id: &str, method: &str, at: &str, duration: &str) -> Result<()> {
    world.run_json(&[
        "session",
        "add",
        case_id,
        "--method",
        method,
        "--started-at",
        at,
        "--duration",
        duration,
    ])?;
    Ok(())
}

/// Anna (w, 34): resolved panic case with two coaching sessions.
/// Ben (m, 61): open sleep case with one session of classic hypnosis.
fn seed(world: &TestWorld) -> Result<()> {
    let anna = id_of(&world.run_json(&["client", "add", "Anna", "--gender", "w", "--age", "34"])?)?;
    let ben = id_of(&world.run_json(&["client", "add", "Ben", "--gender", "m", "--age", "61"])?)?;

    let panic = id_of(&world.run_json(&[
        "case",
        "add",
        &anna.to_string(),
        "--problem",
        "panic",
        "--started-at",
        "2025-01-06",
        "--status",
        "resolved",
    ])?)?
    .to_string();
    add_session(world, &panic, "coaching", "2025-01-06T10:00:00Z", "60")?;
    add_session(world, &panic, "coaching", "2025-01-13T10:00:00Z", "50")?;

    let sleep = id_of(&world.run_json(&[
        "case",
        "add",
        &ben.to_string(),
        "--problem",
        "sleep",
        "--started-at",
        "2025-02-03",
    ])?)?
    .to_string();
    add_session(world, &sleep, "klassische_hypnose", "2025-02-03T09:00:00Z", "90")?;

    Ok(())
}

#[test]
fn test_report_over_all_sessions() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    let report = world.run_json(&["report", "run"])?;
    let result = &report["result"];

    assert_total_sessions(result, 3)?;
    assert_method_count(result, "coaching", 2)?;
    assert_method_count(result, "klassische_hypnose", 1)?;
    assert_eq!(result["closed_cases"], 1);
    assert_eq!(result["by_gender"]["w"], 2);
    assert_eq!(result["by_gender"]["m"], 1);
    assert_eq!(result["trend_month"][0]["key"], "2025-01");
    assert_eq!(result["trend_month"][0]["count"], 2);
    assert_eq!(result["trend_month"][1]["key"], "2025-02");
    Ok(())
}

#[test]
fn test_report_filters() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    let men = world.run_json(&["report", "run", "--gender", "m"])?;
    assert_total_sessions(&men["result"], 1)?;
    assert_eq!(men["query"]["gender"], "m");

    let older = world.run_json(&["report", "run", "--age-min", "40"])?;
    assert_total_sessions(&older["result"], 1)?;

    let regulars = world.run_json(&["report", "run", "--min-sessions", "2"])?;
    assert_total_sessions(&regulars["result"], 2)?;
    Ok(())
}

#[test]
fn test_plain_report_mentions_methods() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    let result = world.run(&["report", "run"])?;
    assert!(result.success());
    assert!(result.stdout().contains("Sessions:      3"));
    assert!(result.stdout().contains("Coaching"));
    Ok(())
}

#[test]
fn test_saved_queries() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    world.run_json(&["query", "save", "men", "--gender", "m"])?;
    assert!(world.data_dir().join("queries.toml").exists());

    let queries = world.run_json(&["query", "list"])?;
    assert_len(&queries, 1)?;
    assert_eq!(queries[0]["name"], "men");

    let saved = world.run_json(&["report", "run", "--saved", "men"])?;
    assert_total_sessions(&saved["result"], 1)?;

    let overridden = world.run_json(&["report", "run", "--saved", "men", "--gender", "w"])?;
    assert_total_sessions(&overridden["result"], 2)?;

    world.run_json(&["query", "delete", "men"])?;
    let queries = world.run_json(&["query", "list"])?;
    assert_len(&queries, 0)?;

    let missing = world.run(&["query", "delete", "men"])?;
    assert!(!missing.success());

    let unknown = world.run(&["report", "run", "--saved", "nobody"])?;
    assert!(!unknown.success());
    assert!(unknown.stderr().contains("no saved query"));
    Ok(())
}

#[test]
fn test_crosstabs() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    let problems = world.run_json(&["report", "crosstab", "problems"])?;
    assert_len(&problems, 2)?;

    let averages = world.run_json(&["report", "crosstab", "avg-closed-by-method"])?;
    assert_len(&averages, 1)?;
    assert_eq!(averages[0]["method"], "coaching");
    assert_eq!(averages[0]["avg"].as_f64(), Some(2.0));
    assert_eq!(averages[0]["cases"], 1);
    Ok(())
}

#[test]
#[allow(deprecated)]
fn test_csv_export_to_stdout() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;

    let mut cmd = assert_cmd::Command::cargo_bin("notizia")?;
    world.configure_command(&mut cmd, "plain");
    cmd.args(["report", "export", "--as", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(CSV_HEADER_LINE))
        .stdout(predicate::str::contains(";Anna;w;34;panic;"));
    Ok(())
}

#[test]
fn test_anonymized_json_export_to_file() -> Result<()> {
    let world = TestWorld::new();
    seed(&world)?;
    let path = world.temp_dir().join("closed.json");
    let path_arg = path.to_string_lossy().to_string();

    let summary = world.run_json(&[
        "report",
        "export",
        "--as",
        "json",
        "--closed-only",
        "--anonymize",
        "--output",
        &path_arg,
    ])?;
    assert_eq!(summary["records"], 2);

    let exported: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_len(&exported, 2)?;
    for record in exported.as_array().into_iter().flatten() {
        assert!(record["client"].as_str().is_some_and(|c| c.starts_with("Client ")));
        assert_eq!(record["case"]["status"], "resolved");
    }
    Ok(())
}

#[test]
fn test_config_enables_anonymized_exports() -> Result<()> {
    let world = TestWorld::new().with_config("[export]\nanonymize = true\n");
    seed(&world)?;

    let result = world.run(&["report", "export", "--as", "csv"])?;
    assert!(result.success());
    assert!(!result.stdout().contains("Anna"));
    Ok(())
}

#[test]
fn test_demo_needs_no_workspace() -> Result<()> {
    let world = TestWorld::new();

    let report = world.run_json(&["demo"])?;
    assert_total_sessions(&report["result"], 10)?;
    assert!(!world.data_dir().join("notizia.db").exists());
    Ok(())
}
