#![forbid(unsafe_code)]

//! Scripted demo runs end to end, through the same entry point as the binary.
//!
//! Run:
//!   cargo test -p waypoint-demo --test demo_script

use std::io::Write;

use clap::Parser;
use waypoint_demo::cli::{Cli, run};
use waypoint_demo::data;

fn run_args(args: &[&str]) -> Vec<String> {
    let mut argv = vec!["waypoint-demo"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("parse");
    let mut out = Vec::new();
    run(&cli, &mut out).expect("run");
    String::from_utf8(out)
        .expect("utf8")
        .lines()
        .map(str::to_string)
        .collect()
}

fn json_lines(args: &[&str]) -> Vec<serde_json::Value> {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    run_args(&full)
        .iter()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn default_script_walks_every_page() {
    let turns = json_lines(&[]);
    let steps: Vec<_> = turns
        .iter()
        .map(|t| t["step"].as_str().unwrap_or("-").to_string())
        .collect();
    assert_eq!(
        steps,
        [
            "dash-welcome",
            "dash-summary",
            "dash-streak",
            "goals-list",
            "dash-streak",
            "nutrition-macros",
            "nutrition-log",
            "coaching-coach",
            "dash-welcome",
            "-",
        ]
    );
    let events: Vec<_> = turns
        .iter()
        .map(|t| t["event"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(events[0], "started");
    assert_eq!(events[3], "next");
    assert_eq!(events[4], "previous");
    assert_eq!(events[5], "navigation");
    assert_eq!(events[8], "navigation");
    assert_eq!(events[9], "ended");
    assert_eq!(turns[9]["progress"], 0);
    assert_eq!(turns[9]["notices"][0], "Tour ended");
}

#[test]
fn run_to_completion() {
    let mut script = vec!["start"];
    script.extend(std::iter::repeat_n("next", 9));
    let joined = script.join(",");
    let turns = json_lines(&["--script", &joined]);

    let progress: Vec<u64> = turns
        .iter()
        .map(|t| t["progress"].as_u64().unwrap_or(999))
        .collect();
    assert_eq!(progress, [11, 22, 33, 44, 56, 67, 78, 89, 100, 0]);
    assert_eq!(turns[9]["event"], "completed");
    assert_eq!(turns[8]["path"], "/coaching");
}

#[test]
fn starting_mid_catalog_uses_the_route_page() {
    let turns = json_lines(&["--path", "/nutrition", "--script", "start,prev"]);
    assert_eq!(turns[0]["step"], "nutrition-macros");
    assert_eq!(turns[1]["step"], "goals-add");
    assert_eq!(turns[1]["path"], "/goals");
    assert_eq!(turns[1]["highlighted"], "add-goal-button");
}

#[test]
fn text_output_is_one_line_per_action() {
    let lines = run_args(&["--script", "start,next,end"]);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("start"));
    assert!(lines[0].contains("dash-welcome"));
    assert!(lines[0].contains("centered"));
    assert!(lines[1].contains("lit=weekly-summary"), "{}", lines[1]);
    assert!(lines[2].contains("(inactive)"));
}

#[test]
fn config_file_changes_placement() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp");
    writeln!(
        file,
        "gap = 0.0\nnotifications = false\n[tooltip_size]\nwidth = 100.0\nheight = 50.0"
    )
    .expect("write");

    let path = file.path().to_str().expect("utf8 path").to_string();
    let turns = json_lines(&["--config", &path, "--script", "start,next"]);
    assert!(turns[0]["notices"].as_array().is_some_and(Vec::is_empty));

    // weekly-summary: top 96, left 264, 480x220; right side, zero gap.
    let placement = &turns[1]["placement"];
    assert_eq!(placement["left"], 744.0);
    assert_eq!(placement["top"], 96.0 + 110.0 - 25.0);
}

#[test]
fn catalog_file_replaces_sample_tour() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp");
    write!(
        file,
        r#"{{"pages": [{{"id": "home", "path": "/", "name": "Home", "steps": [
            {{"id": "hello", "title": "Hello", "pageId": "home", "order": 1}}
        ]}}]}}"#
    )
    .expect("write");

    let path = file.path().to_str().expect("utf8 path").to_string();
    let turns = json_lines(&["--catalog", &path, "--path", "/", "--script", "start,next"]);
    assert_eq!(turns[0]["step"], "hello");
    assert_eq!(turns[0]["total_steps"], 1);
    assert_eq!(turns[1]["event"], "completed");
}

#[test]
fn sample_catalog_is_valid() {
    let catalog = data::sample_catalog().expect("sample catalog validates");
    assert!(catalog.pages().iter().all(|p| p.step_count() > 0));
}
