use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_make_training"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run CLI")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "cli exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn default_run_cleans_raw_content() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("raw_content.txt"),
        include_str!("fixtures/raw_content.txt"),
    )
    .unwrap();

    let output = run_in(dir.path(), &[]);
    assert_success(&output);

    let written = fs::read_to_string(dir.path().join("Make Training.txt")).unwrap();
    assert_eq!(written, include_str!("fixtures/expected/make_training.txt"));
}

#[test]
fn process_subcommand_matches_default() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("raw_content.txt"),
        "Content from:https://example.com/page extra text",
    )
    .unwrap();

    assert_success(&run_in(dir.path(), &["process"]));
    let written = fs::read_to_string(dir.path().join("Make Training.txt")).unwrap();
    assert_eq!(
        written,
        "\n\nSource: https://example.com/page\n\nhttps://example.com/page extra text"
    );
}

#[test]
fn output_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Make Training.txt"), "stale content that is longer").unwrap();
    fs::write(dir.path().join("raw_content.txt"), "<p>fresh</p>").unwrap();

    assert_success(&run_in(dir.path(), &[]));
    let written = fs::read_to_string(dir.path().join("Make Training.txt")).unwrap();
    assert_eq!(written, "fresh");
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("raw_content.txt"));
    assert!(!dir.path().join("Make Training.txt").exists());
}

#[test]
fn invalid_utf8_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("raw_content.txt"), [b'o', b'k', 0xc3, 0x28]).unwrap();

    let output = run_in(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(!dir.path().join("Make Training.txt").exists());
}

#[test]
fn stats_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("raw_content.txt"),
        include_str!("fixtures/raw_content.txt"),
    )
    .unwrap();

    let output = run_in(dir.path(), &["stats"]);
    assert_success(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("5 sections"), "unexpected report: {stdout}");
    assert!(stdout.contains("1 skipped"), "unexpected report: {stdout}");
    assert!(!dir.path().join("Make Training.txt").exists());
}

#[test]
fn bundle_then_process() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("urls.txt"), include_str!("fixtures/urls.txt")).unwrap();
    let docs = dir.path().join("make_docs");
    fs::create_dir(&docs).unwrap();
    fs::write(
        docs.join("https___www_make_com_en_help_scenarios_creating_a_scenario.txt"),
        "<h1>Creating a scenario</h1>\n",
    )
    .unwrap();
    fs::write(
        docs.join("https___www_make_com_en_help_tools_router.txt"),
        "Router\n\nRouters let you split a scenario.\n",
    )
    .unwrap();

    assert_success(&run_in(dir.path(), &["bundle"]));
    let raw = fs::read_to_string(dir.path().join("raw_content.txt")).unwrap();
    assert!(raw.starts_with(
        "Content from: https://www.make.com/en/help/scenarios/creating-a-scenario\n\n"
    ));

    assert_success(&run_in(dir.path(), &[]));
    let written = fs::read_to_string(dir.path().join("Make Training.txt")).unwrap();
    assert_eq!(
        written,
        "\n\nSource: https://www.make.com/en/help/scenarios/creating-a-scenario\n\n\
         https://www.make.com/en/help/scenarios/creating-a-scenario Creating a scenario\n\
         \n\nSource: https://www.make.com/en/help/tools/router\n\n\
         https://www.make.com/en/help/tools/router Router Routers let you split a scenario."
    );
}

#[test]
fn fetch_with_empty_url_list() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("urls.txt"), "\n\n").unwrap();

    let output = run_in(dir.path(), &["fetch"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("No URLs"));
    assert!(!dir.path().join("make_docs").exists());
}
