use std::{
    io::{Read, Write},
    net::TcpListener,
    thread,
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PLAN: &str = r#"{"weeks":[{"week":"Week 1: First chords","youtubeVideos":[{"title":"Holding the guitar","url":"https://youtu.be/hold","duration":"8:00"}],"learningArticles":[{"title":"Reading tabs","url":"https://example.com/tabs"}]},{"week":"Week 2: Strumming","youtubeVideos":[],"learningArticles":[]}]}"#;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and a database in
/// `temp_dir`
fn momentum_cmd(temp_dir: &TempDir) -> Command {
    let db_path = temp_dir.path().join("cli_test.db");
    let mut cmd = Command::cargo_bin("momentum").expect("Failed to find momentum binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path.to_str().expect("Non UTF-8 temp path"));
    cmd
}

fn onboard(temp_dir: &TempDir) {
    momentum_cmd(temp_dir)
        .args([
            "onboard",
            "--hobby",
            "Guitar",
            "--current",
            "beginner",
            "--goal",
            "hobby",
            "--time",
            "casual",
        ])
        .assert()
        .success();
}

/// Serves `body` to the first request on a local port and returns the
/// endpoint URL.
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while let Ok(n) = stream.read(&mut buf) {
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).ok();
    });

    format!("http://{addr}/generate-personalized-learning")
}

/// Endpoint nothing listens on.
fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{addr}/plan")
}

#[test]
fn test_cli_overview_before_onboarding() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Run `momentum onboard`"));
}

#[test]
fn test_cli_onboard_shows_labels() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args([
            "onboard",
            "--hobby",
            "Guitar",
            "--current",
            "some_experience",
            "--goal",
            "professional",
            "--time",
            "intense",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Onboarding completed"))
        .stdout(predicate::str::contains("- **Current level**: Some Experience"))
        .stdout(predicate::str::contains("- **Goal**: Professional Level"))
        .stdout(predicate::str::contains("10+ hours per week"));

    momentum_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Hobby**: Guitar"))
        .stdout(predicate::str::contains("0% complete"));
}

#[test]
fn test_cli_onboard_rejects_unknown_level() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args([
            "onboard",
            "--hobby",
            "Guitar",
            "--current",
            "wizard",
            "--goal",
            "hobby",
            "--time",
            "casual",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid skill level"));
}

#[test]
fn test_cli_profile_set() {
    let temp_dir = create_cli_test_environment();
    onboard(&temp_dir);

    momentum_cmd(&temp_dir)
        .args(["profile", "set", "--hobby", "Chess", "--time", "regular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Hobby set to 'Chess'"))
        .stdout(predicate::str::contains("- Time commitment set to 'regular'"))
        .stdout(predicate::str::contains("3-5 hours per week"));

    momentum_cmd(&temp_dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- **Hobby**: Chess"));
}

#[test]
fn test_cli_profile_set_requires_a_field() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args(["profile", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_cli_weeks_unlock_in_order() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args(["week", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [ ] Week 1 (id: 1)"))
        .stdout(predicate::str::contains("- [ ] Week 2 (id: 2, locked)"));

    momentum_cmd(&temp_dir)
        .args(["week", "toggle", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Note: Week 3 is locked until Week 1 is completed",
        ));

    momentum_cmd(&temp_dir)
        .args(["week", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed Week 1 (25% complete)"));

    momentum_cmd(&temp_dir)
        .args(["w", "t", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("50% complete"))
        .stdout(predicate::str::contains("- [x] Week 2 (id: 2)"));
}

#[test]
fn test_cli_cascade_flag_reopens_later_weeks() {
    let temp_dir = create_cli_test_environment();
    for id in ["1", "2"] {
        momentum_cmd(&temp_dir)
            .args(["week", "toggle", id])
            .assert()
            .success();
    }

    momentum_cmd(&temp_dir)
        .args(["--cascade", "week", "toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 later weeks reopened too"))
        .stdout(predicate::str::contains("0% complete"));
}

#[test]
fn test_cli_unknown_week() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args(["week", "toggle", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Week with ID '9' not found"));
}

#[test]
fn test_cli_plan_requires_complete_profile() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args(["--endpoint", &dead_endpoint(), "plan", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile is incomplete"));
}

#[test]
fn test_cli_plan_fetch_failure() {
    let temp_dir = create_cli_test_environment();
    onboard(&temp_dir);

    momentum_cmd(&temp_dir)
        .args(["--endpoint", &dead_endpoint(), "plan", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch learning plan"))
        .stderr(predicate::str::contains("momentum plan refresh"));
}

#[test]
fn test_cli_plan_is_cached_between_runs() {
    let temp_dir = create_cli_test_environment();
    onboard(&temp_dir);

    momentum_cmd(&temp_dir)
        .args(["--endpoint", &serve_once(PLAN), "plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Guitar learning plan"))
        .stdout(predicate::str::contains("from freshly generated"))
        .stdout(predicate::str::contains("### Week 1: First chords"))
        .stdout(predicate::str::contains(
            "- [Holding the guitar](https://youtu.be/hold) (8:00)",
        ))
        .stdout(predicate::str::contains("- [ ] Week 2 (id: 2, locked)"));

    // The generator is gone; the cached plan still answers
    momentum_cmd(&temp_dir)
        .args(["--endpoint", &dead_endpoint(), "plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from cache"));
}

#[test]
fn test_cli_resource_open_and_last() {
    let temp_dir = create_cli_test_environment();
    onboard(&temp_dir);

    momentum_cmd(&temp_dir)
        .args(["resource", "last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No resource opened yet"));

    momentum_cmd(&temp_dir)
        .args([
            "--endpoint",
            &serve_once(PLAN),
            "resource",
            "open",
            "--week",
            "1",
            "--kind",
            "article",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/tabs"));

    momentum_cmd(&temp_dir)
        .args(["--endpoint", &dead_endpoint(), "resource", "open", "--week", "2", "--kind", "video"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no video #1"));

    momentum_cmd(&temp_dir)
        .args(["resource", "last"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Reading tabs** (article, week 1)"));
}

#[test]
fn test_cli_rejects_invalid_endpoint() {
    let temp_dir = create_cli_test_environment();

    momentum_cmd(&temp_dir)
        .args(["--endpoint", "ftp://plans.example.com", "week", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
