//! Process driver tests against a real subprocess.
//!
//! `/bin/sh -c <script>` stands in for gnubg and reads the command script
//! from stdin the same way.
#![cfg(unix)]

mod common;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use gnubg::{build_hint_commands, CommandSequence, EngineConfig, EngineError, GnubgRunner};

const SGF: &str = "(;FF[4]GM[6]CA[UTF-8]AP[GNU Backgammon:1.07.001]MI[length:0])";

fn runner(script: &str, scratch_dir: &Path) -> GnubgRunner {
    GnubgRunner::new(common::sh_engine(script, scratch_dir))
}

fn commands(lines: &[&str]) -> CommandSequence {
    lines.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Script handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn appends_exactly_one_quit() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat", dir.path());

    let output = runner.execute(&commands(&["set dice 3 1", "hint"])).await.unwrap();
    assert_eq!(output, "set dice 3 1\nhint\nquit\n");

    // A sequence that already ends in quit still gets exactly one more
    let output = runner.execute(&commands(&["eval", "quit"])).await.unwrap();
    assert_eq!(output, "eval\nquit\nquit\n");
}

#[tokio::test]
async fn stderr_is_ignored_when_stdout_present() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null; echo 'warning: no rc file' >&2; echo ok", dir.path());

    let output = runner.execute(&commands(&["eval"])).await.unwrap();
    assert_eq!(output, "ok\n");
}

#[tokio::test]
async fn stderr_without_stdout_is_execution_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null; echo 'Unknown keyword' >&2; exit 1", dir.path());

    match runner.execute(&commands(&["bogus"])).await {
        Err(EngineError::ExecutionFailure(stderr)) => assert_eq!(stderr, "Unknown keyword\n"),
        other => panic!("expected execution failure, got {other:?}"),
    }
}

#[tokio::test]
async fn whitespace_stderr_without_stdout_is_execution_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null; printf '\\n' >&2", dir.path());

    match runner.execute(&commands(&["eval"])).await {
        Err(EngineError::ExecutionFailure(stderr)) => assert_eq!(stderr, "\n"),
        other => panic!("expected execution failure, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_output_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null", dir.path());

    assert_eq!(runner.execute(&commands(&["eval"])).await.unwrap(), "");
}

// ---------------------------------------------------------------------------
// Timeout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_engine_times_out_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GnubgRunner::new(EngineConfig {
        timeout: Duration::from_millis(300),
        ..common::sh_engine("echo 'Equity: +0.500'; exec sleep 10", dir.path())
    });

    let started = Instant::now();
    let err = runner.execute(&commands(&["eval"])).await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn runner_is_usable_after_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GnubgRunner::new(EngineConfig {
        timeout: Duration::from_millis(300),
        ..common::sh_engine(
            "read -r first; case \"$first\" in slow) exec sleep 10;; esac; echo fast",
            dir.path(),
        )
    });

    assert!(runner.execute(&commands(&["slow"])).await.unwrap_err().is_timeout());
    assert_eq!(runner.execute(&commands(&["fast"])).await.unwrap(), "fast\n");
}

// ---------------------------------------------------------------------------
// Mutual exclusion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_invocations_never_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("runs.log");
    let script = format!(
        "echo start >> '{log}'; sleep 0.3; cat > /dev/null; echo end >> '{log}'; echo done",
        log = log.display()
    );
    let runner = Arc::new(runner(&script, dir.path()));

    let eval = commands(&["eval"]);
    let (a, b, c) = tokio::join!(
        runner.execute(&eval),
        runner.execute(&eval),
        runner.execute(&eval),
    );
    assert_eq!(a.unwrap(), "done\n");
    assert_eq!(b.unwrap(), "done\n");
    assert_eq!(c.unwrap(), "done\n");

    let events: Vec<String> = std::fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(events, vec!["start", "end", "start", "end", "start", "end"]);
}

#[tokio::test]
async fn separate_runners_do_not_share_a_gate() {
    let dir = tempfile::tempdir().unwrap();
    let first = runner("cat > /dev/null; sleep 1; echo one", dir.path());
    let second = runner("cat > /dev/null; sleep 1; echo two", dir.path());

    let started = Instant::now();
    let eval = commands(&["eval"]);
    let (a, b) = tokio::join!(first.execute(&eval), second.execute(&eval));
    assert_eq!(a.unwrap(), "one\n");
    assert_eq!(b.unwrap(), "two\n");
    assert!(started.elapsed() < Duration::from_millis(1900));
}

// ---------------------------------------------------------------------------
// Scratch files
// ---------------------------------------------------------------------------

#[tokio::test]
async fn position_is_loaded_from_scratch_file() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the scratch file's contents back, proving it exists while gnubg runs
    let runner = runner(
        "read -r first; cat \"${first#load position }\"; echo; cat",
        dir.path(),
    );

    let output = runner
        .execute_with_position(SGF, &build_hint_commands(2))
        .await
        .unwrap();

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some(SGF));
    assert_eq!(lines.next(), Some("set automatic game off"));
    assert_eq!(output.lines().last(), Some("quit"));
    assert_eq!(output.matches("quit").count(), 1);

    assert!(common::dir_entries(dir.path()).is_empty(), "scratch file left behind");
}

#[tokio::test]
async fn load_position_is_first_command() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat", dir.path());

    let output = runner
        .execute_with_position(SGF, &commands(&["eval"]))
        .await
        .unwrap();

    let first = output.lines().next().unwrap();
    let path = first.strip_prefix("load position ").expect("load position first");
    assert!(path.starts_with(&dir.path().display().to_string()));
    assert!(path.ends_with(".sgf"));
    assert!(!Path::new(path).exists());
    assert_eq!(output.lines().nth(1), Some("eval"));
}

#[tokio::test]
async fn scratch_file_removed_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null; echo 'Cannot load position' >&2", dir.path());

    let err = runner
        .execute_with_position(SGF, &commands(&["eval"]))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::ExecutionFailure(_)));
    assert!(common::dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn scratch_file_removed_on_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let runner = GnubgRunner::new(EngineConfig {
        timeout: Duration::from_millis(200),
        ..common::sh_engine("exec sleep 10", dir.path())
    });

    let err = runner
        .execute_with_position(SGF, &commands(&["eval"]))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(common::dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn missing_scratch_dir_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat", &dir.path().join("does-not-exist"));

    let err = runner
        .execute_with_position(SGF, &commands(&["eval"]))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

// ---------------------------------------------------------------------------
// Availability probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn available_when_banner_present() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner("cat > /dev/null; echo 'GNU Backgammon 1.07.001'", dir.path());
    assert!(runner.is_available().await);
}

#[tokio::test]
async fn probe_sends_show_version() {
    let dir = tempfile::tempdir().unwrap();
    let runner = runner(
        "read -r first; [ \"$first\" = 'show version' ] && echo 'gnu backgammon'",
        dir.path(),
    );
    assert!(runner.is_available().await);
}

#[tokio::test]
async fn unavailable_without_banner_or_on_timeout() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!runner("cat > /dev/null; echo 'sh: gnubg'", dir.path()).is_available().await);

    let slow = GnubgRunner::new(EngineConfig {
        timeout: Duration::from_millis(200),
        ..common::sh_engine("exec sleep 10", dir.path())
    });
    assert!(!slow.is_available().await);
}
