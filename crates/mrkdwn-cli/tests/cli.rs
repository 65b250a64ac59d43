use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_mrkdwn-cli") {
        return PathBuf::from(path);
    }
    if let Some(path) = env::var_os("CARGO_BIN_EXE_mrkdwn-cli") {
        return PathBuf::from(path);
    }
    let exe = env::current_exe().expect("current exe");
    let mut debug_dir = exe.as_path();
    while let Some(parent) = debug_dir.parent() {
        if parent.file_name().and_then(|name| name.to_str()) == Some("debug") {
            let candidate = parent.join("mrkdwn-cli");
            if candidate.exists() {
                return candidate;
            }
        }
        debug_dir = parent;
    }
    panic!("binary path missing");
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut path = env::temp_dir();
    let now = SystemTime::now().duration_since(UNIX_EPOCH).expect("time");
    let file_name = format!(
        "mrkdwn_cli_{}_{}_{}.txt",
        name,
        now.as_secs(),
        now.subsec_nanos()
    );
    path.push(file_name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(bin_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("run")
}

#[test]
fn render_wraps_html_with_stylesheet() {
    let input = temp_file("render", "*hello*\n");
    let output = Command::new(bin_path())
        .args([input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<!DOCTYPE html>"), "expected HTML wrapper");
    assert!(stdout.contains("<style>"), "expected inline CSS");
    assert!(stdout.contains("<strong class=\"mrkdwn-bold\">hello</strong>"));
}

#[test]
fn raw_outputs_fragment_html() {
    let input = temp_file("raw", "~gone~\n");
    let output = Command::new(bin_path())
        .args(["--raw", input.to_str().expect("path")])
        .output()
        .expect("run");

    assert!(output.status.success(), "expected success exit code");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("<!DOCTYPE html>"), "expected raw HTML");
    assert_eq!(stdout, "<del class=\"mrkdwn-strike\">gone</del>\n");
}

#[test]
fn reads_stdin_without_an_input_path() {
    let output = run_with_stdin(&["--raw", "--no-label"], "```py\npass\n```");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("mrkdwn-lang-label"));
    assert!(stdout.contains("<span class=\"mrkdwn-hl-keyword\">pass</span>"));
}

#[test]
fn lang_highlights_the_whole_input() {
    let output = run_with_stdin(&["--lang", "sql"], "select 1");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<span class=\"mrkdwn-hl-keyword\">select</span> \
         <span class=\"mrkdwn-hl-number\">1</span>\n"
    );
}

#[test]
fn check_reports_through_exit_code() {
    let positive = run_with_stdin(&["--check"], "*yes*");
    assert!(positive.status.success());
    let negative = run_with_stdin(&["--check"], "plain words");
    assert_eq!(negative.status.code(), Some(1));
    assert!(negative.stdout.is_empty());
}

#[test]
fn from_html_formats_host_markup() {
    let output = run_with_stdin(
        &["--from-html", "--raw"],
        "*hi*<span class=\"c-message__edited_label\">(edited)</span>",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<strong class=\"mrkdwn-bold\">hi</strong><span class="));

    let unchanged = run_with_stdin(&["--from-html"], "nothing here");
    assert_eq!(unchanged.status.code(), Some(1));
}

#[test]
fn missing_file_exits_with_one() {
    let output = Command::new(bin_path())
        .args(["/definitely/not/here.txt"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read /definitely/not/here.txt"));
}

#[test]
fn bad_theme_is_a_usage_error() {
    let output = Command::new(bin_path())
        .args(["--theme", "sepia"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: mrkdwn-cli"));
}
