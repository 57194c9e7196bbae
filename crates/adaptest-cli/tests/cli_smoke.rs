use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "adaptest-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, content).expect("config should be written");
        path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_adaptest<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_adaptest");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("adaptest command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

const GRIDDED: &str = r#"
prior = { kind = "normal", mean = 0.0, std_dev = 1.0 }
integrator = { kind = "grid", lo = -4.0, hi = 4.0, points = 41 }
tracker = "point"
criterion = "expected_variance"
max_items = 20
"#;

#[test]
fn resolve_json_reports_components_and_fingerprint() {
    let tmp = TempDirGuard::new("resolve-json");
    let config = tmp.write("session.toml", GRIDDED);

    let output = run_adaptest([
        OsStr::new("resolve"),
        config.as_os_str(),
        OsStr::new("--json"),
    ]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["summaryKind"], "adaptest.rules_summary.v1");
    assert_eq!(payload["abilityEstimator"], "mean");
    assert_eq!(payload["nextItemRule"], "expected_variance");
    assert_eq!(payload["terminationCondition"], "fixed_items");
    assert_eq!(
        payload["abilityTrackers"],
        serde_json::json!(["point", "gridded"])
    );
    let fingerprint = payload["fingerprint"].as_str().expect("fingerprint string");
    assert_eq!(fingerprint.len(), 64);
}

#[test]
fn resolve_fingerprint_is_stable_across_runs() {
    let tmp = TempDirGuard::new("resolve-stable");
    let config = tmp.write("session.toml", GRIDDED);

    let first = run_adaptest([OsStr::new("resolve"), config.as_os_str(), OsStr::new("--json")]);
    let second = run_adaptest([OsStr::new("resolve"), config.as_os_str(), OsStr::new("--json")]);
    assert_success(&first);
    assert_success(&second);
    assert_eq!(
        parse_json_stdout(&first)["fingerprint"],
        parse_json_stdout(&second)["fingerprint"]
    );
}

#[test]
fn resolve_text_lists_tracker_chain() {
    let tmp = TempDirGuard::new("resolve-text");
    let config = tmp.write("session.toml", GRIDDED);

    let output = run_adaptest([OsStr::new("resolve"), config.as_os_str()]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert!(text.contains("adaptest resolve"));
    assert!(text.contains("Ability trackers: point -> gridded"));
    assert!(text.contains("Fingerprint: "));
}

#[test]
fn resolve_fails_with_missing_component() {
    let tmp = TempDirGuard::new("resolve-missing");
    let config = tmp.write(
        "session.toml",
        r#"
optimizer = { kind = "newton_raphson", max_iterations = 40 }
criterion = "max_information"
"#,
    );

    let output = run_adaptest([OsStr::new("resolve"), config.as_os_str()]);
    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_text(&output);
    assert!(stderr.contains("error: "));
    assert!(stderr.contains("termination_condition"));
}

#[test]
fn resolve_fails_on_unreadable_config() {
    let tmp = TempDirGuard::new("resolve-io");
    let missing = tmp.path().join("absent.toml");

    let output = run_adaptest([OsStr::new("resolve"), missing.as_os_str()]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("absent.toml"));
}

#[test]
fn resolve_verbose_logs_resolution_steps() {
    let tmp = TempDirGuard::new("resolve-verbose");
    let config = tmp.write("session.toml", GRIDDED);

    let output = run_adaptest([
        OsStr::new("resolve"),
        config.as_os_str(),
        OsStr::new("--json"),
        OsStr::new("--verbose"),
    ]);
    assert_success(&output);
    parse_json_stdout(&output);
    assert!(stderr_text(&output).contains("resolved component"));
}

#[test]
fn ingredients_json_follows_config_order() {
    let tmp = TempDirGuard::new("ingredients-json");
    let config = tmp.write("session.toml", GRIDDED);

    let output = run_adaptest([
        OsStr::new("ingredients"),
        config.as_os_str(),
        OsStr::new("--json"),
    ]);
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    let kinds: Vec<&str> = payload
        .as_array()
        .expect("ingredients array")
        .iter()
        .map(|row| row["kind"].as_str().expect("kind string"))
        .collect();
    assert_eq!(
        kinds,
        vec!["prior", "integrator", "tracker", "criterion", "max_items"]
    );
    assert_eq!(payload[4]["value"], "20");
}

#[test]
fn ingredients_of_empty_config() {
    let tmp = TempDirGuard::new("ingredients-empty");
    let config = tmp.write("session.toml", "");

    let output = run_adaptest([OsStr::new("ingredients"), config.as_os_str()]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("Count: 0"));
}
