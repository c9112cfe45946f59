//! Tests for a complete routing run.

use routeplan::{
    RouteplanConfig, RouteplanErrorKind, RouteplanResult, Selection, StatusSource, run_once,
    write_atomic,
};
use routeplan_error::{UpstreamError, UpstreamErrorKind};
use routeplan_limits::StatusCommandConfig;
use serde_json::{Value, json};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NOW: i64 = 1_760_000_000;

/// Returns canned snapshot text and counts calls.
struct CannedSource {
    text: Option<String>,
    calls: Cell<usize>,
}

impl CannedSource {
    fn ok(document: Value) -> Self {
        Self::raw(&document.to_string())
    }

    fn raw(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            text: None,
            calls: Cell::new(0),
        }
    }
}

impl StatusSource for CannedSource {
    fn fetch(&self) -> RouteplanResult<String> {
        self.calls.set(self.calls.get() + 1);
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => Err(UpstreamError::new(UpstreamErrorKind::NonZeroExit {
                status: Some(1),
                message: "not logged in".to_string(),
            })
            .into()),
        }
    }
}

fn config_for(path: &Path, tier: i64) -> RouteplanConfig {
    RouteplanConfig {
        openai_tier: tier,
        output_path: path.display().to_string(),
        status_command: StatusCommandConfig {
            program: "openclaw".to_string(),
            args: vec!["status".to_string(), "--usage".to_string(), "--json".to_string()],
        },
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_run_writes_artifact_and_returns_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config").join("llm-routing-dynamic.json");
    let source = CannedSource::ok(json!({"usage": {"providers": []}}));

    let outcome = run_once(&config_for(&path, 3), &source, NOW).unwrap();

    assert_eq!(outcome.path, path);
    assert_eq!(source.calls.get(), 1);

    let written = read_json(&path);
    assert_eq!(written["updatedAt"], json!(NOW));
    assert_eq!(written["openaiTier"], json!(3));
    assert_eq!(written["limits"]["openai/shared"]["rpm"], json!(5_000));
    assert_eq!(
        written["taskPreferred"]["coding_normal"],
        json!("google/gemini-2.5-pro")
    );
    assert_eq!(written, outcome.artifact.to_value().unwrap());
}

#[test]
fn test_written_file_is_pretty_with_sorted_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    let source = CannedSource::ok(json!({}));

    run_once(&config_for(&path, 1), &source, NOW).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let keys: Vec<usize> = [
        "\"availableModels\"",
        "\"limits\"",
        "\"nearCap\"",
        "\"openaiTier\"",
        "\"taskPreferred\"",
        "\"updatedAt\"",
    ]
    .iter()
    .map(|key| text.find(key).unwrap())
    .collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(text.contains("\n  \"limits\""));
}

#[test]
fn test_saturated_pro_shifts_coding_to_flash() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    let source = CannedSource::ok(json!({"usage": {"providers": [
        {"provider": "google", "windows": [
            {"model": "google/gemini-2.5-pro", "requestsPerDay": 950},
            {"model": "google/gemini-2.5-flash", "rpm": 10},
        ]},
    ]}}));

    let outcome = run_once(&config_for(&path, 1), &source, NOW).unwrap();

    assert!(outcome.artifact.near_cap().gemini_pro);
    assert!(!outcome.artifact.near_cap().gemini_flash);
    assert_eq!(
        *outcome.artifact.task_preferred().coding_normal(),
        Selection::GeminiFlash25
    );
    assert_eq!(read_json(&path)["nearCap"]["gemini_pro"], json!(true));
}

#[test]
fn test_upstream_failure_leaves_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    fs::write(&path, "previous").unwrap();

    let err = run_once(&config_for(&path, 1), &CannedSource::failing(), NOW).unwrap_err();

    assert!(matches!(err.kind(), RouteplanErrorKind::Upstream(_)));
    assert!(err.to_string().contains("not logged in"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_malformed_snapshot_leaves_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    fs::write(&path, "previous").unwrap();

    for text in ["not json", "[1, 2, 3]", ""] {
        let err = run_once(&config_for(&path, 1), &CannedSource::raw(text), NOW).unwrap_err();
        assert!(matches!(err.kind(), RouteplanErrorKind::Json(_)));
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_rerun_replaces_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");

    run_once(&config_for(&path, 1), &CannedSource::ok(json!({})), NOW).unwrap();
    run_once(&config_for(&path, 5), &CannedSource::ok(json!({})), NOW + 60).unwrap();

    let written = read_json(&path);
    assert_eq!(written["openaiTier"], json!(5));
    assert_eq!(written["updatedAt"], json!(NOW + 60));
    assert!(!dir.path().join(".routing.json.tmp").exists());
}

#[test]
fn test_write_atomic_rejects_path_without_file_name() {
    let err = write_atomic(Path::new("/"), "{}").unwrap_err();
    assert!(matches!(err.kind(), RouteplanErrorKind::Storage(_)));
}

#[cfg(unix)]
mod command_source {
    use routeplan::{CommandStatusSource, RouteplanErrorKind, StatusSource};
    use routeplan_error::UpstreamErrorKind;

    fn upstream_kind(source: &CommandStatusSource) -> UpstreamErrorKind {
        let err = source.fetch().unwrap_err();
        match err.kind() {
            RouteplanErrorKind::Upstream(upstream) => upstream.kind().clone(),
            other => panic!("expected upstream error, got {other}"),
        }
    }

    #[test]
    fn test_returns_stdout_on_success() {
        let source = CommandStatusSource::new("sh", ["-c", "printf '{\"usage\": {}}'"]);
        assert_eq!(source.fetch().unwrap(), "{\"usage\": {}}");
    }

    #[test]
    fn test_non_zero_exit_carries_trimmed_stderr() {
        let source = CommandStatusSource::new("sh", ["-c", "echo '  token expired  ' >&2; exit 3"]);
        assert_eq!(
            upstream_kind(&source),
            UpstreamErrorKind::NonZeroExit {
                status: Some(3),
                message: "token expired".to_string(),
            }
        );
    }

    #[test]
    fn test_silent_failure_uses_generic_message() {
        let source = CommandStatusSource::new("sh", ["-c", "exit 1"]);
        assert_eq!(
            upstream_kind(&source),
            UpstreamErrorKind::NonZeroExit {
                status: Some(1),
                message: "sh status failed".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let source = CommandStatusSource::new("routeplan-no-such-program", Vec::<String>::new());
        assert!(matches!(
            upstream_kind(&source),
            UpstreamErrorKind::Spawn { program, .. } if program == "routeplan-no-such-program"
        ));
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_temp_write_is_cleaned_up() {
    use routeplan_error::StorageErrorKind;

    let full = Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    let temp = dir.path().join(".routing.json.tmp");
    std::os::unix::fs::symlink(full, &temp).unwrap();

    let err = write_atomic(&path, "{\"limits\": {}}").unwrap_err();

    match err.kind() {
        RouteplanErrorKind::Storage(storage) => {
            assert!(matches!(storage.kind, StorageErrorKind::FileWrite(_)))
        }
        other => panic!("expected storage error, got {other}"),
    }
    assert!(fs::symlink_metadata(&temp).is_err());
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_failed_rename_is_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routing.json");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupied"), "x").unwrap();

    let err = write_atomic(&path, "{}").unwrap_err();

    assert!(matches!(err.kind(), RouteplanErrorKind::Storage(_)));
    assert!(!dir.path().join(".routing.json.tmp").exists());
    assert!(path.is_dir());
}
