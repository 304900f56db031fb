//! Integration tests for outguard

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PREVIOUS: &str = r#"{
  "task": ":app:compile",
  "properties": {
    "classes": {
      "build/classes/A.class": { "kind": "file", "hash": "aaaa" }
    }
  }
}"#;

    const BEFORE_CLEAN: &str = r#"{
  "task": ":app:compile",
  "properties": {
    "classes": {
      "build/classes": { "kind": "directory" },
      "build/classes/A.class": { "kind": "file", "hash": "aaaa" }
    }
  }
}"#;

    const BEFORE_STRAY: &str = r#"{
  "task": ":app:compile",
  "properties": {
    "classes": {
      "build/classes/A.class": { "kind": "file", "hash": "aaaa" },
      "build/classes/Stray.class": { "kind": "file", "hash": "5555" }
    }
  }
}"#;

    const AFTER: &str = r#"{
  "task": ":app:compile",
  "properties": {
    "classes": {
      "build/classes/A.class": { "kind": "file", "hash": "aaaa" },
      "build/classes/B.class": { "kind": "file", "hash": "bbbb" },
      "build/classes/Stray.class": { "kind": "file", "hash": "5555" }
    }
  }
}"#;

    /// Temp workspace with an isolated config file
    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("outguard");
            cmd.current_dir(self.dir.path())
                .env("OUTGUARD_CONFIG", self.dir.path().join("config.toml"))
                .arg("--no-local");
            cmd
        }
    }

    #[test]
    fn help_displays() {
        Fixture::new()
            .cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("output ownership decisions"));
    }

    #[test]
    fn version_displays() {
        Fixture::new()
            .cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("outguard"));
    }

    #[test]
    fn detect_clean_rerun() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_CLEAN);

        fx.cmd()
            .arg("detect")
            .arg("--previous")
            .arg(&previous)
            .arg("--before")
            .arg(&before)
            .assert()
            .success()
            .stdout(predicate::str::contains("No overlapping outputs"));
    }

    #[test]
    fn detect_reports_stray_file_as_json() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_STRAY);

        let output = fx
            .cmd()
            .arg("detect")
            .arg("-p")
            .arg(&previous)
            .arg("-b")
            .arg(&before)
            .args(["--format", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["cacheable"], false);
        assert_eq!(report["overlapping"]["property_name"], "classes");
        assert_eq!(report["overlapping"]["path"], "build/classes/Stray.class");
    }

    #[test]
    fn detect_strict_fails_on_overlap() {
        let fx = Fixture::new();
        let before = fx.write("before.json", BEFORE_STRAY);

        fx.cmd()
            .arg("detect")
            .arg("--before")
            .arg(&before)
            .arg("--strict")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Overlapping outputs"));
    }

    #[test]
    fn detect_respects_disabled_config() {
        let fx = Fixture::new();
        fx.write("config.toml", "[detection]\nenabled = false\n");
        let before = fx.write("before.json", BEFORE_STRAY);

        fx.cmd()
            .arg("detect")
            .arg("--before")
            .arg(&before)
            .arg("--strict")
            .assert()
            .success()
            .stdout(predicate::str::contains("disabled"));
    }

    #[test]
    fn record_filters_foreign_entries() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_STRAY);
        let after = fx.write("after.json", AFTER);

        let output = fx
            .cmd()
            .arg("record")
            .arg("--previous")
            .arg(&previous)
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .output()
            .unwrap();

        assert!(output.status.success());
        let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let classes = document["properties"]["classes"].as_object().unwrap();

        assert!(classes.contains_key("build/classes/A.class"));
        assert!(classes.contains_key("build/classes/B.class"));
        assert!(!classes.contains_key("build/classes/Stray.class"));
        assert_eq!(document["task"], ":app:compile");
    }

    #[test]
    fn record_output_feeds_next_detection() {
        let fx = Fixture::new();
        let before = fx.write("before.json", BEFORE_STRAY);
        let after = fx.write("after.json", AFTER);
        let recorded = fx.dir.path().join("history").join("outputs.json");

        fx.cmd()
            .arg("record")
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .arg("--output")
            .arg(&recorded)
            .assert()
            .success()
            .stdout(predicate::str::contains("foreign entries excluded"));

        // Only B.class was recorded; the untouched entries are still foreign
        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&recorded).unwrap()).unwrap();
        let classes = document["properties"]["classes"].as_object().unwrap();
        assert_eq!(classes.len(), 1);
        assert!(classes.contains_key("build/classes/B.class"));

        let next_before = fx.write("next-before.json", AFTER);
        fx.cmd()
            .arg("detect")
            .arg("--previous")
            .arg(&recorded)
            .arg("--before")
            .arg(&next_before)
            .assert()
            .success()
            .stdout(predicate::str::contains("Overlapping outputs"));
    }

    #[test]
    fn analyze_first_run_into_empty_location() {
        let fx = Fixture::new();
        let before = fx.write("before.json", r#"{"properties": {"classes": {}}}"#);
        let after = fx.write("after.json", AFTER);

        let output = fx
            .cmd()
            .arg("analyze")
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .args(["--format", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["cacheable"], true);
        assert_eq!(report["properties"]["classes"]["outputs"], 3);
        assert_eq!(report["properties"]["classes"]["filtered"], false);
        assert!(report["properties"]["classes"]["fingerprint"].is_string());
    }

    #[test]
    fn analyze_text_report_with_overlap() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_STRAY);
        let after = fx.write("after.json", AFTER);

        fx.cmd()
            .arg("analyze")
            .arg("--previous")
            .arg(&previous)
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .assert()
            .success()
            .stdout(predicate::str::contains("output property 'classes'"))
            .stdout(predicate::str::contains("build/classes/Stray.class"));
    }

    #[test]
    fn analyze_strict_fails_on_overlap() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_STRAY);
        let after = fx.write("after.json", AFTER);

        fx.cmd()
            .arg("analyze")
            .arg("--previous")
            .arg(&previous)
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .arg("--strict")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Overlapping outputs"))
            .stderr(predicate::str::contains("build/classes/Stray.class"));
    }

    #[test]
    fn analyze_output_becomes_next_previous() {
        let fx = Fixture::new();
        let previous = fx.write("previous.json", PREVIOUS);
        let before = fx.write("before.json", BEFORE_STRAY);
        let after = fx.write("after.json", AFTER);
        let recorded = fx.dir.path().join("history").join("analyzed.json");

        fx.cmd()
            .arg("analyze")
            .arg("--previous")
            .arg(&previous)
            .arg("--before")
            .arg(&before)
            .arg("--after")
            .arg(&after)
            .arg("--output")
            .arg(&recorded)
            .assert()
            .success()
            .stdout(predicate::str::contains("Recorded outputs"));

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&recorded).unwrap()).unwrap();
        let classes = document["properties"]["classes"].as_object().unwrap();
        assert_eq!(classes.len(), 2);
        assert!(classes.contains_key("build/classes/A.class"));
        assert!(classes.contains_key("build/classes/B.class"));
        assert!(!classes.contains_key("build/classes/Stray.class"));

        // The stray file was cleaned up; everything left is our own output
        let next_before = fx.write(
            "next-before.json",
            r#"{
  "properties": {
    "classes": {
      "build/classes/A.class": { "kind": "file", "hash": "aaaa" },
      "build/classes/B.class": { "kind": "file", "hash": "bbbb" }
    }
  }
}"#,
        );
        fx.cmd()
            .arg("detect")
            .arg("--previous")
            .arg(&recorded)
            .arg("--before")
            .arg(&next_before)
            .arg("--strict")
            .assert()
            .success()
            .stdout(predicate::str::contains("No overlapping outputs"));
    }

    #[test]
    fn json_log_format_writes_structured_logs() {
        let fx = Fixture::new();
        fx.write("config.toml", "[general]\nlog_format = \"json\"\n");
        let before = fx.write("before.json", BEFORE_CLEAN);

        fx.cmd()
            .arg("-vv")
            .arg("detect")
            .arg("--before")
            .arg(&before)
            .assert()
            .success()
            .stderr(predicate::str::contains(r#""level":"DEBUG""#))
            .stderr(predicate::str::contains(r#""fields":{"message":"#));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let fx = Fixture::new();
        fx.write("config.toml", "[general]\nlog_format = \"logfmt\"\n");
        let before = fx.write("before.json", BEFORE_CLEAN);

        fx.cmd()
            .arg("detect")
            .arg("--before")
            .arg(&before)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid general.log_format"));
    }

    #[test]
    fn missing_document_fails_with_hint() {
        let fx = Fixture::new();

        fx.cmd()
            .args(["detect", "--before", "does-not-exist.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Snapshot document not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn invalid_document_fails() {
        let fx = Fixture::new();
        let before = fx.write(
            "before.json",
            r#"{"properties": {"classes": {"a": {"kind": "file"}}}}"#,
        );

        fx.cmd()
            .arg("detect")
            .arg("--before")
            .arg(&before)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid snapshot document"));
    }

    #[test]
    fn config_path() {
        Fixture::new()
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        Fixture::new()
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[detection]"));
    }

    #[test]
    fn config_init_writes_file() {
        let fx = Fixture::new();

        fx.cmd().args(["config", "init"]).assert().success();

        let content = fs::read_to_string(fx.dir.path().join("config.toml")).unwrap();
        assert!(content.contains("[general]"));
    }
}
