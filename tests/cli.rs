use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn cmd(dir: &Path) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("hbslint");
    c.current_dir(dir)
        .env_remove("HBSLINT_LOG")
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE");
    c
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `a.hbs` has one warning, `b.hbs` one error and one warning.
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".template-lintrc.json", r#"{"rules": {"no-log": "warn"}}"#);
    write(dir.path(), "a.hbs", "<p>{{log this}}</p>\n");
    write(dir.path(), "b.hbs", "{{debugger}}\n{{log that}}\n");
    write(dir.path(), "clean.hbs", "<p>{{title}}</p>\n");
    dir
}

mod text_report {
    use super::*;

    #[test]
    fn test_errors_and_warnings() {
        let dir = project();
        cmd(dir.path())
            .args(["a.hbs", "b.hbs", "clean.hbs"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("a.hbs"))
            .stdout(predicate::str::contains("b.hbs"))
            .stdout(predicate::str::contains("clean.hbs").not())
            .stdout(predicate::str::contains("Unexpected {{debugger}} usage."))
            .stdout(predicate::str::contains("no-log"))
            .stdout(predicate::str::contains("✖ 3 problems (1 errors, 2 warnings)"));
    }

    #[test]
    fn test_quiet_hides_warnings_but_still_fails() {
        let dir = project();
        cmd(dir.path())
            .args(["--quiet", "*.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("a.hbs").not())
            .stdout(predicate::str::contains("b.hbs"))
            .stdout(predicate::str::contains("Unexpected {{log}} usage.").not())
            .stdout(predicate::str::contains("✖ 1 problems (1 errors, 0 warnings)"));
    }

    #[test]
    fn test_warnings_only_succeeds() {
        let dir = project();
        cmd(dir.path())
            .arg("a.hbs")
            .assert()
            .success()
            .stdout(predicate::str::contains("✖ 1 problems (0 errors, 1 warnings)"));
    }

    #[test]
    fn test_quiet_with_only_warnings_prints_nothing() {
        let dir = project();
        cmd(dir.path())
            .args(["a.hbs", "--quiet"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_verbose_shows_source() {
        let dir = project();
        cmd(dir.path())
            .args(["--verbose", "b.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Unexpected {{debugger}} usage.\n{{debugger}}"));
    }

    #[test]
    fn test_clean_files_print_nothing() {
        let dir = project();
        cmd(dir.path())
            .arg("clean.hbs")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let dir = project();
        cmd(dir.path())
            .args(["--fix", "clean.hbs"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

mod json_report {
    use super::*;

    fn report(args: &[&str]) -> serde_json::Map<String, serde_json::Value> {
        let dir = project();
        let output = cmd(dir.path()).args(args).output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        value.as_object().unwrap().clone()
    }

    fn count(map: &serde_json::Map<String, serde_json::Value>, severity: u64) -> usize {
        map.values()
            .flat_map(|v| v.as_array().unwrap())
            .filter(|d| d["severity"] == severity)
            .count()
    }

    #[test]
    fn test_json_matches_text_counts() {
        let map = report(&["--json", "a.hbs", "b.hbs"]);
        assert_eq!(map.len(), 2);
        assert_eq!(count(&map, 2), 1);
        assert_eq!(count(&map, 1), 2);

        let keys: Vec<&String> = map.keys().collect();
        assert!(keys[0].ends_with("a.hbs"));
        assert!(Path::new(keys[0]).is_absolute());

        let b = map.values().nth(1).unwrap().as_array().unwrap();
        assert_eq!(b[0]["rule"], "no-debugger");
        assert_eq!(b[0]["line"], 1);
        assert_eq!(b[0]["column"], 0);
        assert_eq!(b[0]["moduleId"], "b");
    }

    #[test]
    fn test_json_quiet_drops_warning_only_files() {
        let map = report(&["--json", "--quiet", "a.hbs", "b.hbs"]);
        assert_eq!(map.len(), 1);
        assert_eq!(count(&map, 2), 1);
        assert_eq!(count(&map, 1), 0);
    }

    #[test]
    fn test_json_has_no_summary() {
        let dir = project();
        cmd(dir.path())
            .args(["--json", "b.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("problems").not());
    }
}

mod inputs {
    use super::*;

    #[test]
    fn test_no_args_and_no_piped_input() {
        let dir = project();
        cmd(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn test_piped_stdin_read_once() {
        let dir = project();
        let output = cmd(dir.path())
            .args(["--json", "-", "/dev/stdin", "-"])
            .write_stdin("{{debugger}}\n")
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(1));
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["/dev/stdin"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_directory_and_ignored_folders() {
        let dir = project();
        write(dir.path(), "app/templates/index.hbs", "{{debugger}}\n");
        write(dir.path(), "app/templates/notes.txt", "{{debugger}}\n");
        write(dir.path(), "node_modules/addon/bad.hbs", "{{debugger}}\n");
        write(dir.path(), "dist/bad.hbs", "{{debugger}}\n");
        cmd(dir.path())
            .args(["app", "**/*.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("index.hbs"))
            .stdout(predicate::str::contains("notes.txt").not())
            .stdout(predicate::str::contains("bad.hbs").not())
            .stdout(predicate::str::contains("✖ 4 problems (2 errors, 2 warnings)"));
    }

    #[test]
    fn test_absolute_patterns_under_tmp_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let root = scratch.path().join("tmp").join("proj");
        write(&root, "b.hbs", "{{debugger}}\n");
        let literal = root.join("b.hbs");
        let glob = format!("{}/*.hbs", root.display());
        for pattern in [literal.to_str().unwrap(), glob.as_str()] {
            cmd(&root)
                .arg(pattern)
                .assert()
                .code(1)
                .stdout(predicate::str::contains("b.hbs"))
                .stdout(predicate::str::contains("✖ 1 problems (1 errors, 0 warnings)"));
        }
    }

    #[test]
    fn test_gitignored_directory_named_directly() {
        let dir = project();
        write(dir.path(), ".gitignore", "generated/\n");
        write(dir.path(), "generated/out.hbs", "{{debugger}}\n");
        for pattern in ["generated/*.hbs", "generated/out.hbs", "generated"] {
            cmd(dir.path())
                .arg(pattern)
                .assert()
                .success()
                .stdout(predicate::str::is_empty());
        }
    }

    #[test]
    fn test_duplicate_patterns_lint_once() {
        let dir = project();
        cmd(dir.path())
            .args(["b.hbs", "./b.hbs", "b.*"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("✖ 2 problems (1 errors, 1 warnings)"));
    }
}

mod config {
    use super::*;

    #[test]
    fn test_missing_config_path_is_fatal() {
        let dir = project();
        cmd(dir.path())
            .args(["--config-path", "nope.json", "b.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("nope.json"));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let dir = project();
        write(dir.path(), "bad.json", r#"{"rules": {"no-such-rule": true}}"#);
        cmd(dir.path())
            .args(["--config-path", "bad.json", "clean.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("no-such-rule"));
    }

    #[test]
    fn test_explicit_config_overrides_discovered() {
        let dir = project();
        write(dir.path(), "strict.json", r#"{"rules": {"no-log": "error"}}"#);
        cmd(dir.path())
            .args(["--config-path", "strict.json", "a.hbs"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("✖ 1 problems (1 errors, 0 warnings)"));
    }

    #[test]
    fn test_engine_error_is_plain_text_under_json() {
        let dir = project();
        cmd(dir.path())
            .args(["--json", "--config-path", "nope.json"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("nope.json"))
            .stderr(predicate::str::contains("invalid_config").not())
            .stderr(predicate::str::starts_with("{").not());
    }

    #[test]
    fn test_flag_after_config_path_still_applies() {
        let dir = project();
        let output = cmd(dir.path())
            .args(["--config-path", "--json", "b.hbs"])
            .output()
            .unwrap();
        // `--json` is taken as the config path, which does not exist
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("--json"));
    }
}
