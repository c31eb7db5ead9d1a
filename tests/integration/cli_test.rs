//! Integration tests for the resconv binary
//!
//! Runs the built executable against inline input, files and stdin.

#[cfg(test)]
mod cli_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::process::{Command, Output, Stdio};
    use tempfile::{Builder, TempDir};

    fn resconv() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_resconv"));
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run(args: &[&str]) -> Output {
        resconv().args(args).output().expect("failed to run resconv")
    }

    fn run_stdin(input: &str, args: &[&str]) -> Output {
        let mut child = resconv()
            .arg("--stdin")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start resconv");

        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();

        child.wait_with_output().unwrap()
    }

    fn stdout_json(output: &Output) -> Value {
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("bad output {:?}: {}", stdout, e))
    }

    #[test]
    fn test_inline_input_redacts_password() {
        let output = run(&[r#"{"username": "jsmith", "password": "hunter2"}"#]);

        assert!(output.status.success());
        assert_eq!(stdout_json(&output), json!({"username": "jsmith"}));
    }

    #[test]
    fn test_stdin_with_strategy_override() {
        let input = r#"{"name": "Acme", "address": {"city": "Oslo", "password": "x"}}"#;
        let output = run_stdin(input, &["--strategy", "all", "--plain"]);

        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            r#"{"name":"Acme","address":{"city":"Oslo"}}"#
        );
    }

    #[test]
    fn test_yaml_directive_with_hrefs() {
        let mut directive = Builder::new().suffix(".yml").tempfile().unwrap();
        write!(
            directive,
            "strategy: defined\nfields:\n  username:\n    outputName: login\n  directory:\n    strategy: single\n    singleField: name\n"
        )
        .unwrap();

        let input = r#"{"href": "/accounts/1", "username": "jsmith", "email": "j@x.io",
                        "directory": {"href": "/directories/1", "name": "Employees"}}"#;
        let output = run(&[
            input,
            "--hrefs",
            "--directive",
            directive.path().to_str().unwrap(),
        ]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert_eq!(
            stdout_json(&output),
            json!({"login": "jsmith", "directory": "Employees"})
        );
    }

    #[test]
    fn test_output_file_and_stats() {
        let dir = TempDir::new().unwrap();
        let out_path = dir.path().join("nested").join("out.json");

        let output = run(&[
            r#"[{"id": 1}, {"id": 2}]"#,
            "--strategy",
            "list",
            "--output",
            out_path.to_str().unwrap(),
            "--stats",
        ]);

        assert!(output.status.success());
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(written, json!([{"id": 1}, {"id": 2}]));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Elements converted: 2"), "{}", stderr);
    }

    #[test]
    fn test_extra_redaction_flag() {
        let output = run(&[r#"{"name": "n", "ssn": "123"}"#, "--redact", "ssn"]);

        assert!(output.status.success());
        assert_eq!(stdout_json(&output), json!({"name": "n"}));
    }

    #[test]
    fn test_invalid_strategy_fails() {
        let output = run(&["{}", "--strategy", "sideways"]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unknown strategy"), "{}", stderr);
        assert!(stderr.contains("DEFINED"), "{}", stderr);
    }

    #[test]
    fn test_scalar_input_is_unsupported() {
        let output = run_stdin("42", &[]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot convert value at <root>"));
    }

    #[test]
    fn test_malformed_json_reports_location() {
        let output = run_stdin(r#"{"name": }"#, &[]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
    }

    #[test]
    fn test_missing_input() {
        let output = run(&[]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("No input provided"));
    }
}
