use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TINY_WORKFLOW: &str = r#"
name = "tiny"
title = "Tiny workflow"

[templates]
ask = "Ask about {{ topic }}."
answer = "Answer using {{ ask.topic }} in a {{ style }} voice."

[[steps]]
id = "ask"
label = "Ask"

[[steps.fields]]
name = "topic"
label = "Topic"
fallback = "topic"

[[steps]]
id = "answer"
label = "Answer"

[[steps.fields]]
name = "style"
label = "Style"
default = "plain"
"#;

/// Temporary config home, so a user's own workflow.toml never leaks in
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn relay_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relay").expect("Failed to find relay binary");
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.arg("--no-color");
    cmd
}

fn write_tiny_workflow(dir: &TempDir) -> String {
    let path = dir.path().join("tiny.toml");
    std::fs::write(&path, TINY_WORKFLOW).expect("Failed to write workflow");
    path.to_str().unwrap().to_string()
}

#[test]
fn test_cli_default_lists_seo_steps() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **產品 / 計畫解析** (`product_brief`)"))
        .stdout(predicate::str::contains("(`drafting`)"));
}

#[test]
fn test_cli_steps_with_builtin() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["--builtin", "seo-packet", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(`project_log`)"))
        .stdout(predicate::str::contains("7. "));
}

#[test]
fn test_cli_unknown_builtin_fails() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["--builtin", "nope", "steps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_cli_workflows() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .arg("workflows")
        .assert()
        .success()
        .stdout(predicate::str::contains("seo-8-step"))
        .stdout(predicate::str::contains("(default)"))
        .stdout(predicate::str::contains("seo-packet"));
}

#[test]
fn test_cli_show_step_by_number() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["show", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 8. "))
        .stdout(predicate::str::contains("(`drafting`)"))
        .stdout(predicate::str::contains("word_count"));
}

#[test]
fn test_cli_show_unknown_step_fails() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["show", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step 'nowhere' not found"));
}

#[test]
fn test_cli_check_custom_workflow() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args(["--workflow", &path, "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow 'tiny'"))
        .stdout(predicate::str::contains("(2 steps, 2 templates)"));
}

#[test]
fn test_cli_check_rejects_unknown_slot() {
    let env = create_cli_test_environment();
    let path = env.path().join("broken.toml");
    std::fs::write(&path, TINY_WORKFLOW.replace("{{ ask.topic }}", "{{ ask.subject }}")).unwrap();

    relay_cmd(&env)
        .args(["--workflow", path.to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workflow"))
        .stderr(predicate::str::contains("ask.subject"));
}

#[test]
fn test_cli_workflow_and_builtin_conflict() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args(["--workflow", &path, "--builtin", "seo-packet", "steps"])
        .assert()
        .failure();
}

#[test]
fn test_cli_render_raw_with_placeholders() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args(["--workflow", &path, "render", "answer", "--raw"])
        .assert()
        .success()
        .stdout("Answer using [topic] in a plain voice.\n");
}

#[test]
fn test_cli_render_with_assignments() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args([
            "--workflow",
            &path,
            "render",
            "2",
            "--set",
            "ask.topic=tide pools",
            "--set",
            "style=cheerful",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Step 2/2: Answer"))
        .stdout(predicate::str::contains(
            "Answer using tide pools in a cheerful voice.",
        ));
}

#[test]
fn test_cli_render_with_packet_file_and_article() {
    let env = create_cli_test_environment();
    let packet = env.path().join("packet.txt");
    std::fs::write(&packet, "=== [PROJECT LOG] ===\n- picked invoicing\n").unwrap();

    relay_cmd(&env)
        .args([
            "--builtin",
            "seo-packet",
            "render",
            "outline",
            "--packet-file",
            packet.to_str().unwrap(),
            "--article-id",
            "A07",
            "--title",
            "Invoicing 101",
            "--raw",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- picked invoicing"))
        .stdout(predicate::str::contains("A07"))
        .stdout(predicate::str::contains("Invoicing 101"));
}

#[test]
fn test_cli_render_unknown_field_fails() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args(["--workflow", &path, "render", "ask", "--set", "mood=calm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Field 'mood' not found"));
}

#[test]
fn test_cli_render_bad_assignment_is_usage_error() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["render", "1", "--set", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_cli_shell_script() {
    let env = create_cli_test_environment();
    let path = write_tiny_workflow(&env);

    relay_cmd(&env)
        .args(["--workflow", &path, "shell"])
        .write_stdin("set topic\ntide\npools\n.\nnext\nprompt\nstatus json\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("relay [1/2]> "))
        .stdout(predicate::str::contains("Success: Stored ask.topic (10 characters)"))
        .stdout(predicate::str::contains("relay [2/2]> "))
        .stdout(predicate::str::contains(
            "Answer using tide\npools in a plain voice.",
        ))
        .stdout(predicate::str::contains("\"current_step\": \"answer\""));
}

#[test]
fn test_cli_shell_ends_on_eof() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .arg("shell")
        .write_stdin("goto 3\nbogus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to step 3/8"))
        .stdout(predicate::str::contains("Error: Unknown command 'bogus'"));
}

#[test]
fn test_cli_init_writes_and_refuses_overwrite() {
    let env = create_cli_test_environment();
    let target = env.path().join("custom").join("workflow.toml");
    let target_arg = target.to_str().unwrap();

    relay_cmd(&env)
        .args(["--builtin", "seo-packet", "init", "--output", target_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote workflow 'seo-packet'"));

    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("name = \"seo-packet\""));

    relay_cmd(&env)
        .args(["init", "--output", target_arg])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    relay_cmd(&env)
        .args(["init", "--output", target_arg, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote workflow 'seo-8-step'"));
}

#[test]
fn test_cli_init_default_location_is_picked_up() {
    let env = create_cli_test_environment();

    relay_cmd(&env)
        .args(["--builtin", "seo-packet", "init"])
        .assert()
        .success();
    assert!(env.path().join("relay").join("workflow.toml").exists());

    // Without --builtin the config file now wins over the default workflow
    relay_cmd(&env)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow 'seo-packet'"))
        .stdout(predicate::str::contains("workflow.toml"));
}
