use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn doctor_reads_provided_config_path() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
project_root = "/tmp/blog"
hugo_content_dir = "{{project_root}}/../hugo/content"
"#;
    write_file(&cfg, toml);

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smig"));
    cmd.args(["doctor", "--config", cfg.to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   smig doctor"))
        .stdout(predicate::str::contains("profile: default"))
        .stdout(predicate::str::contains("project_root: /tmp/blog"))
        .stdout(predicate::str::contains("posts_dir: /tmp/blog/src/data/posts"));
}

#[test]
fn doctor_uses_xdg_default_when_present() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("sitemigrate").join("config.toml");
    write_file(
        &cfg_path,
        r#"
version = 1
profile = "default"
[profiles.default]
project_root = "/tmp/blog"
hugo_content_dir = "/tmp/hugo"
"#,
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smig"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OK   smig doctor"))
        .stdout(predicate::str::contains("project_root: /tmp/blog"));
}

#[test]
fn doctor_marks_missing_content_dirs() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("blog");
    fs::create_dir_all(root.join("src/data/posts")).unwrap();

    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        &format!(
            "version = 1\n[profiles.default]\nproject_root = \"{}\"\nhugo_content_dir = \"/tmp/hugo\"\n",
            root.display()
        ),
    );

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smig"));
    cmd.arg("--config").arg(&cfg).arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("src/data/posts\n"))
        .stdout(predicate::str::contains("src/data/micro  (missing)"));
}
