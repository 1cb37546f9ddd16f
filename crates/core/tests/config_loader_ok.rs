use sitemigrate_core::config::ConfigLoader;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
project_root = "/tmp/blog"
hugo_content_dir = "/tmp/hugo/content"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.project_root, PathBuf::from("/tmp/blog"));
    assert_eq!(rc.hugo_content_dir, PathBuf::from("/tmp/hugo/content"));
    assert_eq!(rc.output_dir, PathBuf::from("/tmp/micro-migration"));
    assert_eq!(rc.report_dir, PathBuf::from("/tmp/blog/docs/issues"));
    assert_eq!(rc.default_tz_offset, "-05:00");
    assert_eq!(rc.logging.level, "info");
    assert_eq!(rc.posts_dir(), Path::new("/tmp/blog/src/data/posts"));
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("sitemigrate/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
project_root = "/tmp/def"
hugo_content_dir = "{{project_root}}/../hugo"

[profiles.staging]
project_root = "/tmp/staging"
hugo_content_dir = "/tmp/hugo"
output_dir = "{{project_root}}/review"
report_dir = "{{project_root}}/reports"
default_tz_offset = "+01:00"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("staging")).expect("should load");
    assert_eq!(rc.active_profile, "staging");
    assert_eq!(rc.output_dir, PathBuf::from("/tmp/staging/review"));
    assert_eq!(rc.report_dir, PathBuf::from("/tmp/staging/reports"));
    assert_eq!(rc.default_tz_offset, "+01:00");
}

#[test]
fn logging_file_is_expanded() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[profiles.default]
project_root = "/tmp/blog"
hugo_content_dir = "/tmp/hugo"

[logging]
level = "debug"
file_level = "trace"
file = "{{project_root}}/smig.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file_level.as_deref(), Some("trace"));
    assert_eq!(rc.logging.file, Some(PathBuf::from("/tmp/blog/smig.log")));
}
