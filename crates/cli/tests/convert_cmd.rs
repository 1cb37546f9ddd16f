use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const BUNDLE: &str = "+++\ntitle = \"Hello\"\ndate = 2024-01-15T10:00:00-05:00\n+++\n\n{{< imgs imgs=\"a.png, b.png\" >}}\n";

fn write_config(dir: &Path) -> PathBuf {
    let cfg = dir.join("config.toml");
    fs::write(
        &cfg,
        format!(
            "version = 1\n[profiles.default]\nproject_root = \"{root}/site\"\nhugo_content_dir = \"{root}/hugo\"\noutput_dir = \"{root}/review\"\n",
            root = dir.display()
        ),
    )
    .unwrap();
    cfg
}

fn smig(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smig"));
    cmd.arg("--config").arg(cfg);
    cmd
}

#[test]
fn convert_post_creates_post_and_copies_assets() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());
    let bundle = tmp.path().join("hugo/posts/hello");
    fs::create_dir_all(&bundle).unwrap();
    fs::write(bundle.join("index.md"), BUNDLE).unwrap();
    fs::write(bundle.join("a.png"), "a").unwrap();
    fs::write(bundle.join("b.png"), "b").unwrap();

    smig(&cfg)
        .args(["convert-post", bundle.to_str().unwrap(), "hello-astro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 2 asset file(s)"))
        .stdout(predicate::str::contains("Converted 1 shortcode(s)"));

    let post = fs::read_to_string(tmp.path().join("site/src/data/posts/hello-astro.mdx")).unwrap();
    assert!(post.starts_with("---\n"));
    assert!(post.contains("<ImageGallery"));
    assert!(tmp.path().join("site/src/assets/images/blog/hello-astro/b.png").exists());
}

#[test]
fn convert_post_dry_run_writes_nothing() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());
    let bundle = tmp.path().join("hugo/posts/hello");
    fs::create_dir_all(&bundle).unwrap();
    fs::write(bundle.join("index.md"), BUNDLE).unwrap();

    smig(&cfg)
        .args(["convert-post", bundle.to_str().unwrap(), "hello-astro", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN - would create:"));

    assert!(!tmp.path().join("site/src/data/posts/hello-astro.mdx").exists());
}

#[test]
fn convert_post_missing_bundle_fails() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());

    smig(&cfg)
        .args(["convert-post", tmp.path().join("nope").to_str().unwrap(), "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn convert_batch_reports_next_window() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());
    let section = tmp.path().join("hugo/micro");
    for name in ["one", "two", "three"] {
        let dir = section.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.md"), "+++\ntitle = \"Micro\"\n+++\nShort note\n").unwrap();
    }

    smig(&cfg)
        .args(["convert-batch", "micro", "--batch-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 2/2 (3 total)"))
        .stdout(predicate::str::contains("Next batch: --start-index 2"));

    assert!(tmp.path().join("review/micro/one.mdx").exists());
    assert!(tmp.path().join("review/micro/three.mdx").exists());
    assert!(!tmp.path().join("review/micro/two.mdx").exists());
}

#[test]
fn convert_batch_past_the_end() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());
    let dir = tmp.path().join("hugo/quote/q");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("index.md"), "+++\ntitle = \"Q\"\n+++\n").unwrap();

    smig(&cfg)
        .args(["convert-batch", "quote", "--start-index", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All quote files processed"));
}

#[test]
fn content_types_tags_each_section() {
    let tmp = tempdir().unwrap();
    let cfg = write_config(tmp.path());
    let posts = tmp.path().join("site/src/data/posts");
    let micro = tmp.path().join("site/src/data/micro");
    fs::create_dir_all(&posts).unwrap();
    fs::create_dir_all(&micro).unwrap();
    fs::write(posts.join("essay.mdx"), "---\ntitle: \"E\"\n---\nBody\n").unwrap();
    fs::write(micro.join("note.mdx"), "---\ntitle: \"N\"\ncontentType: \"brief\"\n---\n").unwrap();

    smig(&cfg)
        .args(["content-types", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would tag 1 file(s)"))
        .stdout(predicate::str::contains("Skipped"));
    assert!(!fs::read_to_string(posts.join("essay.mdx")).unwrap().contains("contentType"));

    smig(&cfg).arg("content-types").assert().success().stdout(predicate::str::contains("Tagged 1 file(s)"));
    assert!(fs::read_to_string(posts.join("essay.mdx")).unwrap().contains("contentType: \"essay\""));
}
