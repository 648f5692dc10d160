use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Isolated HOME, cache, config and PATH for one invocation.
struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("bin")).unwrap();
        Self { temp }
    }

    /// Install a fake executable that runs `body` under `/bin/sh`.
    fn tool(&self, name: &str, body: &str) -> &Self {
        let path = self.bin().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn bin(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    fn shots(&self) -> PathBuf {
        self.temp.path().join("shots")
    }

    fn cache_file(&self) -> PathBuf {
        self.temp.path().join("cache").join("gripper-last-region")
    }

    fn cmd(&self) -> Command {
        let root = self.temp.path();
        let mut cmd = Command::cargo_bin("gripper").expect("binary exists");
        cmd.env_clear()
            .env("PATH", self.bin())
            .env("HOME", root)
            .env("XDG_CACHE_HOME", root.join("cache"))
            .env("XDG_CONFIG_HOME", root.join("config"))
            .env("SCREENSHOT_DIR", self.shots());
        cmd
    }

    fn write_config(&self, contents: &str) {
        let dir = self.temp.path().join("config").join("gripper");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), contents).unwrap();
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn help_lists_modes_and_format_directives() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("last-region"))
        .stdout(predicate::str::contains("active-window"))
        .stdout(predicate::str::contains("%p: 'AM' or 'PM'"));
}

#[test]
fn short_version_flag_prints_version() {
    Sandbox::new()
        .cmd()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_reports_support_and_missing_commands() {
    Sandbox::new()
        .cmd()
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your compositor is not supported."))
        .stdout(predicate::str::contains(" - grim: not found"));
}

#[test]
fn check_finds_installed_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .tool("grim", "exit 0")
        .tool("slurp", "exit 0")
        .tool("jq", "exit 0");
    sandbox
        .cmd()
        .env("XDG_CURRENT_DESKTOP", "sway")
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Your compositor is supported."))
        .stdout(predicate::str::contains(" - grim: found"))
        .stdout(predicate::str::contains(" - wl-copy: not found"));
}

#[test]
fn missing_mode_fails() {
    Sandbox::new()
        .cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unspecified mode"));
}

#[test]
fn invalid_geometry_is_rejected_by_the_parser() {
    Sandbox::new()
        .cmd()
        .args(["custom", "10,10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid region format"));
}

#[test]
fn unknown_format_directive_is_named() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", "printf PNG");
    sandbox
        .cmd()
        .args(["custom", "0,0 1x1", "--format", "shot_%q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("%q"));
    assert!(!sandbox.cache_file().exists());
}

#[test]
fn region_cancelled_reports_and_skips_cache() {
    let sandbox = Sandbox::new();
    sandbox.tool("slurp", "exit 1").tool("grim", "printf PNG");
    sandbox
        .cmd()
        .arg("region")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Selection cancelled"));
    assert!(!sandbox.cache_file().exists());
}

#[test]
fn last_region_without_cache_points_to_region_mode() {
    Sandbox::new()
        .cmd()
        .arg("last-region")
        .assert()
        .failure()
        .stderr(predicate::str::contains("run region mode first"));
}

#[test]
fn active_window_on_unsupported_compositor_fails() {
    Sandbox::new()
        .cmd()
        .arg("active-window")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn custom_capture_saves_file_and_region() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", "printf PNG");
    sandbox
        .cmd()
        .args(["custom", "10,20 30x40", "--save", "--format", "shot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"))
        .stdout(predicate::str::contains("shot.png"));

    assert_eq!(read(&sandbox.shots().join("shot.png")), "PNG");
    assert_eq!(read(&sandbox.cache_file()), "10,20 30x40\n");
}

#[test]
fn last_region_reuses_cached_geometry() {
    let sandbox = Sandbox::new();
    // Record the arguments grim received next to the image.
    sandbox.tool("grim", r#"printf '%s\n' "$@" > "$HOME/grim-args"; printf PNG"#);
    std::fs::create_dir_all(sandbox.cache_file().parent().unwrap()).unwrap();
    std::fs::write(sandbox.cache_file(), "5,6 70x80\n").unwrap();

    sandbox
        .cmd()
        .args(["last-region", "--save", "-t", "jpg", "--format", "again"])
        .assert()
        .success();

    assert!(sandbox.shots().join("again.jpeg").exists());
    let args = read(&sandbox.temp.path().join("grim-args"));
    assert!(args.contains("5,6 70x80"));
    assert!(args.contains("jpeg"));
}

#[test]
fn config_file_sets_defaults() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", "printf PPM");
    sandbox.write_config("image_type = \"ppm\"\nformat = \"from_config\"\n");

    sandbox
        .cmd()
        .args(["custom", "0,0 2x2", "--save"])
        .assert()
        .success();

    assert_eq!(read(&sandbox.shots().join("from_config.ppm")), "PPM");
}

#[test]
fn malformed_config_file_fails() {
    let sandbox = Sandbox::new();
    sandbox.write_config("png_level = \"high\"\n");

    sandbox
        .cmd()
        .args(["custom", "0,0 2x2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn failing_capture_tool_fails_the_run() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", "exit 2");
    sandbox
        .cmd()
        .args(["custom", "0,0 2x2", "--save", "--format", "broken"])
        .assert()
        .failure();
}

#[test]
fn save_and_copy_writes_file_then_copies_it() {
    let sandbox = Sandbox::new();
    sandbox
        .tool("grim", "printf PNG")
        .tool("wl-copy", r#"IFS= read -r data; printf '%s' "$data" > "$HOME/clipboard""#);

    sandbox
        .cmd()
        .args(["custom", "1,1 8x8", "--save", "--copy", "--format", "both"])
        .assert()
        .success()
        .stdout(predicate::str::contains("both.png and clipboard"));

    assert_eq!(read(&sandbox.shots().join("both.png")), "PNG");
    assert_eq!(read(&sandbox.temp.path().join("clipboard")), "PNG");
}

#[test]
fn no_save_runs_capture_and_discards_the_image() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", r#": > "$HOME/grim-ran"; printf PNG"#);

    sandbox
        .cmd()
        .args(["custom", "1,1 8x8", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PNG").not())
        .stdout(predicate::str::contains("Saved to").not());

    assert!(sandbox.temp.path().join("grim-ran").exists());
    assert_eq!(std::fs::read_dir(sandbox.shots()).unwrap().count(), 0);
}

#[test]
fn destination_that_is_a_directory_fails_without_capturing() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", r#": > "$HOME/grim-ran"; printf PNG"#);
    let taken = sandbox.shots().join("taken.png");
    std::fs::create_dir_all(&taken).unwrap();

    sandbox
        .cmd()
        .args(["custom", "1,1 8x8", "--save", "-f"])
        .arg(&taken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a regular file"));

    assert!(!sandbox.temp.path().join("grim-ran").exists());
    assert!(!sandbox.cache_file().exists());
}

#[test]
fn unreadable_last_region_is_reported_as_such() {
    let sandbox = Sandbox::new();
    std::fs::create_dir_all(sandbox.cache_file()).unwrap();

    sandbox
        .cmd()
        .arg("last-region")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to access"))
        .stderr(predicate::str::contains("run region mode first").not());
}

#[test]
fn output_flags_outside_full_mode_are_ignored_with_a_warning() {
    let sandbox = Sandbox::new();
    sandbox.tool("grim", r#"printf '%s\n' "$@" > "$HOME/grim-args""#);

    sandbox
        .cmd()
        .args(["custom", "1,1 8x8", "-o", "DP-1", "--no-save"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignored outside of mode `full`"));

    assert!(!read(&sandbox.temp.path().join("grim-args")).contains("DP-1"));
}

#[test]
fn bad_format_leaves_no_directory_behind() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["custom", "1,1 8x8", "--format", "x_%q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format: invalid format: %q"));

    assert!(!sandbox.shots().exists());
}

#[test]
fn test_mode_succeeds_without_tools() {
    Sandbox::new().cmd().arg("test").assert().success();
}
