mod common;
mod utils;

use anyhow::Result;
use common::TestEnvironment;
use nix::fcntl::{Flock, FlockArg};
use std::fs::{self, File};
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_pool_reports_counts() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    env.add_wallpaper("nature/forest.jpg")?;
    env.add_wallpaper("animated/rain.mp4")?;
    env.add_wallpaper("nature/notes.txt")?;

    let walls = env.walls();
    let output = utils::run_hyprwall_command(
        &env,
        &["--output", "json", "pool", "--list", "--dir", walls.to_str().unwrap()],
    )?;
    assert_eq!(output.exit_code, 0, "pool failed: {}", output.stderr);

    let events = utils::json_events(&output.stdout);
    let summary = events
        .iter()
        .find(|e| e["code"] == "pool.summary")
        .expect("summary event");
    assert_eq!(summary["data"]["static"], 2);
    assert_eq!(summary["data"]["animated"], 1);
    assert_eq!(events.iter().filter(|e| e["code"] == "pool.static").count(), 2);
    assert!(!summary["message"].as_str().unwrap().contains('\u{1b}'));

    Ok(())
}

#[test]
fn test_pool_uses_config_dir() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("city/night.webp")?;
    env.write_config(&format!(
        "wallpaper_dir = \"{}\"\n",
        env.walls().display()
    ))?;

    let output = utils::run_hyprwall_command(&env, &["pool"])?;
    assert_eq!(output.exit_code, 0, "pool failed: {}", output.stderr);
    assert!(output.stdout.contains("1 static"), "{}", output.stdout);

    Ok(())
}

#[test]
fn test_random_with_empty_pool_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    let walls = env.walls();

    let output = utils::run_hyprwall_command(
        &env,
        &["random", "--dry-run", "--dir", walls.to_str().unwrap()],
    )?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("No wallpapers found"), "{}", output.stderr);
    assert!(!env.lock_file().exists());

    Ok(())
}

#[test]
fn test_random_without_hyprctl_fails_before_side_effects() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    let walls = env.walls();

    let output =
        utils::run_hyprwall_command(&env, &["random", "--dir", walls.to_str().unwrap()])?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("hyprctl"), "{}", output.stderr);
    assert!(!env.lock_file().exists());

    Ok(())
}

#[test]
fn test_random_dry_run_uses_fallback_monitors() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    let walls = env.walls();

    let output = utils::run_hyprwall_command(
        &env,
        &[
            "--output",
            "json",
            "random",
            "--dry-run",
            "--chance",
            "0",
            "--dir",
            walls.to_str().unwrap(),
        ],
    )?;
    assert_eq!(output.exit_code, 0, "dry run failed: {}", output.stderr);

    let entries: Vec<_> = utils::json_events(&output.stdout)
        .into_iter()
        .filter(|e| e["code"] == "selection.entry")
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["data"]["monitor"], "DP-1");
    assert_eq!(entries[1]["data"]["monitor"], "HDMI-A-1");
    assert_eq!(entries[0]["data"]["source"], "static");
    assert!(!env.lock_file().exists());

    Ok(())
}

#[test]
fn test_held_lock_is_a_noop() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    fs::write(env.lock_file(), format!("{}\n", std::process::id()))?;
    let _held = Flock::lock(File::open(env.lock_file())?, FlockArg::LockExclusiveNonblock)
        .map_err(|(_, errno)| errno)?;
    let walls = env.walls();

    let output = utils::run_hyprwall_command(
        &env,
        &["random", "--dry-run", "--dir", walls.to_str().unwrap()],
    )?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert!(output.stdout.contains("Another hyprwall instance"), "{}", output.stdout);
    assert!(env.lock_file().exists());

    Ok(())
}

#[test]
fn test_leftover_lock_from_dead_run_is_reclaimed() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    fs::write(env.lock_file(), "999999999\n")?;
    let walls = env.walls();

    let output = utils::run_hyprwall_command(
        &env,
        &["random", "--dry-run", "--dir", walls.to_str().unwrap()],
    )?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert!(output.stdout.contains("lake.png"), "{}", output.stdout);
    assert!(output.stderr.contains("stale lock"), "{}", output.stderr);
    assert!(!env.lock_file().exists());

    Ok(())
}

#[test]
fn test_sigterm_removes_lock_and_exits_143() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_wallpaper("nature/lake.png")?;
    // Monitor query never answers in time, so the run is still inside the lock
    env.add_tool("hyprctl", "PATH=/usr/bin:/bin exec sleep 10")?;
    let walls = env.walls();

    let child = utils::spawn_hyprwall_command(
        &env,
        &["random", "--chance", "0", "--dir", walls.to_str().unwrap()],
    )?;

    let deadline = Instant::now() + Duration::from_secs(10);
    while !env.lock_file().exists() {
        assert!(Instant::now() < deadline, "lock was never taken");
        thread::sleep(Duration::from_millis(20));
    }

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()?;
    assert!(status.success());

    let output = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(143), "{stderr}");
    assert!(stderr.contains("Interrupted"), "{stderr}");
    assert!(!env.lock_file().exists());

    Ok(())
}

#[test]
fn test_monitors_falls_back_without_hyprland() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config("fallback_monitors = [\"eDP-1\"]\n")?;

    let output = utils::run_hyprwall_command(&env, &["monitors"])?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert_eq!(output.stdout.trim(), "eDP-1");
    assert!(output.stderr.contains("falling back"), "{}", output.stderr);

    Ok(())
}

#[test]
fn test_toggle_dry_run_does_not_persist() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config(
        "[toggle]\nfirst = [\"/w/a.png\"]\nsecond = [\"/w/b.png\", \"/w/c.png\"]\n",
    )?;

    let output = utils::run_hyprwall_command(&env, &["toggle", "--dry-run"])?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert!(output.stdout.contains("/w/b.png"), "{}", output.stdout);
    assert!(output.stdout.contains("/w/c.png"), "{}", output.stdout);
    assert!(!env.path().join("state/hyprwall/toggle_state").exists());

    Ok(())
}

#[test]
fn test_config_init_then_show() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = utils::run_hyprwall_command(&env, &["config", "init"])?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert!(env.config_file().exists());

    let output = utils::run_hyprwall_command(&env, &["config", "init"])?;
    assert_eq!(output.exit_code, 1);

    let output = utils::run_hyprwall_command(&env, &["config", "show"])?;
    assert_eq!(output.exit_code, 0, "{}", output.stderr);
    assert!(output.stdout.contains("animated_chance = 10"), "{}", output.stdout);

    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config("animated_chance = \"lots\"\n")?;

    let output = utils::run_hyprwall_command(&env, &["pool"])?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("Invalid config"), "{}", output.stderr);

    Ok(())
}
