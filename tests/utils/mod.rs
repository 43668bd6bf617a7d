use anyhow::Result;
use std::process::{Child, Command, Stdio};

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

fn hyprwall_command(env: &TestEnvironment, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hyprwall"));
    cmd.args(args)
        .env_clear()
        .envs(env.envs())
        .current_dir(env.path());
    cmd
}

pub fn run_hyprwall_command(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    let output = hyprwall_command(env, args).output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Start hyprwall in the background with piped output
pub fn spawn_hyprwall_command(env: &TestEnvironment, args: &[&str]) -> Result<Child> {
    Ok(hyprwall_command(env, args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?)
}

/// Parse one JSON event per line
pub fn json_events(output: &str) -> Vec<serde_json::Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}
