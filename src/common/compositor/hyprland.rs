//! hyprctl IPC: monitor listing and hyprpaper control

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::common::exec::{CommandExecutor, CommandOutput, ExecError, args};

const HYPRCTL: &str = "hyprctl";

lazy_static! {
    // "Monitor DP-1 (ID 0):"
    static ref MONITOR_LINE: Regex =
        Regex::new(r"(?m)^Monitor\s+(\S+)\s+\(ID\s+\d+\):").unwrap();
}

/// Monitor information from hyprctl monitors -j
#[derive(Debug, Clone, Deserialize)]
pub struct HyprlandMonitor {
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
}

pub struct Hyprctl<'a> {
    exec: &'a dyn CommandExecutor,
}

impl<'a> Hyprctl<'a> {
    pub fn new(exec: &'a dyn CommandExecutor) -> Self {
        Self { exec }
    }

    /// Raw JSON text of `hyprctl monitors -j`
    pub fn monitors_json(&self) -> Result<String, ExecError> {
        Ok(self
            .exec
            .run_checked(HYPRCTL, &args(["monitors", "-j"]))?
            .stdout)
    }

    /// Human-readable text of `hyprctl monitors`
    pub fn monitors_plain(&self) -> Result<String, ExecError> {
        Ok(self.exec.run_checked(HYPRCTL, &args(["monitors"]))?.stdout)
    }

    pub fn preload(&self, path: &Path) -> Result<(), ExecError> {
        self.hyprpaper(args(["preload".to_string(), path_arg(path)]))
    }

    /// Bind an already preloaded image to one monitor
    pub fn bind(&self, monitor: &str, path: &Path) -> Result<(), ExecError> {
        self.hyprpaper(args([
            "wallpaper".to_string(),
            format!("{monitor},{}", path_arg(path)),
        ]))
    }

    pub fn unload_unused(&self) -> Result<(), ExecError> {
        self.hyprpaper(args(["unload", "unused"]))
    }

    /// True once hyprpaper answers IPC requests
    pub fn hyprpaper_ready(&self) -> bool {
        self.hyprpaper(args(["listloaded"])).is_ok()
    }

    fn hyprpaper(&self, request: Vec<String>) -> Result<(), ExecError> {
        let mut full = args(["hyprpaper"]);
        full.extend(request);
        let output = self.exec.run_checked(HYPRCTL, &full)?;
        check_reply(&output)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// hyprctl exits 0 even when hyprpaper rejects a request, the reply text
/// carries the error instead.
fn check_reply(output: &CommandOutput) -> Result<(), ExecError> {
    let reply = output.stdout.trim();
    let lower = reply.to_ascii_lowercase();
    if lower.starts_with("error")
        || lower.starts_with("couldn't")
        || lower.contains("not preloaded")
    {
        return Err(ExecError::Failed {
            program: HYPRCTL.to_string(),
            code: output.code,
            stderr: reply.to_string(),
        });
    }
    Ok(())
}

/// Parse `hyprctl monitors -j`, skipping disabled outputs
pub fn parse_monitors_json(json: &str) -> Result<Vec<String>, serde_json::Error> {
    let monitors: Vec<HyprlandMonitor> = serde_json::from_str(json)?;
    Ok(monitors
        .into_iter()
        .filter(|m| !m.disabled)
        .map(|m| m.name)
        .collect())
}

/// Pull monitor names out of plain `hyprctl monitors` text
pub fn parse_monitors_plain(text: &str) -> Vec<String> {
    MONITOR_LINE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
