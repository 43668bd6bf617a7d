//! Applying a selection to the monitors
//!
//! Images go through hyprpaper (preload, then bind). Animated wallpapers get
//! a detached player process per monitor. A failure on one monitor never
//! stops the others, and nothing is rolled back.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::config::PlayerConfig;
use super::pool::MediaKind;
use super::select::{Assignment, Selection};
use crate::common::compositor::hyprland::Hyprctl;
use crate::common::exec::{CommandExecutor, args};
use crate::ui::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyFailure {
    pub monitor: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub succeeded: usize,
    pub total: usize,
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    pub fn is_success(&self) -> bool {
        self.succeeded > 0
    }

    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

pub struct Applier<'a> {
    exec: &'a dyn CommandExecutor,
    player: String,
    player_args: Vec<String>,
}

impl<'a> Applier<'a> {
    pub fn new(exec: &'a dyn CommandExecutor, player: &PlayerConfig) -> Result<Self> {
        Ok(Self {
            exec,
            player: player.command.clone(),
            player_args: player.option_args()?,
        })
    }

    pub fn apply(&self, selection: &Selection) -> ApplyReport {
        let mut report = ApplyReport {
            total: selection.len(),
            ..Default::default()
        };

        self.stop_players();

        for assignment in selection.iter() {
            match self.apply_one(assignment) {
                Ok(()) => {
                    report.succeeded += 1;
                    emit(
                        Level::Success,
                        "wallpaper.applied",
                        &format!("{} → {}", assignment.monitor, assignment.path.display()),
                        Some(serde_json::json!(assignment)),
                    );
                }
                Err(reason) => {
                    emit(
                        Level::Warn,
                        "wallpaper.failed",
                        &format!(
                            "Failed to set {} on {}: {reason}",
                            assignment.path.display(),
                            assignment.monitor
                        ),
                        None,
                    );
                    report.failures.push(ApplyFailure {
                        monitor: assignment.monitor.clone(),
                        path: assignment.path.clone(),
                        reason,
                    });
                }
            }
        }

        if report.succeeded > 0 {
            if let Err(e) = Hyprctl::new(self.exec).unload_unused() {
                emit(
                    Level::Debug,
                    "wallpaper.unload_failed",
                    &format!("Ignoring failed unload: {e}"),
                    None,
                );
            }
        }

        report
    }

    fn apply_one(&self, assignment: &Assignment) -> Result<(), String> {
        match MediaKind::of(&assignment.path) {
            MediaKind::Image => self.apply_image(&assignment.monitor, &assignment.path),
            MediaKind::Animated => self.apply_animated(&assignment.monitor, &assignment.path),
            MediaKind::Unknown => Err("unrecognized file type".to_string()),
        }
    }

    fn apply_image(&self, monitor: &str, path: &Path) -> Result<(), String> {
        let hyprctl = Hyprctl::new(self.exec);
        hyprctl
            .preload(path)
            .map_err(|e| format!("preload failed: {e}"))?;
        hyprctl
            .bind(monitor, path)
            .map_err(|e| format!("bind failed: {e}"))
    }

    fn apply_animated(&self, monitor: &str, path: &Path) -> Result<(), String> {
        let mut player_args = self.player_args.clone();
        player_args.push(monitor.to_string());
        player_args.push(path.to_string_lossy().into_owned());
        self.exec
            .spawn_detached(&self.player, &player_args)
            .map_err(|e| format!("could not start {}: {e}", self.player))
    }

    /// Kill animated players left over from the previous run
    fn stop_players(&self) {
        let _ = self.exec.run("pkill", &args(["-x", self.player.as_str()]));
    }
}
