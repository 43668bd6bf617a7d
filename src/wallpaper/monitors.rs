use serde::Serialize;

use super::error::WallpaperError;
use crate::common::compositor::hyprland::{Hyprctl, parse_monitors_json, parse_monitors_plain};
use crate::common::exec::CommandExecutor;
use crate::ui::prelude::*;

/// Ordered, never empty list of monitor names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonitorSet(Vec<String>);

impl MonitorSet {
    pub fn new(names: Vec<String>) -> Result<Self, WallpaperError> {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(WallpaperError::NoMonitors);
        }
        Ok(Self(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// How the monitor set was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Discovery {
    Json,
    Plain,
    Fallback,
}

/// Ask Hyprland for its monitors, degrading to the fallback set.
///
/// Never fails: a wallpaper on a guessed monitor beats no wallpaper at all.
pub fn discover(exec: &dyn CommandExecutor, fallback: &MonitorSet) -> (MonitorSet, Discovery) {
    let hyprctl = Hyprctl::new(exec);

    match hyprctl.monitors_json() {
        Ok(json) => match parse_monitors_json(&json) {
            Ok(names) => match MonitorSet::new(names) {
                Ok(set) => return (set, Discovery::Json),
                Err(_) => debug("hyprctl monitors -j listed no active monitors"),
            },
            Err(e) => debug(&format!("Could not parse hyprctl monitors -j: {e}")),
        },
        Err(e) => debug(&format!("hyprctl monitors -j failed: {e}")),
    }

    match hyprctl.monitors_plain() {
        Ok(text) => match MonitorSet::new(parse_monitors_plain(&text)) {
            Ok(set) => return (set, Discovery::Plain),
            Err(_) => debug("hyprctl monitors listed no monitors"),
        },
        Err(e) => debug(&format!("hyprctl monitors failed: {e}")),
    }

    emit(
        Level::Warn,
        "monitor.fallback",
        &format!(
            "Could not discover monitors, falling back to {}",
            fallback.names().join(", ")
        ),
        Some(serde_json::json!({ "monitors": fallback })),
    );
    (fallback.clone(), Discovery::Fallback)
}

fn debug(message: &str) {
    emit(Level::Debug, "monitor.discovery", message, None);
}
