//! Persisted mode of the toggle command

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::WallpaperError;
use super::monitors::MonitorSet;
use super::pool::MediaKind;
use super::select::{Assignment, Selection, Source};
use crate::ui::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    First,
    Second,
}

impl RunState {
    pub fn as_flag(self) -> u8 {
        match self {
            RunState::First => 0,
            RunState::Second => 1,
        }
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.trim() {
            "0" => Some(RunState::First),
            "1" => Some(RunState::Second),
            _ => None,
        }
    }

    pub fn set_name(self) -> &'static str {
        match self {
            RunState::First => "first",
            RunState::Second => "second",
        }
    }
}

pub fn next_state(previous: RunState) -> RunState {
    match previous {
        RunState::First => RunState::Second,
        RunState::Second => RunState::First,
    }
}

pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or garbled files read as the first state
    pub fn load(&self) -> RunState {
        match fs::read_to_string(&self.path) {
            Ok(content) => RunState::from_flag(&content).unwrap_or_else(|| {
                emit(
                    Level::Warn,
                    "state.invalid",
                    &format!(
                        "Ignoring unexpected content in {}, starting from 0",
                        self.path.display()
                    ),
                    None,
                );
                RunState::First
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => RunState::First,
            Err(e) => {
                emit(
                    Level::Warn,
                    "state.unreadable",
                    &format!("Cannot read {}: {e}, starting from 0", self.path.display()),
                    None,
                );
                RunState::First
            }
        }
    }

    pub fn save(&self, state: RunState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state directory {}", parent.display()))?;
        }
        fs::write(&self.path, format!("{}\n", state.as_flag()))
            .with_context(|| format!("writing state file {}", self.path.display()))
    }
}

/// Map a fixed set onto the monitors, reusing the set's paths when there are
/// more monitors than paths. Video and gif entries are marked animated so
/// they go to the player.
pub fn set_selection(
    state: RunState,
    set: &[PathBuf],
    monitors: &MonitorSet,
) -> Result<Selection, WallpaperError> {
    if set.is_empty() {
        return Err(WallpaperError::EmptySet {
            set: state.set_name().to_string(),
        });
    }
    Ok(Selection(
        monitors
            .iter()
            .zip(set.iter().cycle())
            .map(|(monitor, path)| Assignment {
                monitor: monitor.to_string(),
                path: path.clone(),
                source: match MediaKind::of(path) {
                    MediaKind::Animated => Source::Animated,
                    _ => Source::Static,
                },
            })
            .collect(),
    ))
}
