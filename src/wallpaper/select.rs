//! Random wallpaper selection
//!
//! One roll decides whether an animated wallpaper takes part at all. If it
//! does, it occupies exactly one slot and every other slot gets an
//! independent static pick. Picks are with replacement, so two monitors may
//! end up with the same image. The final shuffle keeps the animated slot from
//! always landing on the first monitor.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::path::PathBuf;

use super::error::WallpaperError;
use super::monitors::MonitorSet;
use super::pool::WallpaperPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Static,
    Animated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub path: PathBuf,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub monitor: String,
    pub path: PathBuf,
    pub source: Source,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection(pub Vec<Assignment>);

impl Selection {
    /// Pair monitors with picks in order
    pub fn assign(monitors: &MonitorSet, picks: Vec<Pick>) -> Self {
        Selection(
            monitors
                .iter()
                .zip(picks)
                .map(|(monitor, pick)| Assignment {
                    monitor: monitor.to_string(),
                    path: pick.path,
                    source: pick.source,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.0.iter()
    }

    pub fn has_animated(&self) -> bool {
        self.iter().any(|a| a.source == Source::Animated)
    }

    pub fn has_static(&self) -> bool {
        self.iter().any(|a| a.source == Source::Static)
    }
}

fn choose<R: Rng + ?Sized>(items: &[PathBuf], source: Source, rng: &mut R) -> Option<Pick> {
    items.choose(rng).map(|path| Pick {
        path: path.clone(),
        source,
    })
}

/// Pick `count` wallpapers from `pool`
pub fn pick<R: Rng + ?Sized>(
    pool: &WallpaperPool,
    count: usize,
    animated_chance: u8,
    rng: &mut R,
) -> Result<Vec<Pick>, WallpaperError> {
    if pool.is_empty() {
        return Err(WallpaperError::EmptyPool { root: None });
    }

    let mut picks = Vec::with_capacity(count);

    if pool.static_items.is_empty() {
        // Only animated wallpapers available, every slot draws from them
        for _ in 0..count {
            picks.extend(choose(&pool.animated_items, Source::Animated, rng));
        }
        return Ok(picks);
    }

    let roll: u8 = rng.gen_range(0..100);
    if count > 0 && roll < animated_chance.min(100) {
        picks.extend(choose(&pool.animated_items, Source::Animated, rng));
    }
    while picks.len() < count {
        picks.extend(choose(&pool.static_items, Source::Static, rng));
    }

    picks.shuffle(rng);
    Ok(picks)
}

/// Pick one wallpaper per monitor
pub fn select<R: Rng + ?Sized>(
    pool: &WallpaperPool,
    monitors: &MonitorSet,
    animated_chance: u8,
    rng: &mut R,
) -> Result<Selection, WallpaperError> {
    let picks = pick(pool, monitors.len(), animated_chance, rng)?;
    Ok(Selection::assign(monitors, picks))
}
