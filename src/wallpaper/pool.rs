//! Wallpaper pool discovery
//!
//! Wallpapers live one level below the root, grouped by subdirectory
//! (`<root>/nature/lake.png`). One reserved subdirectory holds animated
//! wallpapers instead of images.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::WallpaperError;
use crate::ui::prelude::*;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "jxl"];
pub const ANIMATED_EXTENSIONS: &[&str] = &["gif", "mp4", "mkv", "webm", "mov", "avi"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Animated,
    Unknown,
}

impl MediaKind {
    pub fn of(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return MediaKind::Unknown;
        };
        let ext = ext.to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Image
        } else if ANIMATED_EXTENSIONS.contains(&ext.as_str()) {
            MediaKind::Animated
        } else {
            MediaKind::Unknown
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallpaperPool {
    pub static_items: Vec<PathBuf>,
    pub animated_items: Vec<PathBuf>,
}

impl WallpaperPool {
    #[cfg(test)]
    pub fn new(static_items: Vec<PathBuf>, animated_items: Vec<PathBuf>) -> Self {
        Self {
            static_items,
            animated_items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.static_items.is_empty() && self.animated_items.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.static_items.len() + self.animated_items.len()
    }

    /// Scan `root` and fail when nothing usable was found
    pub fn scan(root: &Path, animated_dir_name: &str) -> Result<Self, WallpaperError> {
        let pool = Self::scan_lenient(root, animated_dir_name);
        if pool.is_empty() {
            return Err(WallpaperError::EmptyPool {
                root: Some(root.to_path_buf()),
            });
        }
        Ok(pool)
    }

    /// Scan `root` without the non-empty check. Unreadable entries are
    /// skipped.
    pub fn scan_lenient(root: &Path, animated_dir_name: &str) -> Self {
        let mut pool = Self::default();

        let entries = WalkDir::new(root)
            .min_depth(2)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    emit(
                        Level::Debug,
                        "pool.skip",
                        &format!("Skipping unreadable entry: {e}"),
                        None,
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let in_animated_dir = path
                .parent()
                .and_then(|dir| dir.file_name())
                .is_some_and(|name| name == animated_dir_name);

            match (in_animated_dir, MediaKind::of(&path)) {
                (true, MediaKind::Animated) => pool.animated_items.push(path),
                (false, MediaKind::Image) => pool.static_items.push(path),
                _ => emit(
                    Level::Debug,
                    "pool.ignore",
                    &format!("Ignoring {}", path.display()),
                    None,
                ),
            }
        }

        pool
    }
}
