use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaperError {
    /// `root` is unknown when the pool was built in memory
    #[error("No wallpapers found{}", describe_root(.root))]
    EmptyPool { root: Option<PathBuf> },

    #[error("No monitors could be resolved")]
    NoMonitors,

    #[error("Required tool '{tool}' is missing: {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("Toggle set '{set}' has no wallpapers configured")]
    EmptySet { set: String },

    #[error("No wallpaper could be applied ({failed} of {total} monitors failed)")]
    ApplyFailed { failed: usize, total: usize },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_root(root: &Option<PathBuf>) -> String {
    match root {
        Some(root) => format!(" under {}", root.display()),
        None => String::new(),
    }
}
