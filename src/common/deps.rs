//! External tools hyprwall shells out to

use crate::wallpaper::error::WallpaperError;

#[derive(Debug, Clone, Copy)]
pub struct Tool {
    pub name: &'static str,
    pub description: &'static str,
    pub package: &'static str,
}

pub static HYPRCTL: Tool = Tool {
    name: "hyprctl",
    description: "Hyprland IPC client",
    package: "hyprland",
};

pub static HYPRPAPER: Tool = Tool {
    name: "hyprpaper",
    description: "Hyprland wallpaper daemon",
    package: "hyprpaper",
};

pub static NOTIFY_SEND: Tool = Tool {
    name: "notify-send",
    description: "Desktop notifications",
    package: "libnotify",
};

impl Tool {
    pub fn is_installed(&self) -> bool {
        which::which(self.name).is_ok()
    }

    pub fn ensure(&self) -> Result<(), WallpaperError> {
        if self.is_installed() {
            Ok(())
        } else {
            Err(WallpaperError::ToolMissing {
                tool: self.name.to_string(),
                hint: format!(
                    "{} ({}), install package '{}'",
                    self.name, self.description, self.package
                ),
            })
        }
    }
}

/// Check a binary by name, for tools that come from the config file
pub fn ensure_binary(name: &str) -> Result<(), WallpaperError> {
    if which::which(name).is_ok() {
        return Ok(());
    }
    Err(WallpaperError::ToolMissing {
        tool: name.to_string(),
        hint: format!("'{name}' is not in PATH"),
    })
}
