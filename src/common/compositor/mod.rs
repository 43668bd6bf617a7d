use std::env;

pub mod hyprland;

/// Window compositor types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorType {
    /// Hyprland compositor (dynamic tiling Wayland compositor)
    Hyprland,
    /// Other/unknown compositor
    Other(String),
}

impl CompositorType {
    /// Detect the current compositor from the session environment
    pub fn detect() -> Self {
        Self::detect_from(|key| env::var(key).ok())
    }

    fn detect_from(var: impl Fn(&str) -> Option<String>) -> Self {
        if var("HYPRLAND_INSTANCE_SIGNATURE").is_some_and(|s| !s.is_empty()) {
            return CompositorType::Hyprland;
        }

        for key in ["XDG_CURRENT_DESKTOP", "XDG_SESSION_DESKTOP", "DESKTOP_SESSION"] {
            if let Some(session) = var(key) {
                if session.to_lowercase().contains("hyprland") {
                    return CompositorType::Hyprland;
                }
                if !session.is_empty() {
                    return CompositorType::Other(session);
                }
            }
        }

        if var("WAYLAND_DISPLAY").is_some() {
            return CompositorType::Other("wayland".to_string());
        }
        if var("DISPLAY").is_some() {
            return CompositorType::Other("x11".to_string());
        }

        CompositorType::Other("unknown".to_string())
    }

    /// Get a human-readable name for the compositor
    pub fn name(&self) -> String {
        match self {
            CompositorType::Hyprland => "Hyprland".to_string(),
            CompositorType::Other(name) => name.clone(),
        }
    }

    pub fn is_hyprland(&self) -> bool {
        matches!(self, CompositorType::Hyprland)
    }
}
