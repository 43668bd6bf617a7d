use super::deps::NOTIFY_SEND;
use super::exec::{CommandExecutor, args};
use crate::ui::prelude::*;

/// Best-effort desktop notification; a missing notify-send is not an error
pub fn send(exec: &dyn CommandExecutor, summary: &str, body: &str) {
    if !NOTIFY_SEND.is_installed() {
        emit(Level::Debug, "notify.skipped", "notify-send not installed", None);
        return;
    }
    if let Err(e) = exec.spawn_detached(
        NOTIFY_SEND.name,
        &args(["--app-name=hyprwall", summary, body]),
    ) {
        emit(
            Level::Debug,
            "notify.failed",
            &format!("Failed to show notification: {e}"),
            None,
        );
    }
}
