//! Waiting for hyprpaper before issuing wallpaper requests

use crate::common::compositor::hyprland::Hyprctl;
use crate::common::deps::HYPRPAPER;
use crate::common::exec::CommandExecutor;
use crate::common::poll::{PollOutcome, Sleeper, poll_until};
use crate::ui::prelude::*;

use super::config::DaemonConfig;

/// Poll hyprpaper until it answers, optionally starting it after the first
/// failed probe.
pub fn wait_for_hyprpaper(
    exec: &dyn CommandExecutor,
    config: &DaemonConfig,
    sleeper: &dyn Sleeper,
) -> PollOutcome {
    let hyprctl = Hyprctl::new(exec);

    let outcome = poll_until(config.retry_policy(), sleeper, |attempt| {
        if hyprctl.hyprpaper_ready() {
            return true;
        }
        if attempt == 1 && config.start {
            emit(
                Level::Info,
                "daemon.start",
                "hyprpaper is not answering, starting it",
                None,
            );
            if let Err(e) = exec.spawn_detached(HYPRPAPER.name, &[]) {
                emit(
                    Level::Warn,
                    "daemon.start_failed",
                    &format!("Failed to start hyprpaper: {e}"),
                    None,
                );
            }
        }
        false
    });

    match outcome {
        PollOutcome::Ready { attempt } => emit(
            Level::Debug,
            "daemon.ready",
            &format!("hyprpaper ready after {attempt} probe(s)"),
            None,
        ),
        PollOutcome::TimedOut { attempts } => emit(
            Level::Warn,
            "daemon.timeout",
            &format!("hyprpaper did not become ready after {attempts} probes"),
            None,
        ),
    }
    outcome
}
