use anyhow::{Context, Result};
use colored::*;
use rand::Rng;

use crate::common::compositor::CompositorType;
use crate::common::deps::{self, HYPRCTL};
use crate::common::exec::{CommandExecutor, SystemExecutor};
use crate::common::lock::run_locked;
use crate::common::notify;
use crate::common::paths;
use crate::common::poll::{Sleeper, ThreadSleeper};
use crate::ui::prelude::*;
use crate::wallpaper::apply::{ApplyReport, Applier};
use crate::wallpaper::cli::{ConfigCommands, PoolArgs, RandomArgs, ToggleArgs, WallpaperCommands};
use crate::wallpaper::config::WallpaperConfig;
use crate::wallpaper::daemon::wait_for_hyprpaper;
use crate::wallpaper::error::WallpaperError;
use crate::wallpaper::monitors::{MonitorSet, discover};
use crate::wallpaper::pool::WallpaperPool;
use crate::wallpaper::select::{Selection, select};
use crate::wallpaper::state::{RunState, StateStore, next_state, set_selection};

pub async fn handle_wallpaper_command(command: WallpaperCommands) -> Result<()> {
    match command {
        WallpaperCommands::Random(args) => handle_random(args).await,
        WallpaperCommands::Toggle(args) => handle_toggle(args).await,
        WallpaperCommands::Monitors => handle_monitors(),
        WallpaperCommands::Pool(args) => handle_pool(args),
        WallpaperCommands::Config { command } => handle_config(command),
    }
}

fn warn_if_not_hyprland() {
    let compositor = CompositorType::detect();
    if !compositor.is_hyprland() {
        emit(
            Level::Warn,
            "compositor.unexpected",
            &format!(
                "Detected compositor {}, hyprwall only drives Hyprland",
                compositor.name()
            ),
            None,
        );
    }
}

async fn handle_random(args: RandomArgs) -> Result<()> {
    let mut config = WallpaperConfig::load()?;
    if let Some(dir) = args.dir {
        config.wallpaper_dir = dir;
    }
    if let Some(chance) = args.chance {
        config.animated_chance = chance.min(100);
    }

    if !args.dry_run {
        warn_if_not_hyprland();
        HYPRCTL.ensure()?;
    }

    let dry_run = args.dry_run;
    run_locked(paths::lock_file(), move || {
        random_run(
            &config,
            dry_run,
            &SystemExecutor,
            &ThreadSleeper,
            &mut rand::thread_rng(),
        )
        .map(|_| ())
    })
    .await?;
    Ok(())
}

/// One randomized run: scan, discover, select, apply
pub fn random_run<R: Rng + ?Sized>(
    config: &WallpaperConfig,
    dry_run: bool,
    exec: &dyn CommandExecutor,
    sleeper: &dyn Sleeper,
    rng: &mut R,
) -> Result<Option<ApplyReport>> {
    let pool = WallpaperPool::scan(&config.wallpaper_root(), &config.animated_dir_name)?;
    emit(
        Level::Debug,
        "pool.scanned",
        &format!(
            "Found {} static and {} animated wallpapers",
            pool.static_items.len(),
            pool.animated_items.len()
        ),
        None,
    );

    let monitors = resolve_monitors(config, exec)?;
    let selection = select(&pool, &monitors, config.animated_chance, rng)?;
    print_selection(&selection);

    if dry_run {
        return Ok(None);
    }
    apply_selection(config, &selection, exec, sleeper).map(Some)
}

async fn handle_toggle(args: ToggleArgs) -> Result<()> {
    let config = WallpaperConfig::load()?;
    let store = StateStore::new(paths::toggle_state_file()?);

    if !args.dry_run {
        warn_if_not_hyprland();
        HYPRCTL.ensure()?;
    }

    let dry_run = args.dry_run;
    run_locked(paths::lock_file(), move || {
        toggle_run(&config, &store, dry_run, &SystemExecutor, &ThreadSleeper).map(|_| ())
    })
    .await?;
    Ok(())
}

/// Apply the set after the persisted one and remember it on success
pub fn toggle_run(
    config: &WallpaperConfig,
    store: &StateStore,
    dry_run: bool,
    exec: &dyn CommandExecutor,
    sleeper: &dyn Sleeper,
) -> Result<RunState> {
    let previous = store.load();
    let next = next_state(previous);
    emit(
        Level::Debug,
        "toggle.state",
        &format!("Switching from state {} to {}", previous.as_flag(), next.as_flag()),
        None,
    );

    let monitors = resolve_monitors(config, exec)?;
    let set = config.set_paths(next == RunState::Second);
    let selection = set_selection(next, &set, &monitors)?;
    print_selection(&selection);

    if dry_run {
        return Ok(next);
    }

    apply_selection(config, &selection, exec, sleeper)?;
    store.save(next)?;
    Ok(next)
}

fn resolve_monitors(config: &WallpaperConfig, exec: &dyn CommandExecutor) -> Result<MonitorSet> {
    let fallback = MonitorSet::new(config.fallback_monitors.clone())
        .context("no fallback monitors configured")?;
    let (monitors, how) = discover(exec, &fallback);
    emit(
        Level::Debug,
        "monitor.discovered",
        &format!("Monitors ({how:?}): {}", monitors.names().join(", ")),
        None,
    );
    Ok(monitors)
}

fn print_selection(selection: &Selection) {
    for assignment in selection.iter() {
        emit(
            Level::Info,
            "selection.entry",
            &format!(
                "{} {} {}",
                assignment.monitor.bold(),
                assignment.path.display(),
                format!("({:?})", assignment.source).to_lowercase().dimmed()
            ),
            Some(serde_json::json!(assignment)),
        );
    }
}

fn apply_selection(
    config: &WallpaperConfig,
    selection: &Selection,
    exec: &dyn CommandExecutor,
    sleeper: &dyn Sleeper,
) -> Result<ApplyReport> {
    // Fatal checks happen before any monitor is touched
    if selection.has_animated() {
        deps::ensure_binary(&config.player.command)?;
    }
    let applier = Applier::new(exec, &config.player)?;

    if selection.has_static() {
        wait_for_hyprpaper(exec, &config.daemon, sleeper);
    }

    let report = applier.apply(selection);
    let summary = format!("Applied {}/{} wallpapers", report.succeeded, report.total);

    if config.notify {
        notify::send(exec, "Wallpaper", &summary);
    }

    if !report.is_success() {
        return Err(WallpaperError::ApplyFailed {
            failed: report.failed(),
            total: report.total,
        }
        .into());
    }

    let level = if report.failed() == 0 {
        Level::Success
    } else {
        Level::Warn
    };
    emit(level, "wallpaper.summary", &summary, Some(serde_json::json!(report)));
    Ok(report)
}

fn handle_monitors() -> Result<()> {
    let config = WallpaperConfig::load()?;
    let monitors = resolve_monitors(&config, &SystemExecutor)?;
    for name in monitors.iter() {
        emit(
            Level::Info,
            "monitor.entry",
            name,
            Some(serde_json::json!({ "name": name })),
        );
    }
    Ok(())
}

fn handle_pool(args: PoolArgs) -> Result<()> {
    let mut config = WallpaperConfig::load()?;
    if let Some(dir) = args.dir {
        config.wallpaper_dir = dir;
    }
    let root = config.wallpaper_root();
    let pool = WallpaperPool::scan(&root, &config.animated_dir_name)?;

    emit(
        Level::Info,
        "pool.summary",
        &format!(
            "{}: {} static, {} animated",
            root.display(),
            pool.static_items.len().to_string().green(),
            pool.animated_items.len().to_string().cyan()
        ),
        Some(serde_json::json!({
            "root": root,
            "static": pool.static_items.len(),
            "animated": pool.animated_items.len(),
        })),
    );

    if args.list {
        for path in &pool.static_items {
            emit(
                Level::Info,
                "pool.static",
                &path.display().to_string(),
                Some(serde_json::json!({ "path": path, "source": "static" })),
            );
        }
        for path in &pool.animated_items {
            emit(
                Level::Info,
                "pool.animated",
                &path.display().to_string(),
                Some(serde_json::json!({ "path": path, "source": "animated" })),
            );
        }
    }
    Ok(())
}

fn handle_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            let path = WallpaperConfig::config_file_path()?;
            emit(
                Level::Info,
                "config.path",
                &path.display().to_string(),
                Some(serde_json::json!({ "path": path })),
            );
        }
        ConfigCommands::Show => {
            let config = WallpaperConfig::load()?;
            match get_output_format() {
                OutputFormat::Json => emit(
                    Level::Info,
                    "config.show",
                    "effective configuration",
                    Some(serde_json::to_value(&config)?),
                ),
                OutputFormat::Text => print!("{}", config.to_toml()?),
            }
        }
        ConfigCommands::Init => {
            let path = WallpaperConfig::init()?;
            emit(
                Level::Success,
                "config.created",
                &format!("Wrote default config to {}", path.display()),
                None,
            );
        }
    }
    Ok(())
}
