mod common;
mod ui;
mod wallpaper;

use clap::Parser;
use std::io::IsTerminal;

use crate::ui::prelude::*;
use crate::wallpaper::cli::WallpaperCommands;
use crate::wallpaper::commands::handle_wallpaper_command;

/// Random multi-monitor wallpapers for Hyprland
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: WallpaperCommands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    ui::set_debug_mode(cli.debug);
    ui::init(cli.output, !cli.no_color && std::io::stdout().is_terminal());

    if let Err(e) = handle_wallpaper_command(cli.command).await {
        emit(Level::Error, "error", &format!("Error: {e:#}"), None);
        std::process::exit(1);
    }
}
