use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, Clone)]
pub enum WallpaperCommands {
    /// Pick a random wallpaper for every monitor
    Random(RandomArgs),
    /// Alternate between the two configured wallpaper sets
    Toggle(ToggleArgs),
    /// List the monitors wallpapers would be assigned to
    Monitors,
    /// Show the wallpapers found in the wallpaper directory
    Pool(PoolArgs),
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RandomArgs {
    /// Wallpaper directory (overrides wallpaper_dir from the config)
    #[arg(long)]
    pub dir: Option<String>,
    /// Percent chance of one animated wallpaper (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub chance: Option<u8>,
    /// Print the selection without touching any monitor
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ToggleArgs {
    /// Print the next set without applying it or saving state
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PoolArgs {
    /// Wallpaper directory (overrides wallpaper_dir from the config)
    #[arg(long)]
    pub dir: Option<String>,
    /// Print every wallpaper path
    #[arg(long)]
    pub list: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init,
}
