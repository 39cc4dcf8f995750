use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bookreader",
    version,
    about = "Button-driven audiobook player with spoken announcements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Emulate the buttons with the keyboard (q w e r t s m p, +/- volume)
    #[arg(long)]
    pub vkb: bool,

    /// Play nothing; every file lasts `--simulated-clip-ms`
    #[arg(long, env = "BOOKREADER_NO_AUDIO")]
    pub no_audio: bool,

    /// Length of each simulated file with `--no-audio`
    #[arg(long, default_value_t = 3000)]
    pub simulated_clip_ms: u64,

    /// Log the power-off request instead of running the power-off command
    #[arg(long, env = "BOOKREADER_NO_POWEROFF")]
    pub no_poweroff: bool,

    /// Settings file (default: platform config dir `settings.toml`)
    #[arg(long, env = "BOOKREADER_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Storage root to use instead of the configured candidates
    #[arg(long, env = "BOOKREADER_ROOT")]
    pub root: Option<PathBuf>,

    /// Data directory (default: platform data_local_dir)
    #[arg(long, env = "BOOKREADER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log directory (default `{data_dir}/logs`)
    #[arg(long, env = "BOOKREADER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filter, same syntax as RUST_LOG
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the player (default)
    Play,

    /// Rename a book directory's files to 001.mp3, 002.mp3, ... in name order
    Rename {
        dir: PathBuf,

        /// Only list the new names
        #[arg(long)]
        dry_run: bool,

        /// Rename without asking for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}
