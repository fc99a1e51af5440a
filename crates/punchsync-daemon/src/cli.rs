use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "punchsyncd",
    about = "Attendance punch synchronization daemon",
    version
)]
pub struct Cli {
    /// Path to punchsync.toml (default: PUNCHSYNC_CONFIG or
    /// ~/.punchsync/punchsync.toml).
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the periodic sync scheduler until ctrl-c.
    Run,

    /// One-shot sync over the default incremental window.
    Sync {
        /// Ignore the stored cursor and re-backfill this many days.
        #[arg(long)]
        backfill_days: Option<u32>,

        /// Print the sync report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// One-shot sync over an explicit range.
    Range {
        /// Range start — YYYY-MM-DD (midnight) or "YYYY-MM-DD HH:MM[:SS]".
        #[arg(long)]
        from: String,

        /// Range end — YYYY-MM-DD (23:59) or "YYYY-MM-DD HH:MM[:SS]".
        #[arg(long)]
        to: String,

        /// Employee code filter; defaults to the configured one.
        #[arg(long)]
        empcode: Option<String>,

        /// Print the sync report as JSON on stdout.
        #[arg(long)]
        json: bool,
    },

    /// Show the sync cursor and stored row counts.
    Status,

    /// Write a commented starter config to the default path.
    InitConfig {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
}
