use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod cli;

use cli::{Cli, Command};
use punchsync_core::config::{default_config_path, CONFIG_TEMPLATE};
use punchsync_core::{PunchsyncConfig, SyncReport};
use punchsync_engine::SyncEngine;
use punchsync_scheduler::SyncScheduler;
use punchsync_upstream::HttpPunchSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // init-config runs before config load — there is nothing to load yet.
    if let Command::InitConfig { force } = &cli.command {
        return write_default_config(*force);
    }

    let config = PunchsyncConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let db_path = &config.database.path;
    ensure_parent_dir(db_path)?;
    info!(path = %db_path, "opening SQLite database");
    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    punchsync_store::db::init_db(&conn)?;

    let db = Arc::new(Mutex::new(conn));
    let source = Arc::new(HttpPunchSource::new(&config.upstream)?);
    let engine = Arc::new(SyncEngine::new(
        source,
        db.clone(),
        config.upstream.empcode.clone(),
        config.sync.clone(),
    ));

    match cli.command {
        Command::Run => {
            let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
            let scheduler = SyncScheduler::new(
                engine.clone(),
                Duration::from_secs(config.sync.interval_secs),
            );
            let handle = tokio::spawn(scheduler.run(shutdown_rx));

            tokio::signal::ctrl_c().await?;
            info!("ctrl-c received, shutting down");
            let _ = shutdown_tx.send(true);
            handle.await?;
        }

        Command::Sync {
            backfill_days,
            json,
        } => {
            let report = engine.sync_default_window(backfill_days).await?;
            print_report(&report, json)?;
        }

        Command::Range {
            from,
            to,
            empcode,
            json,
        } => {
            let report = engine.sync_range(&from, &to, empcode.as_deref()).await?;
            print_report(&report, json)?;
        }

        Command::Status => {
            let conn = db.lock().unwrap();
            let counts = punchsync_store::queries::counts(&conn)?;
            let cursor = punchsync_store::last_punch_time(&conn, &config.upstream.empcode)?;
            match cursor {
                Some(ts) => println!("last punch: {ts}"),
                None => println!("last punch: none (no punches stored yet)"),
            }
            println!("employees:  {}", counts.employees);
            println!("punches:    {}", counts.punches);
        }

        Command::InitConfig { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}

fn print_report(report: &SyncReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn ensure_parent_dir(path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_default_config(force: bool) -> anyhow::Result<()> {
    let path = default_config_path();
    if Path::new(&path).exists() && !force {
        anyhow::bail!("{path} already exists (use --force to overwrite)");
    }
    ensure_parent_dir(&path)?;
    std::fs::write(&path, CONFIG_TEMPLATE).with_context(|| format!("writing {path}"))?;
    println!("wrote {path}");
    Ok(())
}
