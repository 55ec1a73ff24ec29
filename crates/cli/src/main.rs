// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! flux: reruns commands and restarts long-lived processes in reaction to
//! filesystem changes, as described by a config file's pattern-matched
//! blocks.

use std::path::PathBuf;

use clap::Parser;

use flux_adapters::{BellNotifier, DesktopNotifier, Logger, NotifierSet};
use flux_core::{Block, Config, Pattern, PrepSpec};
use flux_watch::DebounceConfig;

/// Command-line surface.
#[derive(Parser, Debug)]
#[command(name = "flux", version, about = "Watches files and reruns commands in reaction to changes.")]
struct Cli {
    /// Config file to read.
    #[arg(short = 'f', long = "file", default_value = "flux.conf")]
    file: String,

    /// Disable config-file reload: changes to the config file itself are
    /// ignored instead of triggering a reparse and restart.
    #[arg(short = 'c', long = "noconf")]
    noconf: bool,

    /// Ring the terminal bell on every prep/daemon failure.
    #[arg(short = 'b', long = "bell")]
    bell: bool,

    /// Print the built-in exclude patterns and exit.
    #[arg(short = 'i', long = "ignores")]
    ignores: bool,

    /// Comma-separated notification methods: desktop, bell.
    #[arg(short = 'n', long = "notify")]
    notify: Option<String>,

    /// Run every block's prep commands once and exit.
    #[arg(short = 'p', long = "prep")]
    prep: bool,

    /// Run CMD on every change instead of reading a config file.
    #[arg(long = "exec", value_name = "CMD")]
    exec: Option<String>,

    /// Verbose logging.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.ignores {
        for pattern in flux_config::COMMON_EXCLUDES {
            println!("{pattern}");
        }
        return Ok(());
    }

    tokio::runtime::Runtime::new()?.block_on(run(cli))
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_notifiers(cli: &Cli, log: &Logger) -> NotifierSet {
    let mut notifiers = NotifierSet::new();
    if cli.bell {
        notifiers.push(Box::new(BellNotifier));
    }
    if let Some(methods) = &cli.notify {
        for method in methods.split(',').map(str::trim).filter(|m| !m.is_empty()) {
            match method {
                "desktop" | "growl" | "notify-send" => notifiers.push(Box::new(DesktopNotifier::new())),
                "bell" => notifiers.push(Box::new(BellNotifier)),
                other => log.warn(&format!("unknown notify method: {other}")),
            }
        }
    }
    notifiers
}

/// An ad-hoc single-block config for `--exec CMD`: every file under the
/// current directory, run CMD once per change-set.
fn exec_config(command: &str) -> anyhow::Result<Config> {
    let mut config = Config::new();
    let mut block = Block::default();
    block.include.push(Pattern::parse("**/*")?);
    block.preps.push(PrepSpec { command: command.to_string(), onchange: false });
    config.blocks.push(block);
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let log = Logger::new();
    let notifiers = build_notifiers(&cli, &log);
    let root = std::env::current_dir()?;

    let (config, config_path) = if let Some(command) = &cli.exec {
        (exec_config(command)?, None)
    } else {
        let path = PathBuf::from(&cli.file);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        let config = flux_config::parse_with_options(&text, &cli.file, |n| std::env::var(n).ok(), true)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        let config_path = if cli.noconf { None } else { Some(path) };
        (config, config_path)
    };

    if cli.prep {
        flux_engine::prep_only(&config, &root, None, &log, &notifiers).await?;
        return Ok(());
    }

    flux_engine::run(config, config_path.as_deref(), &root, DebounceConfig::default(), None, &log, &notifiers)
        .await?;
    Ok(())
}
