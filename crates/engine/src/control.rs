// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The top-level control loop: run every block's preps once, start its
//! daemons, then react to debounced change-sets by re-running the preps and
//! daemons of whichever blocks they match. A change to the watched config
//! file itself triggers a reparse and a full restart instead.

use std::path::Path;

use thiserror::Error;
use tokio::sync::mpsc;

use flux_adapters::{Logger, Notifier};
use flux_config::ConfigError;
use flux_core::{Config, Mod};
use flux_daemon::{DaemonPen, DaemonWorld};
use flux_shell::ShellKind;
use flux_watch::DebounceConfig;

use crate::prep::{run_preps, PrepError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Prep(#[from] PrepError),
    #[error(transparent)]
    Watch(#[from] flux_watch::WatchError),
}

/// Run every block's preps once and exit - `flux --prep`.
pub async fn prep_only(
    config: &Config,
    root: &Path,
    shell_fallback: Option<ShellKind>,
    log: &Logger,
    notifier: &dyn Notifier,
) -> Result<(), PrepError> {
    for block in &config.blocks {
        let shell = ShellKind::resolve(config.variables.shell(), shell_fallback);
        run_preps(block, &config.variables, None, root, shell, true, log, notifier).await?;
    }
    Ok(())
}

/// The long-running watch loop. Returns only on an unrecoverable watcher
/// error; a self-reload keeps the loop going with the freshly parsed config.
pub async fn run(
    mut config: Config,
    config_path: Option<&Path>,
    root: &Path,
    debounce: DebounceConfig,
    shell_fallback: Option<ShellKind>,
    log: &Logger,
    notifier: &dyn Notifier,
) -> Result<(), EngineError> {
    loop {
        prep_only(&config, root, shell_fallback, log, notifier).await?;

        let world = spawn_daemon_world(&config, shell_fallback);
        world.restart_all();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watch_root = root.to_path_buf();
        let watch_task = tokio::spawn(async move { flux_watch::run(&watch_root, debounce, tx).await });

        let mut reload: Option<Config> = None;
        while let Some(modset) = rx.recv().await {
            log.say(&format!("delta: {modset:?}"));

            if let Some(path) = config_path {
                if modset.has(path.to_string_lossy().as_ref()) {
                    match reparse(path) {
                        Ok(new_config) => {
                            log.notice(&format!("reloading config {}", path.display()));
                            reload = Some(new_config);
                            break;
                        }
                        Err(err) => {
                            log.warn(&format!("reloading config - error reading {}: {err}", path.display()));
                            continue;
                        }
                    }
                }
            }

            if let Err(err) = react(&config, &world, &modset, root, shell_fallback, log, notifier).await {
                world.stop_all().await;
                watch_task.abort();
                return Err(err.into());
            }
        }

        world.stop_all().await;

        let watch_result = if reload.is_some() {
            watch_task.abort();
            None
        } else {
            watch_task.await.ok()
        };

        match reload {
            Some(new_config) => config = new_config,
            None => {
                return match watch_result {
                    Some(Err(err)) => Err(err.into()),
                    _ => Ok(()),
                };
            }
        }
    }
}

async fn react(
    config: &Config,
    world: &DaemonWorld,
    modset: &Mod,
    root: &Path,
    shell_fallback: Option<ShellKind>,
    log: &Logger,
    notifier: &dyn Notifier,
) -> Result<(), PrepError> {
    for (block, pen) in config.blocks.iter().zip(world.pens()) {
        let Some(filtered) = flux_watch::filter_mod(block, modset) else { continue };
        let shell = ShellKind::resolve(config.variables.shell(), shell_fallback);
        match run_preps(block, &config.variables, Some(&filtered), root, shell, false, log, notifier).await {
            Ok(()) => pen.restart(),
            // A prep that ran and exited non-zero already notified and
            // stopped the rest of this block's preps; it's recoverable -
            // skip this block's daemon restart and keep reacting to the
            // rest of the Mod. Only a spawn/render failure is fatal.
            Err(err @ PrepError::Failed { .. }) => {
                log.warn(&format!("skipping daemon restart: {err}"));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn spawn_daemon_world(config: &Config, shell_fallback: Option<ShellKind>) -> DaemonWorld {
    let pens = config
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let shell = ShellKind::resolve(config.variables.shell(), shell_fallback);
            DaemonPen::spawn(&format!("block {i}"), &block.daemons, shell, block.in_dir.clone())
        })
        .collect();
    DaemonWorld::new(pens)
}

fn reparse(path: &Path) -> Result<Config, ReloadError> {
    let text = std::fs::read_to_string(path).map_err(ReloadError::Io)?;
    let file_name = path.to_string_lossy().into_owned();
    flux_config::parse_str(&text, &file_name).map_err(ReloadError::Config)
}

#[derive(Debug, Error)]
enum ReloadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
#[path = "control_tests.rs"]
mod tests;
