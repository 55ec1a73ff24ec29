// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use flux_adapters::{FakeNotifier, Logger};
use flux_core::{Block, Config, Mod, Pattern, PrepSpec};
use flux_watch::DebounceConfig;

use super::{prep_only, react, run, spawn_daemon_world, EngineError};

#[tokio::test]
async fn prep_only_runs_every_block_once() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");

    let mut config = Config::new();
    let mut block_a = Block::default();
    block_a.preps.push(PrepSpec { command: format!("echo a >> {}", marker.display()), onchange: false });
    let mut block_b = Block::default();
    block_b.preps.push(PrepSpec { command: format!("echo b >> {}", marker.display()), onchange: false });
    config.blocks.push(block_a);
    config.blocks.push(block_b);

    let log = Logger::new();
    let notifier = FakeNotifier::new();
    prep_only(&config, dir.path(), None, &log, &notifier).await.unwrap();

    let contents = std::fs::read_to_string(&marker).unwrap();
    assert_eq!(contents, "a\nb\n");
}

#[tokio::test]
async fn run_surfaces_a_watch_error_for_an_unwatchable_root() {
    let config = Config::new();
    let log = Logger::new();
    let notifier = FakeNotifier::new();
    let missing = std::path::Path::new("/nonexistent/does-not-exist-really");

    let result =
        run(config, None, missing, DebounceConfig::default(), None, &log, &notifier).await;
    assert!(matches!(result, Err(EngineError::Watch(_))));
}

#[tokio::test]
async fn a_failing_prep_skips_its_blocks_daemon_restart_without_aborting_the_reaction() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a"), b"x").unwrap();
    std::fs::write(dir.path().join("b"), b"x").unwrap();
    let marker = dir.path().join("marker");

    let mut config = Config::new();

    let mut failing = Block::default();
    failing.include.push(Pattern::parse("a").unwrap());
    failing.preps.push(PrepSpec { command: "exit 1".to_string(), onchange: false });
    config.blocks.push(failing);

    let mut ok_block = Block::default();
    ok_block.include.push(Pattern::parse("b").unwrap());
    ok_block.preps.push(PrepSpec { command: format!("echo ok >> {}", marker.display()), onchange: false });
    config.blocks.push(ok_block);

    let log = Logger::new();
    let notifier = FakeNotifier::new();
    let world = spawn_daemon_world(&config, None);
    let modset = Mod::new(vec!["a".to_string(), "b".to_string()], vec![], vec![]);

    let result = react(&config, &world, &modset, dir.path(), None, &log, &notifier).await;
    assert!(result.is_ok());

    let contents = std::fs::read_to_string(&marker).unwrap();
    assert_eq!(contents, "ok\n");

    world.stop_all().await;
}
