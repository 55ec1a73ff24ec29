// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Logger;

#[test]
fn every_level_can_be_called_without_a_subscriber_installed() {
    let log = Logger::new();
    log.say("hello");
    log.notice("done");
    log.warn("careful");
    log.shout("failed");
}

#[test]
fn a_stream_exposes_its_header() {
    let log = Logger::new();
    let stream = log.stream("prep: npm test");
    assert_eq!(stream.header(), "prep: npm test");
    stream.say("running...");
    stream.notice("ok");
}
