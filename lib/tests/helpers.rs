// Copyright (c) 2023-2024 The Algorand Foundation

//! Shared helpers for exchange tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ledger_algorand::apdu::command::ApduCommand;
use ledger_algorand::{transport::Exchange, Error};

/// Scripted transport.
///
/// Each exchange must match the next expected command and returns the
/// paired raw response; any exchange past the end of the script panics.
/// Clones share the script, so a test can keep one for assertions.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<(ApduCommand, Vec<u8>)>>>,
}

impl MockTransport {
    pub fn new(script: impl IntoIterator<Item = (ApduCommand, Vec<u8>)>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
        }
    }

    /// Number of scripted exchanges not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl Exchange for MockTransport {
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, Error> {
        let (expected, response) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected exchange: {command:?}"));

        assert_eq!(command, &expected, "command mismatch");

        Ok(response)
    }
}

/// Transport that always fails at the channel level
pub struct BrokenTransport;

#[async_trait]
impl Exchange for BrokenTransport {
    async fn exchange(&self, _command: &ApduCommand) -> Result<Vec<u8>, Error> {
        Err(Error::Transport("device unplugged".to_string()))
    }
}

/// Build a raw response: payload followed by the big-endian status word
pub fn resp(payload: &[u8], status: u16) -> Vec<u8> {
    let mut buff = payload.to_vec();
    buff.extend_from_slice(&status.to_be_bytes());
    buff
}

/// Install a test logger, once
pub fn init_logs() {
    let _ = simplelog::SimpleLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
    );
}
