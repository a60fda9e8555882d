// Copyright (c) 2023-2024 The Algorand Foundation

//! Transport abstraction for connected devices
//!
//! Implementations wrap a concrete channel (USB HID, BLE, TCP simulator)
//! and expose one reliable, ordered request/response primitive. Timeouts
//! and reconnection are the transport's concern; failures surface as
//! [`Error::Transport`] and are normalized into the common result shape by
//! the caller.

use async_trait::async_trait;

use ledger_algorand_apdu::command::ApduCommand;

use crate::Error;

/// Byte-level exchange with a device.
///
/// One command is in flight at a time; [`crate::AlgorandApp`] serializes
/// access, so implementations need not be re-entrant.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Issue a single command, returning the raw response including the
    /// trailing 2-byte status word
    async fn exchange(&self, command: &ApduCommand) -> Result<Vec<u8>, Error>;
}
