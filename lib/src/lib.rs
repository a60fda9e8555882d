// Copyright (c) 2023-2024 The Algorand Foundation

//! Algorand Ledger API Library
//!
//! Host-side client for the Algorand secure-element app. The library turns
//! application requests (fetch address, fetch version, sign a transaction
//! or authentication payload) into framed device commands, streams large
//! signing payloads in bounded chunks, and interprets the status-coded
//! responses.
//!
//! The physical transport is injected via the [`transport::Exchange`]
//! trait, which provides a single reliable request/response primitive;
//! HID/BLE/TCP specifics (and their timeouts) live behind that seam.

/// Re-export `ledger-algorand-apdu` for consumers
pub use ledger_algorand_apdu::{self as apdu};

pub mod transport;

mod error;
pub use error::Error;

mod handle;
pub use handle::{AlgorandApp, AppInfo, Address, DeviceInfo, Version};
