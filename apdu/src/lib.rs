// Copyright (c) 2023-2024 The Algorand Foundation

//! Protocol / APDU definitions for Algorand app communication
//!
//! This crate specifies the host side of the Algorand secure-element
//! protocol: command framing, status words, BIP44 path encoding, and the
//! chunked payload scheme used for signing operations.
//!
//! Commands are classic APDU frames (class / instruction / two parameter
//! bytes / payload), answered by a command-specific payload followed by a
//! 2-byte big-endian status word. Payloads exceeding [`chunks::CHUNK_SIZE`]
//! bytes are streamed to the device as an ordered chunk sequence, with the
//! first / add / last position of each chunk signalled through P1/P2.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

use core::fmt;

pub mod address;
pub mod app_info;
pub mod chunks;
pub mod command;
pub mod device_info;
pub mod path;
pub mod prelude;
pub mod status;
pub mod version;

/// Algorand APDU class
pub const ALGO_APDU_CLA: u8 = 0x80;

/// Class for the bolos app-info command, answered by any app
pub const APP_INFO_CLA: u8 = 0xb0;

/// Class for the bolos device-info command, dashboard only
pub const DEVICE_INFO_CLA: u8 = 0xe0;

/// Instruction for app-info / device-info under their bolos classes
pub const INFO_INS: u8 = 0x01;

/// Algorand APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, strum::Display)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch app version and device lock state
    GetVersion = 0x00,

    /// Fetch public key and encoded address for an account index
    GetPublicKey = 0x03,

    /// Fetch address with on-device display
    GetAddress = 0x04,

    /// Sign a msgpack-encoded transaction (chunked)
    SignMsgpack = 0x08,

    /// Sign arbitrary authentication data (chunked)
    SignArbitraryData = 0x10,
}

/// P1 parameter values
pub mod p1 {
    /// Return the address without user interaction
    pub const ONLY_RETRIEVE: u8 = 0x00;
    /// Show the address on-device and await confirmation
    pub const SHOW_ADDRESS: u8 = 0x01;

    /// First chunk of a signing payload
    pub const MSGPACK_FIRST: u8 = 0x00;
    /// First chunk, prefixed with a 4-byte account id
    pub const MSGPACK_FIRST_ACCOUNT_ID: u8 = 0x01;
    /// Any following chunk
    pub const MSGPACK_ADD: u8 = 0x80;
}

/// P2 parameter values
pub mod p2 {
    /// Default parameter for non-chunked commands
    pub const DEFAULT: u8 = 0x00;

    /// More chunks follow this one
    pub const MSGPACK_ADD: u8 = 0x80;
    /// Final chunk of a signing payload
    pub const MSGPACK_LAST: u8 = 0x00;
}

/// APDU encode / decode errors
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ApduError {
    /// Buffer too short for the declared or required length
    InvalidLength,
    /// Field value outside its valid encoding
    InvalidEncoding,
    /// Text field is not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for ApduError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApduError::InvalidLength => write!(f, "invalid length"),
            ApduError::InvalidEncoding => write!(f, "invalid encoding"),
            ApduError::InvalidUtf8 => write!(f, "invalid utf8"),
        }
    }
}

impl From<encdec::Error> for ApduError {
    fn from(e: encdec::Error) -> Self {
        match e {
            encdec::Error::Length => ApduError::InvalidLength,
            _ => ApduError::InvalidEncoding,
        }
    }
}
