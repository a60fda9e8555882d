// Copyright (c) 2023-2024 The Algorand Foundation

//! Device status words and their descriptions
//!
//! Every response ends in a 2-byte big-endian status word. Known words map
//! onto [`StatusCode`]; [`describe`] is total over the full 16-bit space so
//! callers never have to special-case unrecognized values.

use alloc::{format, string::String};

use num_enum::TryFromPrimitive;

/// Sentinel status word used when a failure carries no device status,
/// e.g. a transport-level error normalized into the common result shape.
pub const SW_UNKNOWN: u16 = 0xffff;

/// Known device status words
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum StatusCode {
    U2fUnknown = 0x0001,
    U2fBadRequest = 0x0002,
    U2fConfigUnsupported = 0x0003,
    U2fDeviceIneligible = 0x0004,
    U2fTimeout = 0x0005,
    Timeout = 0x000e,

    ExecutionError = 0x6400,
    WrongLength = 0x6700,
    ErrorDerivingKeys = 0x6802,
    EmptyBuffer = 0x6982,
    OutputBufferTooSmall = 0x6983,
    DataInvalid = 0x6984,
    ConditionsNotSatisfied = 0x6985,
    TransactionRejected = 0x6986,
    BadKeyHandle = 0x6a80,
    InvalidP1P2 = 0x6b00,
    InsNotSupported = 0x6d00,
    AppNotOpen = 0x6e00,
    UnknownError = 0x6f00,
    SignVerifyError = 0x6f01,

    NoError = 0x9000,
    DeviceBusy = 0x9001,
}

impl StatusCode {
    /// Fixed human-readable description, exactly one per known word
    pub fn description(&self) -> &'static str {
        use StatusCode::*;

        match self {
            U2fUnknown => "U2F: Unknown",
            U2fBadRequest => "U2F: Bad request",
            U2fConfigUnsupported => "U2F: Configuration unsupported",
            U2fDeviceIneligible => "U2F: Device Ineligible",
            U2fTimeout => "U2F: Timeout",
            Timeout => "Timeout",
            ExecutionError => "Execution Error",
            WrongLength => "Wrong Length",
            ErrorDerivingKeys => "Error deriving keys",
            EmptyBuffer => "Empty Buffer",
            OutputBufferTooSmall => "Output buffer too small",
            DataInvalid => "Data is invalid",
            ConditionsNotSatisfied => "Conditions not satisfied",
            TransactionRejected => "Transaction rejected",
            BadKeyHandle => "Bad key handle",
            InvalidP1P2 => "Invalid P1/P2",
            InsNotSupported => "Instruction not supported",
            AppNotOpen => "App does not seem to be open",
            UnknownError => "Unknown error",
            SignVerifyError => "Sign/verify error",
            NoError => "No errors",
            DeviceBusy => "Device is busy",
        }
    }
}

impl core::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Describe an arbitrary status word.
///
/// Known words return their fixed description, anything else a generated
/// string carrying the raw value.
pub fn describe(code: u16) -> String {
    match StatusCode::try_from(code) {
        Ok(c) => String::from(c.description()),
        Err(_) => format!("Unknown Status Code: 0x{code:04X}"),
    }
}
