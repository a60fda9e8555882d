// Copyright (c) 2023-2024 The Algorand Foundation

//! App version response decoding

use byteorder::{BigEndian, ByteOrder};
use encdec::DecodeOwned;

use crate::ApduError;

/// Minimum version payload: test mode, semver triple, lock state
const VERSION_MIN_LEN: usize = 5;

/// Payload length when the bolos target id is appended
const VERSION_TARGET_LEN: usize = 9;

/// App version response payload
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   TEST_MODE   |     MAJOR     |     MINOR     |     PATCH     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    LOCKED     |               TARGET_ID (optional)            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VersionResp {
    /// App was built in test mode
    pub test_mode: bool,
    /// App major version
    pub major: u8,
    /// App minor version
    pub minor: u8,
    /// App patch version
    pub patch: u8,
    /// Device is locked
    pub device_locked: bool,
    /// Bolos target id, zero when the app omits it
    pub target_id: u32,
}

impl DecodeOwned for VersionResp {
    type Output = Self;
    type Error = ApduError;

    fn decode_owned(buff: &[u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < VERSION_MIN_LEN {
            return Err(ApduError::InvalidLength);
        }

        let (target_id, index) = match buff.len() >= VERSION_TARGET_LEN {
            true => (BigEndian::read_u32(&buff[5..9]), VERSION_TARGET_LEN),
            false => (0, VERSION_MIN_LEN),
        };

        Ok((
            Self {
                test_mode: buff[0] != 0,
                major: buff[1],
                minor: buff[2],
                patch: buff[3],
                device_locked: buff[4] == 1,
                target_id,
            },
            index,
        ))
    }
}
