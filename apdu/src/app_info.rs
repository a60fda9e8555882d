// Copyright (c) 2023-2024 The Algorand Foundation

//! Bolos app-info response decoding
//!
//! Served under class [`crate::APP_INFO_CLA`] by whichever app is open.

use encdec::Decode;

use crate::ApduError;

/// The only specified app-info format id
pub const APP_INFO_FORMAT: u8 = 1;

bitflags::bitflags! {
    /// App flags reported in the app-info response
    pub struct AppFlags: u8 {
        /// Device is in recovery mode
        const RECOVERY = 1 << 0;

        /// MCU code is signed
        const SIGNED_MCU_CODE = 1 << 1;

        /// Device has completed onboarding
        const ONBOARDED = 1 << 2;

        /// PIN has been validated this session
        const PIN_VALIDATED = 1 << 7;
    }
}

/// App-info response payload
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    FORMAT     |   NAME_LEN    |            NAME...            /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  VERSION_LEN  |          VERSION...                           /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   FLAGS_LEN   |     FLAGS     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AppInfoResp<'a> {
    /// Format id, must equal [`APP_INFO_FORMAT`]
    pub format: u8,
    /// Name of the open app
    pub name: &'a str,
    /// Version of the open app
    pub version: &'a str,
    /// Declared flags length
    pub flags_len: u8,
    /// Decoded flag byte
    pub flags: AppFlags,
}

impl<'a> Decode<'a> for AppInfoResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let mut index = 0;

        if buff.is_empty() {
            return Err(ApduError::InvalidLength);
        }

        // Format ids other than 1 are unspecified
        let format = buff[0];
        if format != APP_INFO_FORMAT {
            return Err(ApduError::InvalidEncoding);
        }
        index += 1;

        let name = take_str(buff, &mut index)?;
        let version = take_str(buff, &mut index)?;

        if buff.len() < index + 2 {
            return Err(ApduError::InvalidLength);
        }
        let flags_len = buff[index];
        let flags = AppFlags::from_bits_truncate(buff[index + 1]);
        index += 2;

        Ok((
            Self {
                format,
                name,
                version,
                flags_len,
                flags,
            },
            index,
        ))
    }
}

/// Read a 1-byte length-prefixed ASCII field, advancing the cursor.
/// Never reads past the declared length.
fn take_str<'a>(buff: &'a [u8], index: &mut usize) -> Result<&'a str, ApduError> {
    if buff.len() < *index + 1 {
        return Err(ApduError::InvalidLength);
    }

    let len = buff[*index] as usize;
    *index += 1;

    if buff.len() < *index + len {
        return Err(ApduError::InvalidLength);
    }

    let s = core::str::from_utf8(&buff[*index..][..len]).map_err(|_| ApduError::InvalidUtf8)?;
    *index += len;

    Ok(s)
}
