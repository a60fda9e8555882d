// Copyright (c) 2023-2024 The Algorand Foundation

//! Bolos device-info response decoding
//!
//! Served under class [`crate::DEVICE_INFO_CLA`]; the device answers status
//! `0x6e00` unless the dashboard is open.

use encdec::Decode;

use crate::ApduError;

/// Device-info response payload
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           TARGET_ID                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   SE_VER_LEN  |          SE_VERSION...                        /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |   FLAGS_LEN   |          FLAGS...                             /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  MCU_VER_LEN  |          MCU_VERSION... (NUL terminated)      /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DeviceInfoResp<'a> {
    /// Raw 4-byte hardware target id
    pub target_id: &'a [u8],
    /// Secure element version string
    pub se_version: &'a str,
    /// Raw device flag bytes
    pub flag: &'a [u8],
    /// MCU version string, trailing NUL stripped
    pub mcu_version: &'a str,
}

impl<'a> Decode<'a> for DeviceInfoResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let mut index = 0;

        if buff.len() < 4 {
            return Err(ApduError::InvalidLength);
        }
        let target_id = &buff[..4];
        index += 4;

        let se_version = core::str::from_utf8(take(buff, &mut index)?)
            .map_err(|_| ApduError::InvalidUtf8)?;

        let flag = take(buff, &mut index)?;

        // Some MCU firmware reports a NUL terminated version string
        let mut mcu = take(buff, &mut index)?;
        if let [head @ .., 0] = mcu {
            mcu = head;
        }
        let mcu_version = core::str::from_utf8(mcu).map_err(|_| ApduError::InvalidUtf8)?;

        Ok((
            Self {
                target_id,
                se_version,
                flag,
                mcu_version,
            },
            index,
        ))
    }
}

/// Read a 1-byte length-prefixed field, advancing the cursor
fn take<'a>(buff: &'a [u8], index: &mut usize) -> Result<&'a [u8], ApduError> {
    if buff.len() < *index + 1 {
        return Err(ApduError::InvalidLength);
    }

    let len = buff[*index] as usize;
    *index += 1;

    if buff.len() < *index + len {
        return Err(ApduError::InvalidLength);
    }

    let field = &buff[*index..][..len];
    *index += len;

    Ok(field)
}
