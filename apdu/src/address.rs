// Copyright (c) 2023-2024 The Algorand Foundation

//! Address / public key request payloads and response decoding

use byteorder::{BigEndian, ByteOrder};
use encdec::Decode;

use crate::ApduError;

/// ed25519 public key length in address responses
pub const PK_LEN: usize = 32;

/// Encode the 4-byte big-endian account index payload used by the
/// address / public key commands
pub fn account_payload(account_id: u32) -> [u8; 4] {
    let mut buff = [0u8; 4];
    BigEndian::write_u32(&mut buff, account_id);
    buff
}

/// Address response payload: raw public key followed by the base32
/// encoded address as ASCII text
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AddressResp<'a> {
    /// Raw ed25519 public key
    pub public_key: &'a [u8],
    /// Algorand address text
    pub address: &'a str,
}

impl<'a> Decode<'a> for AddressResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < PK_LEN {
            return Err(ApduError::InvalidLength);
        }

        let public_key = &buff[..PK_LEN];
        let address =
            core::str::from_utf8(&buff[PK_LEN..]).map_err(|_| ApduError::InvalidUtf8)?;

        Ok((
            Self {
                public_key,
                address,
            },
            buff.len(),
        ))
    }
}
