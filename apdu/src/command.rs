// Copyright (c) 2023-2024 The Algorand Foundation

//! Request frames and raw response splitting

use alloc::vec::Vec;

use crate::ApduError;

/// Maximum payload for a single APDU frame (1-byte length field)
pub const MAX_APDU_PAYLOAD: usize = 255;

/// A single request frame
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      CLA      |      INS      |      P1       |      P2       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    DATA_LEN   |                    DATA...                    /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApduCommand {
    /// Command class
    pub cla: u8,
    /// Instruction
    pub ins: u8,
    /// First parameter byte
    pub p1: u8,
    /// Second parameter byte
    pub p2: u8,
    /// Command payload, bounded by [`MAX_APDU_PAYLOAD`]
    pub data: Vec<u8>,
}

impl ApduCommand {
    /// Create a new command frame
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: Vec<u8>) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data,
        }
    }

    /// Serialize the frame for wire transmission
    pub fn serialize(&self) -> Result<Vec<u8>, ApduError> {
        if self.data.len() > MAX_APDU_PAYLOAD {
            return Err(ApduError::InvalidLength);
        }

        let mut buff = Vec::with_capacity(5 + self.data.len());
        buff.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2, self.data.len() as u8]);
        buff.extend_from_slice(&self.data);

        Ok(buff)
    }
}

/// A raw response split into payload and trailing status word
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApduAnswer<'a> {
    /// Command-specific payload, everything before the status word
    pub data: &'a [u8],
    /// Big-endian status word from the final two bytes
    pub status: u16,
}

impl<'a> ApduAnswer<'a> {
    /// Split a raw response buffer.
    ///
    /// Responses shorter than the 2-byte status word are rejected here so
    /// per-command decoders never index out of bounds.
    pub fn from_bytes(buff: &'a [u8]) -> Result<Self, ApduError> {
        if buff.len() < 2 {
            return Err(ApduError::InvalidLength);
        }

        let (data, sw) = buff.split_at(buff.len() - 2);

        Ok(Self {
            data,
            status: u16::from_be_bytes([sw[0], sw[1]]),
        })
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::*;

    #[test]
    fn serialize_frame() {
        let cmd = ApduCommand::new(0x80, 0x08, 0x01, 0x80, vec![0xaa, 0xbb, 0xcc]);

        let buff = cmd.serialize().expect("serialize failed");
        assert_eq!(buff, vec![0x80, 0x08, 0x01, 0x80, 0x03, 0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn serialize_empty_payload() {
        let cmd = ApduCommand::new(0x80, 0x00, 0x00, 0x00, vec![]);
        assert_eq!(cmd.serialize().unwrap(), vec![0x80, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn serialize_oversize_payload() {
        let cmd = ApduCommand::new(0x80, 0x08, 0x00, 0x00, vec![0u8; MAX_APDU_PAYLOAD + 1]);
        assert_eq!(cmd.serialize(), Err(ApduError::InvalidLength));
    }

    #[test]
    fn split_answer() {
        let raw = [0x01, 0x02, 0x03, 0x90, 0x00];

        let answer = ApduAnswer::from_bytes(&raw).expect("split failed");
        assert_eq!(answer.data, &[0x01, 0x02, 0x03]);
        assert_eq!(answer.status, 0x9000);
    }

    #[test]
    fn split_status_only_answer() {
        let answer = ApduAnswer::from_bytes(&[0x69, 0x85]).unwrap();
        assert_eq!(answer.data, &[] as &[u8]);
        assert_eq!(answer.status, 0x6985);
    }

    #[test]
    fn reject_underflow() {
        assert_eq!(ApduAnswer::from_bytes(&[0x90]), Err(ApduError::InvalidLength));
        assert_eq!(ApduAnswer::from_bytes(&[]), Err(ApduError::InvalidLength));
    }
}
