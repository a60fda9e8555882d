// Copyright (c) 2023-2024 The Algorand Foundation

//! Payload chunking for multi-frame signing commands
//!
//! Signing payloads larger than a single frame are streamed as an ordered,
//! 1-indexed chunk sequence. A non-zero account id is prepended to the
//! logical payload as 4 big-endian bytes before splitting, and signalled to
//! the device via a distinct P1 value on the first chunk.

use alloc::{vec, vec::Vec};

use byteorder::{BigEndian, ByteOrder};

use crate::{p1, p2};

/// Maximum logical payload per chunk
pub const CHUNK_SIZE: usize = 250;

/// Split a signing payload into ordered transmission chunks.
///
/// A non-zero `account_id` is prepended big-endian before splitting, so the
/// id shifts the chunk boundaries of the message itself. An empty payload
/// still produces one empty chunk, since the device expects at least one
/// first+last frame per signing operation.
pub fn prepare_chunks(account_id: u32, message: &[u8]) -> Vec<Vec<u8>> {
    let mut buffer = Vec::with_capacity(message.len() + 4);

    if account_id != 0 {
        let mut id = [0u8; 4];
        BigEndian::write_u32(&mut id, account_id);
        buffer.extend_from_slice(&id);
    }
    buffer.extend_from_slice(message);

    if buffer.is_empty() {
        return vec![Vec::new()];
    }

    buffer.chunks(CHUNK_SIZE).map(|c| c.to_vec()).collect()
}

/// Compute the (P1, P2) pair for a chunk at 1-indexed `index` of `count`.
///
/// The first chunk signals whether an account id prefix is present; the
/// final chunk carries the last marker in P2. A single chunk is first and
/// last at once.
pub fn chunk_params(index: usize, count: usize, account_id: u32) -> (u8, u8) {
    let mut p1 = p1::MSGPACK_ADD;
    let mut p2 = p2::MSGPACK_ADD;

    if index == 1 {
        p1 = match account_id {
            0 => p1::MSGPACK_FIRST,
            _ => p1::MSGPACK_FIRST_ACCOUNT_ID,
        };
    }
    if index == count {
        p2 = p2::MSGPACK_LAST;
    }

    (p1, p2)
}
