// Copyright (c) 2023-2024 The Algorand Foundation

//! BIP44 derivation path parsing and binary encoding
//!
//! Paths are always five components deep (`m/44'/283'/0'/0/0`). The device
//! reconstructs the path from the serialized form, so the 20-byte
//! little-endian layout must be bit-exact.

use core::fmt;
use core::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};

/// Hardening bit for path components
pub const HARDENED: u32 = 0x8000_0000;

/// Number of components in a BIP44 path
pub const PATH_DEPTH: usize = 5;

/// Serialized path length, four bytes per component
pub const SERIALIZED_PATH_LEN: usize = PATH_DEPTH * 4;

/// Path parse / validation errors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// Path string must begin with the `m` root marker
    MissingRoot,
    /// Path must contain exactly [`PATH_DEPTH`] components
    Depth(usize),
    /// A component is not a decimal number
    NotANumber,
    /// A component's unhardened value reaches into the hardened range
    HardenedRange(u32),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::MissingRoot => write!(f, "path must start with \"m\""),
            PathError::Depth(n) => write!(f, "expected {PATH_DEPTH} path components, found {n}"),
            PathError::NotANumber => write!(f, "path component is not a number"),
            PathError::HardenedRange(v) => {
                write!(f, "child value {v:#010x} is in the hardened range")
            }
        }
    }
}

/// A validated five-component BIP44 derivation path
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DerivationPath([u32; PATH_DEPTH]);

impl DerivationPath {
    /// Build a path from raw component values.
    ///
    /// The first three components are hardened automatically, so values
    /// already carrying the hardening bit there are rejected (applying the
    /// bit twice would alias another index). The last two components pass
    /// through unmodified.
    pub fn from_components(components: [u32; PATH_DEPTH]) -> Result<Self, PathError> {
        for v in components.iter().take(3) {
            if *v >= HARDENED {
                return Err(PathError::HardenedRange(*v));
            }
        }

        let mut out = components;
        for v in out.iter_mut().take(3) {
            *v |= HARDENED;
        }

        Ok(Self(out))
    }

    /// Fetch the (hardened) component values
    pub fn components(&self) -> &[u32; PATH_DEPTH] {
        &self.0
    }

    /// Serialize to the fixed 20-byte little-endian device encoding
    pub fn serialize(&self) -> [u8; SERIALIZED_PATH_LEN] {
        let mut buff = [0u8; SERIALIZED_PATH_LEN];
        for (i, c) in self.0.iter().enumerate() {
            LittleEndian::write_u32(&mut buff[i * 4..][..4], *c);
        }
        buff
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    /// Parse a slash-delimited path string, e.g. `m/44'/283'/0'/0/0`.
    ///
    /// Hardening is explicit via the `'` suffix; any component whose
    /// unhardened value is `>= 0x80000000` is rejected.
    fn from_str(s: &str) -> Result<Self, PathError> {
        let mut parts = s.split('/');

        if parts.next() != Some("m") {
            return Err(PathError::MissingRoot);
        }

        let mut components = [0u32; PATH_DEPTH];
        let mut n = 0;

        for part in parts {
            if n >= PATH_DEPTH {
                return Err(PathError::Depth(n + 1));
            }

            let (value, hardened) = match part.strip_suffix('\'') {
                Some(v) => (v, true),
                None => (part, false),
            };

            let value: u32 = value.parse().map_err(|_| PathError::NotANumber)?;
            if value >= HARDENED {
                return Err(PathError::HardenedRange(value));
            }

            components[n] = if hardened { value | HARDENED } else { value };
            n += 1;
        }

        if n != PATH_DEPTH {
            return Err(PathError::Depth(n));
        }

        Ok(Self(components))
    }
}
