// Copyright (c) 2023-2024 The Algorand Foundation

//! Handle for a connected Algorand device
//!
//! This provides the application-level operations and the sequential
//! chunk-exchange state machine used for signing, generic over
//! [`Exchange`] transports.

use std::sync::Arc;

use encdec::{Decode, DecodeOwned};
use log::debug;
use tokio::sync::Mutex;

use ledger_algorand_apdu::{
    address::{account_payload, AddressResp},
    app_info::{AppFlags, AppInfoResp, APP_INFO_FORMAT},
    chunks::{chunk_params, prepare_chunks},
    command::{ApduAnswer, ApduCommand},
    device_info::DeviceInfoResp,
    p1, p2,
    path::DerivationPath,
    status::StatusCode,
    version::VersionResp,
    Instruction, ALGO_APDU_CLA, APP_INFO_CLA, DEVICE_INFO_CLA, INFO_INS,
};

use crate::{transport::Exchange, Error};

/// App version and device lock state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    pub test_mode: bool,
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub device_locked: bool,
    pub target_id: u32,
}

/// Public key and encoded address for an account index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub public_key: [u8; 32],
    pub address: String,
}

/// Info for the currently open app
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub flags: AppFlags,
}

/// Dashboard device information
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub target_id: String,
    pub se_version: String,
    pub flag: String,
    pub mcu_version: String,
}

/// Algorand handle for a connected device.
///
/// Generic over [`Exchange`] to support different underlying transports.
/// The transport is injected once and owned behind a mutex: one command is
/// in flight at any time, and cloned handles share the same serialized
/// channel. Two handles over distinct transports to the same device would
/// corrupt its in-flight signing state.
pub struct AlgorandApp<T: Exchange> {
    t: Arc<Mutex<T>>,
}

/// Create an [`AlgorandApp`] wrapper from a transport
impl<T: Exchange> From<T> for AlgorandApp<T> {
    fn from(t: T) -> Self {
        Self {
            t: Arc::new(Mutex::new(t)),
        }
    }
}

impl<T: Exchange> Clone for AlgorandApp<T> {
    fn clone(&self) -> Self {
        Self { t: self.t.clone() }
    }
}

impl<T: Exchange> AlgorandApp<T> {
    /// Create a new handle over the provided transport
    pub fn new(t: T) -> Self {
        Self::from(t)
    }

    /// Issue a single command and await the raw response
    async fn send(&self, command: ApduCommand) -> Result<Vec<u8>, Error> {
        self.t.lock().await.exchange(&command).await
    }

    /// Issue a command and split the response, requiring a success status
    async fn request(&self, command: ApduCommand) -> Result<Vec<u8>, Error> {
        let raw = self.send(command).await?;

        let answer = ApduAnswer::from_bytes(&raw)?;
        if answer.status != StatusCode::NoError as u16 {
            return Err(Error::device(answer.status));
        }

        Ok(answer.data.to_vec())
    }

    /// Fetch app version and device lock state
    pub async fn version(&self) -> Result<Version, Error> {
        debug!("requesting app version");

        let data = self
            .request(ApduCommand::new(
                ALGO_APDU_CLA,
                Instruction::GetVersion as u8,
                p1::ONLY_RETRIEVE,
                p2::DEFAULT,
                vec![],
            ))
            .await?;

        let (v, _) = VersionResp::decode_owned(&data)?;

        Ok(Version {
            test_mode: v.test_mode,
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            device_locked: v.device_locked,
            target_id: v.target_id,
        })
    }

    /// Fetch the public key and address for an account index.
    ///
    /// With `require_confirmation` the device displays the address and
    /// waits for user approval before answering.
    pub async fn address(
        &self,
        account_id: u32,
        require_confirmation: bool,
    ) -> Result<Address, Error> {
        debug!(
            "requesting address for account {} (confirm: {})",
            account_id, require_confirmation
        );

        let p1 = match require_confirmation {
            true => p1::SHOW_ADDRESS,
            false => p1::ONLY_RETRIEVE,
        };

        let data = self
            .request(ApduCommand::new(
                ALGO_APDU_CLA,
                Instruction::GetPublicKey as u8,
                p1,
                p2::DEFAULT,
                account_payload(account_id).to_vec(),
            ))
            .await?;

        let (resp, _) = AddressResp::decode(&data)?;

        let mut public_key = [0u8; 32];
        public_key.copy_from_slice(resp.public_key);

        Ok(Address {
            public_key,
            address: resp.address.to_string(),
        })
    }

    /// Fetch info for the currently open app
    pub async fn app_info(&self) -> Result<AppInfo, Error> {
        debug!("requesting app info");

        let data = self
            .request(ApduCommand::new(
                APP_INFO_CLA,
                INFO_INS,
                p1::ONLY_RETRIEVE,
                p2::DEFAULT,
                vec![],
            ))
            .await?;

        // The device may answer future formats this client does not
        // understand; report those as a busy device, not a decode panic
        if data.first() != Some(&APP_INFO_FORMAT) {
            return Err(Error::Device {
                status: StatusCode::DeviceBusy as u16,
                message: "response format ID not recognized".to_string(),
            });
        }

        let (resp, _) = AppInfoResp::decode(&data)?;

        Ok(AppInfo {
            name: resp.name.to_string(),
            version: resp.version.to_string(),
            flags: resp.flags,
        })
    }

    /// Fetch dashboard device information.
    ///
    /// Only available while no app is open; the device answers `0x6e00`
    /// otherwise.
    pub async fn device_info(&self) -> Result<DeviceInfo, Error> {
        debug!("requesting device info");

        let raw = self
            .send(ApduCommand::new(
                DEVICE_INFO_CLA,
                INFO_INS,
                p1::ONLY_RETRIEVE,
                p2::DEFAULT,
                vec![],
            ))
            .await?;

        let answer = ApduAnswer::from_bytes(&raw)?;
        if answer.status == StatusCode::AppNotOpen as u16 {
            return Err(Error::Device {
                status: answer.status,
                message: "This command is only available in the Dashboard".to_string(),
            });
        }
        if answer.status != StatusCode::NoError as u16 {
            return Err(Error::device(answer.status));
        }

        let (resp, _) = DeviceInfoResp::decode(answer.data)?;

        Ok(DeviceInfo {
            target_id: hex::encode(resp.target_id),
            se_version: resp.se_version.to_string(),
            flag: hex::encode(resp.flag),
            mcu_version: resp.mcu_version.to_string(),
        })
    }

    /// Sign a msgpack-encoded transaction, returning the signature bytes.
    ///
    /// The payload is streamed in bounded chunks; a non-zero `account_id`
    /// is carried as a big-endian prefix on the first chunk and selects the
    /// signing account on-device.
    pub async fn sign_msgpack(&self, account_id: u32, message: &[u8]) -> Result<Vec<u8>, Error> {
        debug!(
            "signing {} byte msgpack payload for account {}",
            message.len(),
            account_id
        );

        self.sign_chunks(
            Instruction::SignMsgpack,
            account_id,
            prepare_chunks(account_id, message),
        )
        .await
    }

    /// Sign an arbitrary authentication payload under the given derivation
    /// path, returning the signature bytes.
    ///
    /// The serialized path prefixes the data on the wire; path validation
    /// happens at [`DerivationPath`] construction, before any transport
    /// interaction.
    pub async fn sign_arbitrary_data(
        &self,
        path: &DerivationPath,
        data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        debug!("signing {} byte arbitrary payload", data.len());

        let mut payload = Vec::with_capacity(data.len() + 20);
        payload.extend_from_slice(&path.serialize());
        payload.extend_from_slice(data);

        self.sign_chunks(Instruction::SignArbitraryData, 0, prepare_chunks(0, &payload))
            .await
    }

    /// Drive the sequential chunk exchange for a signing instruction.
    ///
    /// Chunks are sent strictly in order, each only after the previous
    /// round trip decoded as success; the device accumulates signing state
    /// across chunks, so there is no pipelining and no per-chunk retry. Any
    /// non-success status halts the exchange and becomes the final result.
    /// Only the final chunk's success response carries the signature.
    async fn sign_chunks(
        &self,
        ins: Instruction,
        account_id: u32,
        chunks: Vec<Vec<u8>>,
    ) -> Result<Vec<u8>, Error> {
        let count = chunks.len();
        let mut signature = Vec::new();

        for (i, chunk) in chunks.into_iter().enumerate() {
            let index = i + 1;
            let (p1, p2) = chunk_params(index, count, account_id);

            debug!(
                "sending chunk {}/{} ({} bytes, p1 {:#04x}, p2 {:#04x})",
                index,
                count,
                chunk.len(),
                p1,
                p2
            );

            let raw = self
                .send(ApduCommand::new(ALGO_APDU_CLA, ins as u8, p1, p2, chunk))
                .await?;

            let answer = ApduAnswer::from_bytes(&raw)?;
            if answer.status != StatusCode::NoError as u16 {
                // Partial payload bytes are diagnostics only, never signature
                return Err(Error::device_with_diagnostic(answer.status, answer.data));
            }

            if index == count {
                signature = answer.data.to_vec();
            }
        }

        if signature.is_empty() {
            return Err(Error::EmptySignature);
        }

        Ok(signature)
    }
}
