// Copyright (c) 2023-2024 The Algorand Foundation

//! Prelude to simplify downstream use of APDU objects
//!

pub use crate::{
    address::{account_payload, AddressResp, PK_LEN},
    app_info::{AppFlags, AppInfoResp, APP_INFO_FORMAT},
    chunks::{chunk_params, prepare_chunks, CHUNK_SIZE},
    command::{ApduAnswer, ApduCommand, MAX_APDU_PAYLOAD},
    device_info::DeviceInfoResp,
    path::{DerivationPath, PathError, HARDENED, SERIALIZED_PATH_LEN},
    status::{describe, StatusCode, SW_UNKNOWN},
    version::VersionResp,
    ApduError, Instruction, ALGO_APDU_CLA, APP_INFO_CLA, DEVICE_INFO_CLA, INFO_INS,
};
