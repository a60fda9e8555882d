// Copyright (c) 2023-2024 The Algorand Foundation

use ledger_algorand_apdu::{
    path::PathError,
    status::{describe, StatusCode, SW_UNKNOWN},
    ApduError,
};

/// Algorand Ledger API error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid derivation path, rejected before any transport interaction
    #[error("invalid derivation path: {0}")]
    Path(PathError),

    /// Malformed frame or response payload
    #[error("APDU error: {0}")]
    Apdu(ApduError),

    /// Non-success status word reported by the device
    #[error("{message}")]
    Device { status: u16, message: String },

    /// Underlying channel failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Signing completed without a signature payload
    #[error("signing response carried no signature")]
    EmptySignature,
}

impl Error {
    /// Build a device error with the registry description for `status`
    pub fn device(status: u16) -> Self {
        Self::Device {
            status,
            message: describe(status),
        }
    }

    /// Build a device error, appending the payload-derived diagnostic text
    /// the app attaches to data-invalid, bad-key-handle and sign/verify
    /// failures. Other status words carry no such annotation.
    pub(crate) fn device_with_diagnostic(status: u16, payload: &[u8]) -> Self {
        let mut message = describe(status);

        let annotated = matches!(
            StatusCode::try_from(status),
            Ok(StatusCode::DataInvalid | StatusCode::BadKeyHandle | StatusCode::SignVerifyError)
        );
        if annotated && !payload.is_empty() {
            message = format!("{} : {}", message, String::from_utf8_lossy(payload));
        }

        Self::Device { status, message }
    }

    /// Uniform status word for any failure.
    ///
    /// Device-reported errors return their status; transport and local
    /// failures normalize to the [`SW_UNKNOWN`] sentinel, so every error
    /// exposes the same `{status, message}` shape.
    pub fn status_word(&self) -> u16 {
        match self {
            Error::Device { status, .. } => *status,
            _ => SW_UNKNOWN,
        }
    }
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<ApduError> for Error {
    fn from(e: ApduError) -> Self {
        Self::Apdu(e)
    }
}
