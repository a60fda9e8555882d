// Copyright (c) 2023-2024 The Algorand Foundation

//! Version, app-info and device-info exchange tests

use ledger_algorand::{
    apdu::{
        command::ApduCommand, p1, p2, Instruction, ALGO_APDU_CLA, APP_INFO_CLA, DEVICE_INFO_CLA,
        INFO_INS,
    },
    AlgorandApp, AppInfo, Error, Version,
};

mod helpers;
use helpers::{init_logs, resp, MockTransport};

fn version_cmd() -> ApduCommand {
    ApduCommand::new(
        ALGO_APDU_CLA,
        Instruction::GetVersion as u8,
        p1::ONLY_RETRIEVE,
        p2::DEFAULT,
        vec![],
    )
}

fn app_info_cmd() -> ApduCommand {
    ApduCommand::new(APP_INFO_CLA, INFO_INS, p1::ONLY_RETRIEVE, p2::DEFAULT, vec![])
}

fn device_info_cmd() -> ApduCommand {
    ApduCommand::new(
        DEVICE_INFO_CLA,
        INFO_INS,
        p1::ONLY_RETRIEVE,
        p2::DEFAULT,
        vec![],
    )
}

#[tokio::test]
async fn get_version() -> anyhow::Result<()> {
    init_logs();

    let t = MockTransport::new([(
        version_cmd(),
        resp(&[0x00, 2, 14, 3, 0x00, 0x31, 0x10, 0x00, 0x04], 0x9000),
    )]);
    let app = AlgorandApp::new(t);

    let v = app.version().await?;
    assert_eq!(
        v,
        Version {
            test_mode: false,
            major: 2,
            minor: 14,
            patch: 3,
            device_locked: false,
            target_id: 0x31100004,
        }
    );

    Ok(())
}

#[tokio::test]
async fn get_version_without_target_id() -> anyhow::Result<()> {
    init_logs();

    let t = MockTransport::new([(version_cmd(), resp(&[0x01, 1, 0, 9, 0x01], 0x9000))]);
    let app = AlgorandApp::new(t);

    let v = app.version().await?;
    assert!(v.test_mode);
    assert!(v.device_locked);
    assert_eq!(v.target_id, 0);

    Ok(())
}

#[tokio::test]
async fn get_version_device_error() {
    init_logs();

    let t = MockTransport::new([(version_cmd(), resp(&[], 0x6e01))]);
    let app = AlgorandApp::new(t);

    let err = app.version().await.unwrap_err();
    assert_eq!(err.status_word(), 0x6e01);
    assert_eq!(err.to_string(), "Unknown Status Code: 0x6E01");
}

#[tokio::test]
async fn get_app_info() -> anyhow::Result<()> {
    init_logs();

    let mut payload = vec![1u8];
    payload.push(8);
    payload.extend_from_slice(b"Algorand");
    payload.push(5);
    payload.extend_from_slice(b"2.1.9");
    payload.extend_from_slice(&[1, 0x85]);

    let t = MockTransport::new([(app_info_cmd(), resp(&payload, 0x9000))]);
    let app = AlgorandApp::new(t);

    let info = app.app_info().await?;
    assert_eq!(
        info,
        AppInfo {
            name: "Algorand".to_string(),
            version: "2.1.9".to_string(),
            flags: ledger_algorand::apdu::app_info::AppFlags::RECOVERY
                | ledger_algorand::apdu::app_info::AppFlags::ONBOARDED
                | ledger_algorand::apdu::app_info::AppFlags::PIN_VALIDATED,
        }
    );

    Ok(())
}

#[tokio::test]
async fn get_app_info_unknown_format_degrades() {
    init_logs();

    // Format id 2 is unspecified; must degrade, not panic
    let t = MockTransport::new([(app_info_cmd(), resp(&[2, 0, 0, 1, 0], 0x9000))]);
    let app = AlgorandApp::new(t);

    let err = app.app_info().await.unwrap_err();
    match err {
        Error::Device { status, message } => {
            assert_eq!(status, 0x9001);
            assert_eq!(message, "response format ID not recognized");
        }
        _ => panic!("expected degraded device error, got {err:?}"),
    }
}

#[tokio::test]
async fn get_device_info() -> anyhow::Result<()> {
    init_logs();

    let mut payload = vec![0x33, 0x00, 0x00, 0x04];
    payload.push(5);
    payload.extend_from_slice(b"1.3.0");
    payload.push(2);
    payload.extend_from_slice(&[0xee, 0x00]);
    payload.push(5);
    payload.extend_from_slice(b"2.30\0");

    let t = MockTransport::new([(device_info_cmd(), resp(&payload, 0x9000))]);
    let app = AlgorandApp::new(t);

    let info = app.device_info().await?;
    assert_eq!(info.target_id, "33000004");
    assert_eq!(info.se_version, "1.3.0");
    assert_eq!(info.flag, "ee00");
    assert_eq!(info.mcu_version, "2.30");

    Ok(())
}

#[tokio::test]
async fn get_device_info_outside_dashboard() {
    init_logs();

    let t = MockTransport::new([(device_info_cmd(), resp(&[], 0x6e00))]);
    let app = AlgorandApp::new(t);

    let err = app.device_info().await.unwrap_err();
    assert_eq!(err.status_word(), 0x6e00);
    assert_eq!(
        err.to_string(),
        "This command is only available in the Dashboard"
    );
}
