// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use santricity::availability::Availability;
use santricity::availability::AvailabilitySettings;
use santricity::controller_firmware::ControllerFirmware;
use santricity::controller_firmware::UpgradeSettings;
use santricity::Controller;
use santricity::StorageSystemId;
use santricity_array_mock::ExpectedRequest;
use santricity_tests::firmware_file;
use santricity_tests::fixtures::firmware_upload;
use santricity_tests::fixtures::health_check_done;
use santricity_tests::fixtures::health_check_running;
use santricity_tests::fixtures::start_health_check;
use santricity_tests::fixtures::storage_system;
use santricity_tests::fixtures::storage_system_unreachable;
use santricity_tests::Array;
use santricity_tests::Error;
use santricity_tests::Expect;
use santricity_tests::TestError;
use santricity_tests::EMBEDDED_FIRMWARE;
use std::iter::repeat_with;
use std::path::Path;
use std::sync::Arc;
use tokio::test;

struct Arrays {
    a: Arc<Array>,
    b: Arc<Array>,
}

impl Arrays {
    fn new() -> Self {
        Self {
            a: Arc::new(Array::default()),
            b: Arc::new(Array::default()),
        }
    }

    fn firmware(&self, settings: UpgradeSettings) -> ControllerFirmware<Array> {
        ControllerFirmware::new(
            vec![
                Controller::new("controller-a", self.a.clone()),
                Controller::new("controller-b", self.b.clone()),
            ],
            StorageSystemId::default(),
            settings,
        )
        .unwrap()
    }

    fn uploads(&self) -> usize {
        self.a
            .requests()
            .iter()
            .filter(|r| matches!(r, ExpectedRequest::Upload { .. }))
            .count()
    }
}

#[test(start_paused = true)]
async fn upgrade_completes_when_controllers_return() -> Result<(), Error> {
    let arrays = Arrays::new();
    let file = firmware_file("RCB_11.80.0R1_280x_5e1e6e1d.dlp");
    arrays.a.expect_all([
        start_health_check(),
        health_check_running(),
        health_check_done(&[true]),
        firmware_upload("RCB_11.80.0R1_280x_5e1e6e1d.dlp"),
        storage_system_unreachable(),
        storage_system("11.80.0R1"),
    ]);
    arrays.b.expect_all([
        storage_system_unreachable(),
        storage_system_unreachable(),
        storage_system("11.80.0R1"),
    ]);

    let report = arrays
        .firmware(UpgradeSettings::default())
        .upgrade(&file)
        .await?;

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].controller, "controller-a");
    assert_eq!(
        report[1].availability,
        Availability::Online {
            attempts: 3,
            firmware_version: Some("11.80.0R1".into())
        }
    );
    assert_eq!(arrays.a.pending() + arrays.b.pending(), 0);
    Ok(())
}

#[test(start_paused = true)]
async fn failed_health_check_aborts_before_upload() {
    let arrays = Arrays::new();
    arrays
        .a
        .expect_all([start_health_check(), health_check_done(&[false])]);

    let result = arrays
        .firmware(UpgradeSettings::default())
        .upgrade(&firmware_file("RCB_aborted.dlp"))
        .await;

    assert!(matches!(result, Err(santricity::Error::HealthCheckFailed)));
    assert_eq!(arrays.uploads(), 0);
    assert!(arrays.b.requests().is_empty());
}

#[test(start_paused = true)]
async fn ignored_health_check_failure_proceeds() -> Result<(), Error> {
    let arrays = Arrays::new();
    arrays.a.expect_all([
        start_health_check(),
        health_check_done(&[false]),
        firmware_upload("RCB_forced.dlp"),
        storage_system("11.80"),
    ]);
    arrays.b.expect(storage_system("11.80"));

    let settings = UpgradeSettings {
        ignore_health_check: true,
        ..UpgradeSettings::default()
    };
    arrays
        .firmware(settings)
        .upgrade(&firmware_file("RCB_forced.dlp"))
        .await?;
    assert_eq!(arrays.uploads(), 1);
    Ok(())
}

#[test(start_paused = true)]
async fn rejected_upload_aborts_without_retry() {
    let arrays = Arrays::new();
    arrays.a.expect_all([
        start_health_check(),
        health_check_done(&[true]),
        Expect::upload_error(
            EMBEDDED_FIRMWARE,
            "dlpfile",
            "RCB_rejected.dlp",
            TestError::Status(422),
        ),
    ]);

    let result = arrays
        .firmware(UpgradeSettings::default())
        .upgrade(&firmware_file("RCB_rejected.dlp"))
        .await;

    assert!(matches!(result, Err(santricity::Error::Array(_))));
    assert_eq!(arrays.uploads(), 1);
    assert!(arrays.b.requests().is_empty());
}

#[test(start_paused = true)]
async fn controller_that_never_returns_fails_upgrade() {
    let arrays = Arrays::new();
    let settings = UpgradeSettings {
        availability: AvailabilitySettings {
            max_retries: 4,
            ..AvailabilitySettings::default()
        },
        ..UpgradeSettings::default()
    };
    arrays.a.expect_all([
        start_health_check(),
        health_check_done(&[true]),
        firmware_upload("RCB_offline.dlp"),
        storage_system("11.80"),
    ]);
    arrays
        .b
        .expect_all(repeat_with(storage_system_unreachable).take(4));

    let result = arrays
        .firmware(settings)
        .upgrade(&firmware_file("RCB_offline.dlp"))
        .await;

    assert!(matches!(
        result,
        Err(santricity::Error::ControllerUnavailable(name)) if name == "controller-b"
    ));
    assert_eq!(arrays.b.pending(), 0);
}

#[test(start_paused = true)]
async fn missing_firmware_file_is_not_uploaded() {
    let arrays = Arrays::new();
    arrays
        .a
        .expect_all([start_health_check(), health_check_done(&[true])]);

    let result = arrays
        .firmware(UpgradeSettings::default())
        .upgrade(Path::new("/nonexistent/RCB_missing.dlp"))
        .await;

    assert!(matches!(result, Err(santricity::Error::Io(..))));
    assert_eq!(arrays.uploads(), 0);
}

#[test]
async fn controllers_are_required() {
    let result = ControllerFirmware::<Array>::new(
        Vec::new(),
        StorageSystemId::default(),
        UpgradeSettings::default(),
    );
    assert!(matches!(result, Err(santricity::Error::NoControllers)));
}
