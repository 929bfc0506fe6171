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

use santricity::health_check::HealthCheck;
use santricity::health_check::HealthCheckSettings;
use santricity::StorageSystemId;
use santricity_tests::fixtures::health_check_done;
use santricity_tests::fixtures::health_check_running;
use santricity_tests::fixtures::start_health_check;
use santricity_tests::Array;
use santricity_tests::Error;
use santricity_tests::Expect;
use santricity_tests::TestError;
use santricity_tests::HEALTH_CHECK;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::test;
use tokio::time::Instant;

fn health_check(array: &Arc<Array>) -> HealthCheck<Array> {
    HealthCheck::new(array.clone(), HealthCheckSettings::default())
}

fn local() -> [StorageSystemId; 1] {
    [StorageSystemId::default()]
}

#[test(start_paused = true)]
async fn gate_passes_when_every_result_is_successful() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([start_health_check(), health_check_done(&[true, true])]);
    assert!(health_check(&array).gate(&local(), false).await?);
    assert_eq!(array.pending(), 0);
    Ok(())
}

#[test(start_paused = true)]
async fn gate_fails_when_any_result_is_unsuccessful() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([start_health_check(), health_check_done(&[true, false])]);
    assert!(!health_check(&array).gate(&local(), false).await?);
    Ok(())
}

#[test(start_paused = true)]
async fn override_turns_failure_into_pass() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([start_health_check(), health_check_done(&[false])]);
    assert!(health_check(&array).gate(&local(), true).await?);
    Ok(())
}

#[test(start_paused = true)]
async fn empty_results_fail() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([start_health_check(), health_check_done(&[])]);
    assert!(!health_check(&array).gate(&local(), false).await?);
    Ok(())
}

#[test(start_paused = true)]
async fn polls_until_health_check_stops_running() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([
        start_health_check(),
        health_check_running(),
        health_check_running(),
        health_check_done(&[true]),
    ]);
    let start = Instant::now();
    let status = health_check(&array).run(&local()).await?;
    assert!(!status.health_check_running);
    assert!(status.passed());
    assert_eq!(array.requests().len(), 4);
    assert!(start.elapsed() >= Duration::from_secs(3));
    Ok(())
}

#[test(start_paused = true)]
async fn error_response_aborts_health_check() {
    let array = Arc::new(Array::default());
    array.expect(Expect::post_error(
        HEALTH_CHECK,
        json!({"storageDeviceIds": ["1"]}),
        TestError::Status(503),
    ));
    let result = health_check(&array).gate(&local(), true).await;
    assert!(matches!(result, Err(santricity::Error::Array(_))));
    assert_eq!(array.pending(), 0);
}
