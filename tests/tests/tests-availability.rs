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

use santricity::availability::wait_for_availability;
use santricity::availability::Availability;
use santricity::availability::AvailabilitySettings;
use santricity::Controller;
use santricity::StorageSystemId;
use santricity_tests::fixtures::storage_system;
use santricity_tests::fixtures::storage_system_unreachable;
use santricity_tests::Array;
use santricity_tests::Expect;
use santricity_tests::TestError;
use santricity_tests::STORAGE_SYSTEM;
use std::iter::repeat_with;
use std::sync::Arc;
use std::time::Duration;
use tokio::test;
use tokio::time::Instant;

fn controller(name: &str) -> (Arc<Array>, Controller<Array>) {
    let array = Arc::new(Array::default());
    (array.clone(), Controller::new(name, array))
}

#[test(start_paused = true)]
async fn stops_polling_on_first_response() {
    let (array, a) = controller("a");
    array.expect_all([
        storage_system_unreachable(),
        storage_system_unreachable(),
        storage_system("08.74.00.00"),
    ]);
    let report = wait_for_availability(
        &[a],
        &StorageSystemId::default(),
        &AvailabilitySettings::default(),
    )
    .await;
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].controller, "a");
    assert_eq!(
        report[0].availability,
        Availability::Online {
            attempts: 3,
            firmware_version: Some("08.74.00.00".into())
        }
    );
    assert_eq!(array.pending(), 0);
    assert_eq!(array.requests().len(), 3);
}

#[test(start_paused = true)]
async fn error_response_means_online() {
    let (array, a) = controller("a");
    array.expect(Expect::get_error(STORAGE_SYSTEM, TestError::Status(500)));
    let report = wait_for_availability(
        &[a],
        &StorageSystemId::default(),
        &AvailabilitySettings::default(),
    )
    .await;
    assert_eq!(
        report[0].availability,
        Availability::Online {
            attempts: 1,
            firmware_version: None
        }
    );
}

#[test(start_paused = true)]
async fn never_exceeds_retry_limit() {
    let (array, a) = controller("a");
    let settings = AvailabilitySettings {
        max_retries: 5,
        ..AvailabilitySettings::default()
    };
    array.expect_all(repeat_with(storage_system_unreachable).take(5));
    let report = wait_for_availability(&[a], &StorageSystemId::default(), &settings).await;
    assert_eq!(report[0].availability, Availability::Offline { attempts: 5 });
    assert_eq!(array.requests().len(), 5);
    assert_eq!(array.pending(), 0);
}

#[test(start_paused = true)]
async fn controllers_are_polled_in_order_after_warm_up() {
    let (array_a, a) = controller("a");
    let (array_b, b) = controller("b");
    array_a.expect_all([storage_system_unreachable(), storage_system("11.80")]);
    array_b.expect(storage_system("11.80"));
    let settings = AvailabilitySettings::default();
    let start = Instant::now();
    let report = wait_for_availability(&[a, b], &StorageSystemId::default(), &settings).await;
    let names: Vec<_> = report.iter().map(|c| c.controller.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert!(report.iter().all(|c| c.availability.is_online()));
    // a: warm-up and two polls, b: warm-up and one poll.
    assert!(start.elapsed() >= settings.warm_up * 2 + settings.poll_interval * 3);
    assert_eq!(array_a.pending() + array_b.pending(), 0);
}

#[test(start_paused = true)]
async fn zero_retries_reports_offline_without_polling() {
    let (array, a) = controller("a");
    let settings = AvailabilitySettings {
        warm_up: Duration::ZERO,
        max_retries: 0,
        ..AvailabilitySettings::default()
    };
    let report = wait_for_availability(&[a], &StorageSystemId::default(), &settings).await;
    assert_eq!(report[0].availability, Availability::Offline { attempts: 0 });
    assert!(array.requests().is_empty());
}
