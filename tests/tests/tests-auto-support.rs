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

use santricity::auto_support::AutoSupport;
use santricity::auto_support::AutoSupportConfiguration;
use santricity::auto_support::JobId;
use santricity_tests::Array;
use santricity_tests::Error;
use santricity_tests::Expect;
use santricity_tests::TestError;
use santricity_tests::AUTO_SUPPORT;
use santricity_tests::AUTO_SUPPORT_CONFIGURATION;
use santricity_tests::AUTO_SUPPORT_JOBS;
use serde_json::json;
use std::sync::Arc;
use tokio::test;

fn service(array: &Arc<Array>) -> AutoSupport<Array> {
    AutoSupport::new(array.clone())
}

#[test]
async fn trigger_fetches_created_job() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([
        Expect::post(
            AUTO_SUPPORT,
            json!({"operationType": "collectBundle", "dispatchType": "none"}),
            json!({"jobId": "a1b2"}),
        ),
        Expect::get(
            format!("{AUTO_SUPPORT_JOBS}/a1b2"),
            json!({"jobId": "a1b2", "jobStatus": "queued"}),
        ),
    ]);
    let job = service(&array).trigger("collectBundle", "none").await?;
    assert_eq!(job.job_id, JobId::new("a1b2"));
    assert_eq!(job.details["jobStatus"], "queued");
    assert_eq!(array.pending(), 0);
    Ok(())
}

#[test]
async fn failed_trigger_does_not_fetch_job() {
    let array = Arc::new(Array::default());
    array.expect(Expect::post_error(
        AUTO_SUPPORT,
        json!({"operationType": "collectBundle", "dispatchType": "none"}),
        TestError::Status(400),
    ));
    let result = service(&array).trigger("collectBundle", "none").await;
    assert!(matches!(result, Err(santricity::Error::Array(_))));
    assert_eq!(array.requests().len(), 1);
}

#[test]
async fn jobs_lists_all_jobs() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect(Expect::get(
        AUTO_SUPPORT_JOBS,
        json!([{"jobId": 1, "jobStatus": "done"}, {"jobId": 2, "jobStatus": "queued"}]),
    ));
    let jobs = service(&array).jobs().await?;
    let ids: Vec<_> = jobs.iter().map(|j| j.job_id.to_string()).collect();
    assert_eq!(ids, ["1", "2"]);
    Ok(())
}

#[test]
async fn update_posts_then_reads_back() -> Result<(), Error> {
    let array = Arc::new(Array::default());
    array.expect_all([
        Expect::post(
            AUTO_SUPPORT_CONFIGURATION,
            json!({"autoSupportEnabled": true}),
            json!(null),
        ),
        Expect::get(
            AUTO_SUPPORT_CONFIGURATION,
            json!({"autoSupportEnabled": true, "onDemandEnabled": false}),
        ),
    ]);
    let configuration = service(&array)
        .update_configuration(&AutoSupportConfiguration::enabled())
        .await?;
    assert_eq!(configuration.auto_support_enabled, Some(true));
    assert_eq!(configuration.other["onDemandEnabled"], false);
    Ok(())
}

#[test]
async fn failed_update_is_not_read_back() {
    let array = Arc::new(Array::default());
    array.expect(Expect::post_error(
        AUTO_SUPPORT_CONFIGURATION,
        json!({"autoSupportEnabled": true}),
        TestError::Status(422),
    ));
    let result = service(&array)
        .update_configuration(&AutoSupportConfiguration::enabled())
        .await;
    assert!(matches!(result, Err(santricity::Error::Array(_))));
    assert_eq!(array.pending(), 0);
    assert_eq!(array.requests().len(), 1);
}
