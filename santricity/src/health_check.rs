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

//! Pre-upgrade health check.
//!
//! The array runs one health check at a time. [`HealthCheck::run`]
//! starts it and polls until the array reports it is no longer
//! running. There is no ceiling on the number of polls.

use crate::Error;
use crate::StorageSystemId;
use santricity_core::ApiPath;
use santricity_core::Array;
use santricity_core::Empty;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing::error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckSettings {
    /// Sleep before each status poll.
    pub poll_interval: Duration,
}

impl Default for HealthCheckSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckRequest<'a> {
    storage_device_ids: &'a [StorageSystemId],
}

/// Status of the health check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckStatus {
    pub health_check_running: bool,
    #[serde(default)]
    pub results: Vec<HealthCheckResult>,
}

/// Result for one storage system.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub storage_device_id: Option<StorageSystemId>,
    pub storage_device_name: Option<String>,
    pub successful: bool,
    #[serde(default)]
    pub failures: Vec<JsonValue>,
}

impl HealthCheckStatus {
    /// True only if there are results and every one of them is
    /// successful.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.successful)
    }

    /// Results that reported a problem.
    pub fn failed(&self) -> impl Iterator<Item = &HealthCheckResult> {
        self.results.iter().filter(|r| !r.successful)
    }
}

/// Health check service.
pub struct HealthCheck<A: Array> {
    array: Arc<A>,
    settings: HealthCheckSettings,
}

impl<A: Array> HealthCheck<A> {
    #[must_use]
    pub fn new(array: Arc<A>, settings: HealthCheckSettings) -> Self {
        Self { array, settings }
    }

    fn path() -> ApiPath {
        ApiPath::devmgr().join("health-check")
    }

    /// Start the health check for `systems` and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns error if starting or polling the health check fails.
    pub async fn run(&self, systems: &[StorageSystemId]) -> Result<HealthCheckStatus, Error<A>> {
        let path = Self::path();
        info!(?systems, "starting health check");
        let _: Empty = self
            .array
            .post(
                &path,
                &HealthCheckRequest {
                    storage_device_ids: systems,
                },
            )
            .await
            .map_err(Error::Array)?;
        loop {
            tokio::time::sleep(self.settings.poll_interval).await;
            let status: HealthCheckStatus = self.array.get(&path).await.map_err(Error::Array)?;
            if !status.health_check_running {
                return Ok(status);
            }
            debug!("health check is still running");
        }
    }

    /// Run the health check and decide whether an upgrade may proceed.
    ///
    /// A failed check still lets the upgrade proceed when
    /// `ignore_failures` is set.
    ///
    /// # Errors
    ///
    /// Returns error if the health check cannot be run.
    pub async fn gate(
        &self,
        systems: &[StorageSystemId],
        ignore_failures: bool,
    ) -> Result<bool, Error<A>> {
        let status = self.run(systems).await?;
        debug!(?status, "health check finished");
        if status.passed() {
            info!("health check was successful");
            return Ok(true);
        }
        if status.results.is_empty() {
            error!("health check returned no results");
        }
        for result in status.failed() {
            error!(
                system = ?result.storage_device_id,
                failures = ?result.failures,
                "health check has failed"
            );
        }
        if ignore_failures {
            info!("ignoring health check failures");
        }
        Ok(ignore_failures)
    }
}
