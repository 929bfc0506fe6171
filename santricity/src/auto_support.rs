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

//! AutoSupport bundles, jobs and configuration.
//!
//! Jobs and configuration keep every field reported by the array, so
//! they can be printed or written back without losing data.

use crate::Error;
use santricity_core::ApiPath;
use santricity_core::Array;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map as JsonMap;
use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Arc;
use tracing::error;
use tracing::info;

/// Identifier of an AutoSupport job.
///
/// Arrays report it either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for JobId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(id) => Self(id),
            Repr::Number(id) => Self(id.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TriggerRequest<'a> {
    operation_type: &'a str,
    dispatch_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TriggerResponse {
    job_id: JobId,
}

/// AutoSupport bundle job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSupportJob {
    pub job_id: JobId,
    #[serde(flatten)]
    pub details: JsonMap<String, JsonValue>,
}

/// AutoSupport configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSupportConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_support_enabled: Option<bool>,
    #[serde(flatten)]
    pub other: JsonMap<String, JsonValue>,
}

impl AutoSupportConfiguration {
    /// Configuration that only turns AutoSupport on.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            auto_support_enabled: Some(true),
            ..Self::default()
        }
    }
}

/// AutoSupport service.
pub struct AutoSupport<A: Array> {
    array: Arc<A>,
}

impl<A: Array> AutoSupport<A> {
    #[must_use]
    pub fn new(array: Arc<A>) -> Self {
        Self { array }
    }

    fn path() -> ApiPath {
        ApiPath::devmgr().join("auto-support")
    }

    /// Trigger an AutoSupport bundle and return the job that collects
    /// it.
    ///
    /// # Errors
    ///
    /// Returns error if triggering or fetching the job fails.
    pub async fn trigger(
        &self,
        operation_type: &str,
        dispatch_type: &str,
    ) -> Result<AutoSupportJob, Error<A>> {
        info!(operation_type, dispatch_type, "triggering AutoSupport bundle");
        let created: TriggerResponse = self
            .array
            .post(
                &Self::path(),
                &TriggerRequest {
                    operation_type,
                    dispatch_type,
                },
            )
            .await
            .map_err(|err| {
                error!("trigger AutoSupport bundle attempt failed: {err}");
                Error::Array(err)
            })?;
        info!(job = %created.job_id, "trigger AutoSupport bundle attempt succeeded");
        self.job(&created.job_id).await
    }

    /// AutoSupport job `id`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn job(&self, id: &JobId) -> Result<AutoSupportJob, Error<A>> {
        info!(job = %id, "retrieving AutoSupport job");
        let job: AutoSupportJob = self
            .array
            .get(&Self::path().join("jobs").join(id))
            .await
            .map_err(|err| {
                error!("AutoSupport job retrieval request failed: {err}");
                Error::Array(err)
            })?;
        info!("AutoSupport job retrieval request succeeded");
        Ok(job)
    }

    /// All AutoSupport jobs.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn jobs(&self) -> Result<Vec<AutoSupportJob>, Error<A>> {
        info!("retrieving all AutoSupport jobs");
        let jobs: Vec<AutoSupportJob> = self
            .array
            .get(&Self::path().join("jobs"))
            .await
            .map_err(|err| {
                error!("AutoSupport jobs retrieval request failed: {err}");
                Error::Array(err)
            })?;
        info!(jobs = jobs.len(), "AutoSupport jobs retrieval request succeeded");
        Ok(jobs)
    }

    /// Current AutoSupport configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn configuration(&self) -> Result<AutoSupportConfiguration, Error<A>> {
        info!("retrieving current AutoSupport configuration");
        let configuration = self
            .array
            .get(&Self::path().join("configuration"))
            .await
            .map_err(|err| {
                error!("AutoSupport configuration retrieval attempt failed: {err}");
                Error::Array(err)
            })?;
        info!("AutoSupport configuration retrieval succeeded");
        Ok(configuration)
    }

    /// Update the AutoSupport configuration and return the
    /// configuration the array reports afterwards.
    ///
    /// # Errors
    ///
    /// Returns error if the update or reading it back fails.
    pub async fn update_configuration(
        &self,
        configuration: &AutoSupportConfiguration,
    ) -> Result<AutoSupportConfiguration, Error<A>> {
        info!("updating the AutoSupport configuration");
        let _: JsonValue = self
            .array
            .post(&Self::path().join("configuration"), configuration)
            .await
            .map_err(|err| {
                error!("update AutoSupport configuration attempt failed: {err}");
                Error::Array(err)
            })?;
        info!("update AutoSupport configuration attempt succeeded");
        self.configuration().await
    }
}
