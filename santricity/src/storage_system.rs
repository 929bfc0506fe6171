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

//! Storage systems managed by a controller.

use santricity_core::ApiPath;
use santricity_core::Array;
use serde::Deserialize;
use serde::Serialize;
use std::convert::Infallible;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

/// Identifier of a storage system. Embedded Web Services always
/// expose the local array as `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageSystemId(String);

impl StorageSystemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `/devmgr/v2/storage-systems/{id}`
    #[must_use]
    pub fn path(&self) -> ApiPath {
        ApiPath::devmgr().join("storage-systems").join(&self.0)
    }
}

impl Default for StorageSystemId {
    fn default() -> Self {
        Self("1".into())
    }
}

impl Display for StorageSystemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

impl From<String> for StorageSystemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StorageSystemId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl FromStr for StorageSystemId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

/// Status of a storage system as reported by a controller.
///
/// Only the fields used by the upgrade workflows are decoded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSystem {
    pub id: Option<StorageSystemId>,
    pub name: Option<String>,
    pub status: Option<String>,
    /// Controller firmware (bundle) version.
    pub fw_version: Option<String>,
}

/// Fetch the status of storage system `id`.
///
/// # Errors
///
/// Returns the array error as is, so callers can tell an unreachable
/// controller from an error response.
pub async fn storage_system<A: Array>(
    array: &A,
    id: &StorageSystemId,
) -> Result<StorageSystem, A::Error> {
    array.get(&id.path()).await
}
