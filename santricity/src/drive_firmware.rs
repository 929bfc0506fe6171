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

//! Drive firmware upgrade.
//!
//! Only drives that are optimal and listed as compatible with the
//! uploaded file are upgraded.

use crate::read_firmware_file;
use crate::Error;
use crate::StorageSystemId;
use santricity_core::ApiPath;
use santricity_core::Array;
use santricity_core::FileUpload;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing::info;

/// Form field that carries the drive firmware file.
pub const FIRMWARE_FIELD: &str = "file";

/// Overall state reported while drives download firmware.
pub const DOWNLOAD_IN_PROGRESS: &str = "downloadInProgress";

/// Reference of a drive (`driveRef`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriveRef(String);

impl DriveRef {
    #[must_use]
    pub fn new(r: impl Into<String>) -> Self {
        Self(r.into())
    }
}

impl Display for DriveRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriveStatus {
    Optimal,
    Failed,
    Replaced,
    Bypassed,
    Unresponsive,
    Removed,
    Incompatible,
    DataRelocation,
    PreFailCopy,
    PreFailCopyPending,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drive {
    pub id: String,
    pub drive_ref: DriveRef,
    pub status: DriveStatus,
}

impl Drive {
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == DriveStatus::Optimal
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibleDrive {
    pub drive_ref: DriveRef,
}

/// Drives a firmware file can be applied to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareCompatibility {
    pub filename: String,
    #[serde(default)]
    pub compatible_drives: Vec<CompatibleDrive>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareCompatibilitySet {
    #[serde(default)]
    pub compatibilities: Vec<FirmwareCompatibility>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitiateUpgradeRequest<'a> {
    filename: &'a str,
    drive_ref_list: &'a [DriveRef],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFirmwareStatus {
    pub drive_ref: Option<DriveRef>,
    pub status: Option<String>,
}

/// State of a drive firmware upgrade.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUpgradeState {
    pub overall_status: String,
    #[serde(default)]
    pub drive_status: Vec<DriveFirmwareStatus>,
}

impl DriveUpgradeState {
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.overall_status == DOWNLOAD_IN_PROGRESS
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveUpgradeSettings {
    /// Sleep between upgrade state polls.
    pub poll_interval: Duration,
}

impl Default for DriveUpgradeSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Drive firmware service.
pub struct DriveFirmware<A: Array> {
    array: Arc<A>,
    system: StorageSystemId,
    settings: DriveUpgradeSettings,
}

impl<A: Array> DriveFirmware<A> {
    #[must_use]
    pub fn new(array: Arc<A>, system: StorageSystemId, settings: DriveUpgradeSettings) -> Self {
        Self {
            array,
            system,
            settings,
        }
    }

    fn firmware_path(&self) -> ApiPath {
        self.system.path().join("firmware").join("drives")
    }

    /// All drives of the storage system.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn drives(&self) -> Result<Vec<Drive>, Error<A>> {
        self.array
            .get(&self.system.path().join("drives"))
            .await
            .map_err(Error::Array)
    }

    /// References of optimal drives. All drives of the storage system
    /// are checked when `drives` is `None`.
    ///
    /// # Errors
    ///
    /// Returns error if drives have to be fetched and the request fails.
    pub async fn optimal_drives(&self, drives: Option<&[Drive]>) -> Result<Vec<DriveRef>, Error<A>> {
        let fetched;
        let drives = match drives {
            Some(drives) => drives,
            None => {
                fetched = self.drives().await?;
                fetched.as_slice()
            }
        };
        Ok(drives
            .iter()
            .filter(|drive| {
                let optimal = drive.is_optimal();
                if optimal {
                    debug!(drive = %drive.id, "drive is optimal");
                } else {
                    debug!(drive = %drive.id, status = ?drive.status, "drive is not optimal");
                }
                optimal
            })
            .map(|drive| drive.drive_ref.clone())
            .collect())
    }

    /// Firmware compatibility of the drives.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn compatibilities(&self) -> Result<FirmwareCompatibilitySet, Error<A>> {
        self.array
            .get(&self.firmware_path())
            .await
            .map_err(Error::Array)
    }

    /// Optimal drives that are compatible with firmware file `file_name`.
    ///
    /// # Errors
    ///
    /// Returns error if one of the requests fails.
    pub async fn compatible_drives(
        &self,
        file_name: &str,
        drives: Option<&[Drive]>,
    ) -> Result<Vec<DriveRef>, Error<A>> {
        debug!("checking drive compatibility");
        let optimal = self.optimal_drives(drives).await?;
        let compatibilities = self.compatibilities().await?;
        let compatible: Vec<&DriveRef> = compatibilities
            .compatibilities
            .iter()
            .filter(|firmware| firmware.filename == file_name)
            .flat_map(|firmware| firmware.compatible_drives.iter().map(|d| &d.drive_ref))
            .collect();
        Ok(optimal
            .into_iter()
            .filter(|drive| {
                let ok = compatible.contains(&drive);
                if !ok {
                    debug!(drive = %drive, file = file_name, "drive is not compatible with firmware");
                }
                ok
            })
            .collect())
    }

    /// Upload a drive firmware file.
    ///
    /// # Errors
    ///
    /// Returns error if the array does not accept the upload.
    pub async fn upload(&self, file: &FileUpload) -> Result<(), Error<A>> {
        let path = ApiPath::devmgr()
            .join("files")
            .join("drive")
            .with_trailing_slash();
        info!(file = %file.file_name, "uploading drive firmware");
        let response: JsonValue = self
            .array
            .upload(&path, file)
            .await
            .map_err(Error::Array)?;
        if !response.is_null() {
            debug!(%response, "drive firmware upload response");
        }
        Ok(())
    }

    /// Current state of the drive firmware upgrade.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn state(&self) -> Result<DriveUpgradeState, Error<A>> {
        self.array
            .get(&self.firmware_path().join("state"))
            .await
            .map_err(Error::Array)
    }

    /// Upload the firmware at `path` and apply it to compatible
    /// drives. Only `drives` are considered when given.
    ///
    /// Returns `None` if no drive is compatible. Otherwise waits while
    /// the drives download the firmware and returns the final state.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or any request fails.
    pub async fn upgrade(
        &self,
        path: &Path,
        drives: Option<&[Drive]>,
    ) -> Result<Option<DriveUpgradeState>, Error<A>> {
        let file = read_firmware_file(path, FIRMWARE_FIELD).await?;
        self.upload(&file).await?;

        let compatible = self.compatible_drives(&file.file_name, drives).await?;
        if compatible.is_empty() {
            info!(file = %file.file_name, "firmware is not compatible with any drive of the array");
            return Ok(None);
        }

        info!(drives = compatible.len(), "upgrading compatible drives");
        let response: JsonValue = self
            .array
            .post(
                &self.firmware_path().join("initiate-upgrade"),
                &InitiateUpgradeRequest {
                    filename: &file.file_name,
                    drive_ref_list: &compatible,
                },
            )
            .await
            .map_err(Error::Array)?;
        if !response.is_null() {
            debug!(%response, "initiate upgrade response");
        }

        let state = self.wait_for_downloads().await?;
        info!(status = %state.overall_status, "drive firmware download finished");
        Ok(Some(state))
    }

    /// Poll the upgrade state until drives finished downloading.
    ///
    /// # Errors
    ///
    /// Returns error if a state request fails.
    pub async fn wait_for_downloads(&self) -> Result<DriveUpgradeState, Error<A>> {
        loop {
            let state = self.state().await?;
            if !state.in_progress() {
                return Ok(state);
            }
            debug!("drive firmware download in progress");
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}
