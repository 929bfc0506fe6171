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

//! Controller firmware upgrade.
//!
//! The upgrade runs as one linear sequence: health check on the first
//! controller, upload of the firmware bundle to it, then a wait until
//! every controller answers again after the reboot.

use crate::availability::wait_for_availability;
use crate::availability::AvailabilitySettings;
use crate::availability::ControllerAvailability;
use crate::health_check::HealthCheck;
use crate::health_check::HealthCheckSettings;
use crate::read_firmware_file;
use crate::Controller;
use crate::Error;
use crate::StorageSystemId;
use santricity_core::ApiPath;
use santricity_core::Array;
use santricity_core::FileUpload;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::debug;
use tracing::info;

/// Form field that carries the firmware bundle.
pub const FIRMWARE_FIELD: &str = "dlpfile";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeSettings {
    pub health_check: HealthCheckSettings,
    /// Proceed even if the health check reports failures.
    pub ignore_health_check: bool,
    pub availability: AvailabilitySettings,
}

/// Controller firmware service for one storage array.
pub struct ControllerFirmware<A: Array> {
    controllers: Vec<Controller<A>>,
    system: StorageSystemId,
    settings: UpgradeSettings,
}

impl<A: Array> ControllerFirmware<A> {
    /// # Errors
    ///
    /// Returns error if `controllers` is empty.
    pub fn new(
        controllers: Vec<Controller<A>>,
        system: StorageSystemId,
        settings: UpgradeSettings,
    ) -> Result<Self, Error<A>> {
        if controllers.is_empty() {
            return Err(Error::NoControllers);
        }
        Ok(Self {
            controllers,
            system,
            settings,
        })
    }

    fn primary(&self) -> Result<&Controller<A>, Error<A>> {
        self.controllers.first().ok_or(Error::NoControllers)
    }

    /// Upload a firmware bundle to the first controller.
    ///
    /// # Errors
    ///
    /// Returns error if the array does not accept the upload.
    pub async fn upload(&self, file: &FileUpload) -> Result<(), Error<A>> {
        let controller = self.primary()?;
        let path = ApiPath::devmgr().join("firmware").join("embedded-firmware");
        info!(controller = controller.name(), file = %file.file_name, "uploading controller firmware");
        let response: JsonValue = controller
            .array()
            .upload(&path, file)
            .await
            .map_err(Error::Array)?;
        if !response.is_null() {
            debug!(%response, "firmware upload response");
        }
        Ok(())
    }

    /// Run the complete upgrade with the firmware bundle at `path`.
    ///
    /// Returns how every controller came back.
    ///
    /// # Errors
    ///
    /// - [`Error::HealthCheckFailed`] if the health check fails and
    ///   failures are not ignored. Nothing is uploaded in this case.
    /// - [`Error::ControllerUnavailable`] if a controller does not
    ///   answer within the retry limit.
    /// - Any error of the underlying requests or of reading the file.
    pub async fn upgrade(&self, path: &Path) -> Result<Vec<ControllerAvailability>, Error<A>> {
        let primary = self.primary()?;
        let health_check = HealthCheck::new(primary.array(), self.settings.health_check.clone());
        let proceed = health_check
            .gate(
                std::slice::from_ref(&self.system),
                self.settings.ignore_health_check,
            )
            .await?;
        if !proceed {
            return Err(Error::HealthCheckFailed);
        }

        let file = read_firmware_file(path, FIRMWARE_FIELD).await?;
        self.upload(&file).await?;

        let report =
            wait_for_availability(&self.controllers, &self.system, &self.settings.availability)
                .await;
        if let Some(offline) = report.iter().find(|c| !c.availability.is_online()) {
            return Err(Error::ControllerUnavailable(offline.controller.clone()));
        }
        info!("upgrade operation is complete");
        Ok(report)
    }
}
