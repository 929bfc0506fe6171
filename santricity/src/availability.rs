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

//! Wait for controllers to come back after a firmware activation.
//!
//! A controller counts as online as soon as it answers anything at
//! all. Only requests that got no response keep the waiter polling.

use crate::storage_system::storage_system;
use crate::Controller;
use crate::StorageSystemId;
use santricity_core::Array;
use santricity_core::ReachabilityError;
use std::time::Duration;
use tracing::debug;
use tracing::info;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySettings {
    /// Sleep before the first poll of each controller.
    pub warm_up: Duration,
    /// Sleep before each poll.
    pub poll_interval: Duration,
    /// Polls per controller before it is reported offline.
    pub max_retries: u32,
    /// Log progress every that many polls.
    pub progress_every: u32,
}

impl Default for AvailabilitySettings {
    fn default() -> Self {
        Self {
            warm_up: Duration::from_secs(10),
            poll_interval: Duration::from_secs(1),
            max_retries: 1000,
            progress_every: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Controller answered on poll number `attempts`. The firmware
    /// version is known only if the answer was successful.
    Online {
        attempts: u32,
        firmware_version: Option<String>,
    },
    /// Controller did not answer any of `attempts` polls.
    Offline { attempts: u32 },
}

impl Availability {
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAvailability {
    pub controller: String,
    pub availability: Availability,
}

/// Poll every controller in order until it answers or the retries run
/// out.
pub async fn wait_for_availability<A: Array>(
    controllers: &[Controller<A>],
    system: &StorageSystemId,
    settings: &AvailabilitySettings,
) -> Vec<ControllerAvailability> {
    let mut report = Vec::with_capacity(controllers.len());
    for controller in controllers {
        let availability = wait_for_controller(controller, system, settings).await;
        report.push(ControllerAvailability {
            controller: controller.name().into(),
            availability,
        });
    }
    report
}

async fn wait_for_controller<A: Array>(
    controller: &Controller<A>,
    system: &StorageSystemId,
    settings: &AvailabilitySettings,
) -> Availability {
    let name = controller.name();
    let array = controller.array();
    info!(controller = name, warm_up = ?settings.warm_up, "waiting before polling controller");
    tokio::time::sleep(settings.warm_up).await;

    let mut attempts = 0;
    while attempts < settings.max_retries {
        if settings.progress_every > 0 && attempts > 0 && attempts % settings.progress_every == 0 {
            info!(
                controller = name,
                attempts,
                waited = ?settings.poll_interval * attempts,
                "controller is still offline"
            );
        }
        tokio::time::sleep(settings.poll_interval).await;
        attempts += 1;
        match storage_system(array.as_ref(), system).await {
            Ok(status) => {
                info!(controller = name, attempts, "controller is online");
                info!(
                    controller = name,
                    firmware = status.fw_version.as_deref().unwrap_or("unknown"),
                    "controller firmware version"
                );
                return Availability::Online {
                    attempts,
                    firmware_version: status.fw_version,
                };
            }
            Err(err) if err.is_unreachable() => {
                debug!(controller = name, attempts, "controller is unreachable");
            }
            Err(err) => {
                info!(controller = name, attempts, "controller is online");
                warn!(controller = name, "storage system request failed: {err}");
                return Availability::Online {
                    attempts,
                    firmware_version: None,
                };
            }
        }
    }
    warn!(controller = name, attempts, "controller did not come back online");
    Availability::Offline { attempts }
}
