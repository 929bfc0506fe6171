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

//! Typed access to the SANtricity Web Services API.
//!
//! Every service in this crate is generic over [`Array`], so it runs
//! against the HTTP implementation in production and against the mock
//! array in tests.
//!
//! Services are enabled by cargo features:
//! - `auto-support`: trigger AutoSupport bundles, read jobs and configuration.
//! - `health-check`: pre-upgrade health check gate.
//! - `controller-firmware`: health gate, firmware upload and the wait for
//!   controllers to come back after reboot.
//! - `drive-firmware`: drive firmware upload and upgrade.

mod error;
#[cfg(any(feature = "controller-firmware", feature = "drive-firmware"))]
mod firmware_file;

pub mod storage_system;

#[cfg(feature = "auto-support")]
pub mod auto_support;
#[cfg(feature = "controller-firmware")]
pub mod availability;
#[cfg(feature = "controller-firmware")]
pub mod controller_firmware;
#[cfg(feature = "drive-firmware")]
pub mod drive_firmware;
#[cfg(feature = "health-check")]
pub mod health_check;

#[doc(inline)]
pub use error::Error;
#[cfg(any(feature = "controller-firmware", feature = "drive-firmware"))]
#[doc(inline)]
pub use firmware_file::read_firmware_file;
#[doc(inline)]
pub use santricity_core::Array;
#[doc(inline)]
pub use santricity_core::ArrayCredentials;
#[doc(inline)]
pub use storage_system::StorageSystemId;

use std::sync::Arc;

/// One controller of a storage array.
///
/// Controllers of the same array serve the same API. The name is only
/// used in log messages and reports (usually the controller address).
pub struct Controller<A: Array> {
    name: String,
    array: Arc<A>,
}

impl<A: Array> Controller<A> {
    #[must_use]
    pub fn new(name: impl Into<String>, array: Arc<A>) -> Self {
        Self {
            name: name.into(),
            array,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn array(&self) -> Arc<A> {
        self.array.clone()
    }
}

impl<A: Array> Clone for Controller<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            array: self.array.clone(),
        }
    }
}
