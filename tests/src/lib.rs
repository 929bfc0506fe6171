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

//! This is tests support lib.

/// Errors used in tests.
pub mod error;

#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use error::TestError;

use santricity_array_mock::Array as MockArray;
use santricity_array_mock::Expect as MockExpect;
use std::path::PathBuf;

pub type Array = MockArray<TestError>;
pub type Expect = MockExpect<TestError>;

pub const HEALTH_CHECK: &str = "/devmgr/v2/health-check";
pub const STORAGE_SYSTEM: &str = "/devmgr/v2/storage-systems/1";
pub const EMBEDDED_FIRMWARE: &str = "/devmgr/v2/firmware/embedded-firmware";
pub const DRIVES: &str = "/devmgr/v2/storage-systems/1/drives";
pub const DRIVE_COMPATIBILITIES: &str = "/devmgr/v2/storage-systems/1/firmware/drives";
pub const DRIVE_INITIATE_UPGRADE: &str =
    "/devmgr/v2/storage-systems/1/firmware/drives/initiate-upgrade";
pub const DRIVE_UPGRADE_STATE: &str = "/devmgr/v2/storage-systems/1/firmware/drives/state";
pub const DRIVE_FILE_UPLOAD: &str = "/devmgr/v2/files/drive/";
pub const AUTO_SUPPORT: &str = "/devmgr/v2/auto-support";
pub const AUTO_SUPPORT_JOBS: &str = "/devmgr/v2/auto-support/jobs";
pub const AUTO_SUPPORT_CONFIGURATION: &str = "/devmgr/v2/auto-support/configuration";

/// Write a small firmware file into a per-process temporary directory.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
pub fn firmware_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("santricity-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temporary directory");
    let file = dir.join(name);
    std::fs::write(&file, b"firmware image").expect("firmware file");
    file
}
