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

use crate::Error;
use santricity_core::Array;
use santricity_core::FileUpload;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// Read a firmware file into a single multipart part.
///
/// The part carries the base name of `path` as the file name. Arrays
/// match drive firmware compatibility entries by that name.
///
/// # Errors
///
/// Returns error if `path` has no file name or the file cannot be read.
pub async fn read_firmware_file<A: Array>(
    path: &Path,
    field_name: &str,
) -> Result<FileUpload, Error<A>> {
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))?;
    let content = tokio::fs::read(path)
        .await
        .map_err(|err| Error::Io(path.to_path_buf(), err))?;
    debug!(file = %path.display(), bytes = content.len(), "firmware file loaded");
    Ok(FileUpload::new(field_name, file_name, content))
}
