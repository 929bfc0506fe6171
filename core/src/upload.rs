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

use std::fmt;

/// File sent as one part of a `multipart/form-data` request.
///
/// The content is kept in memory and sent in a single request.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name of the form field, e.g. `dlpfile`.
    pub field_name: String,
    /// File name reported to the array.
    pub file_name: String,
    /// File content.
    pub content: Vec<u8>,
}

impl FileUpload {
    #[must_use]
    pub fn new(field_name: impl Into<String>, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            content,
        }
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("content_len", &self.content.len())
            .finish()
    }
}
