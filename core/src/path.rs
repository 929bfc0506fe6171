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

//! Web Services resource paths
//!
//! [`ApiPath`] is the absolute path of a resource relative to the
//! controller address, e.g. `/devmgr/v2/health-check`. It is opaque:
//! it is not validated and `Display` returns the raw string.
//!
//! Example
//! ```rust
//! use santricity_core::ApiPath;
//!
//! let path = ApiPath::devmgr().join("storage-systems").join("1");
//! assert_eq!(path.to_string(), "/devmgr/v2/storage-systems/1");
//! ```

use core::fmt::Display;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use serde::Deserialize;
use serde::Serialize;

/// Root of the Web Services v2 API.
pub const DEVMGR_ROOT: &str = "/devmgr/v2";

/// Path of a Web Services resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ApiPath(String);

impl ApiPath {
    /// Web Services v2 root path.
    #[must_use]
    pub fn devmgr() -> Self {
        Self(DEVMGR_ROOT.into())
    }

    /// Append one path segment.
    #[must_use]
    pub fn join(&self, segment: impl Display) -> Self {
        let base = self.0.trim_end_matches('/');
        Self(format!("{base}/{segment}"))
    }

    /// Same path with a trailing slash. Some collection endpoints
    /// (file uploads) are only served with it.
    #[must_use]
    pub fn with_trailing_slash(&self) -> Self {
        if self.0.ends_with('/') {
            self.clone()
        } else {
            Self(format!("{}/", self.0))
        }
    }

    /// Raw path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ApiPath {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl Display for ApiPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}
