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

//! Storage array client abstraction
//!
//! This module defines the transport-agnostic [`Array`] trait, a minimal
//! interface for talking to the Web Services API of one storage array
//! controller. Implementors provide asynchronous operations to read a
//! resource, post a JSON body and upload a file.
//!
//! Operation semantics:
//! - `get` fetches the JSON resource at the given [`ApiPath`].
//! - `post` sends a JSON body to the path and decodes the response.
//! - `upload` sends a [`FileUpload`] as a `multipart/form-data` body.
//!
//! Every operation must fail when the array answers with a non-2xx
//! status. Implementations do not retry.
//!
//! Notes for implementors:
//! - The trait is `Send + Sync` and returns `Send` futures to support use in
//!   async runtimes and multithreaded contexts.
//! - Errors should implement `std::error::Error` and be safely transferable
//!   across threads. Errors also implement [`ReachabilityError`] so that
//!   callers waiting for a rebooting controller can tell "no answer" from
//!   "answered with an error".

use crate::ApiPath;
use crate::FileUpload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;

/// Array trait defines access to one controller of a storage array
/// through the Web Services REST API.
pub trait Array: Send + Sync {
    /// Array Error.
    type Error: StdError + ReachabilityError + Send + Sync;

    /// Get resource.
    ///
    /// `T` is structure that is used for return type.
    fn get<T: DeserializeOwned + Send + Sync>(
        &self,
        path: &ApiPath,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send;

    /// Post JSON body to the resource.
    ///
    /// `V` is structure that is used for request body.
    /// `R` is structure that is used for return type.
    fn post<V: Sync + Send + Serialize, R: Send + Sync + DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: &V,
    ) -> impl Future<Output = Result<R, Self::Error>> + Send;

    /// Upload file as a multipart form.
    ///
    /// `R` is structure that is used for return type.
    fn upload<R: Send + Sync + DeserializeOwned>(
        &self,
        path: &ApiPath,
        file: &FileUpload,
    ) -> impl Future<Output = Result<R, Self::Error>> + Send;
}

/// Errors that can tell whether the array could not be reached at all.
pub trait ReachabilityError {
    /// Returns true if the request did not get any response (connection
    /// refused, timeout, connection closed before the response). Error responses from the
    /// array are not unreachable.
    fn is_unreachable(&self) -> bool;
}

/// Credentials used to access the array.
///
/// Security notes:
/// - `Debug`/`Display` redact the password.
/// - Prefer short-lived instances and avoid logging credentials.
#[derive(Clone)]
pub struct ArrayCredentials {
    /// Username to access the array.
    pub username: String,
    password: String,
}

impl ArrayCredentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Get password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for ArrayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for ArrayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ArrayCredentials(username: {}, password: [REDACTED])",
            self.username
        )
    }
}
