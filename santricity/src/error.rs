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

use santricity_core::Array;
use std::error::Error as StdError;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;

/// Errors of the Web Services operations.
pub enum Error<A: Array> {
    /// Request to the array failed (including non-2xx responses).
    Array(A::Error),
    /// Failed to read a local file.
    Io(PathBuf, IoError),
    /// Path does not name a file that can be uploaded.
    InvalidFileName(PathBuf),
    /// The health check reported a problem and it is not ignored.
    HealthCheckFailed,
    /// Controller did not respond again within the retry limit.
    ControllerUnavailable(String),
    /// No controller addresses were provided.
    NoControllers,
}

impl<A: Array> Display for Error<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Array(err) => write!(f, "array request error: {err}"),
            Self::Io(path, err) => write!(f, "input/output error: file: {}: {err}", path.display()),
            Self::InvalidFileName(path) => {
                write!(f, "not an uploadable file name: {}", path.display())
            }
            Self::HealthCheckFailed => write!(f, "health check failed, upgrade aborted"),
            Self::ControllerUnavailable(name) => {
                write!(f, "controller {name} did not come back online")
            }
            Self::NoControllers => write!(f, "at least one controller address is needed"),
        }
    }
}

impl<A: Array> Debug for Error<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Array(err) => f.debug_tuple("Array").field(err).finish(),
            Self::Io(path, err) => f.debug_tuple("Io").field(path).field(err).finish(),
            Self::InvalidFileName(path) => f.debug_tuple("InvalidFileName").field(path).finish(),
            Self::HealthCheckFailed => write!(f, "HealthCheckFailed"),
            Self::ControllerUnavailable(name) => {
                f.debug_tuple("ControllerUnavailable").field(name).finish()
            }
            Self::NoControllers => write!(f, "NoControllers"),
        }
    }
}

impl<A: Array> StdError for Error<A>
where
    A::Error: 'static,
{
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Array(err) => Some(err),
            Self::Io(_, err) => Some(err),
            _ => None,
        }
    }
}
