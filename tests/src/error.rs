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

//! Errors for tests

use crate::Array;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

#[derive(Debug)]
pub enum Error {
    Santricity(santricity::Error<Array>),
}

impl From<santricity::Error<Array>> for Error {
    fn from(err: santricity::Error<Array>) -> Self {
        Self::Santricity(err)
    }
}

/// Error response returned by the mock array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestError {
    /// Non-2xx status code.
    Status(u16),
}

impl Display for TestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Status(code) => write!(f, "status code {code}"),
        }
    }
}

impl StdError for TestError {}
