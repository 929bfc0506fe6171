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

use crate::Array;
use humantime::DurationError;
use serde_json::Error as JsonError;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Error as IoError;
use std::path::PathBuf;
use toml::de::Error as TomlError;
use url::ParseError as UrlParseError;

/// Command line tool errors.
#[derive(Debug)]
pub enum Error {
    Io(PathBuf, IoError),
    Toml(PathBuf, TomlError),
    Json(PathBuf, JsonError),
    Duration(String, DurationError),
    NoControllers,
    MissingPassword,
    InvalidUrl(String, UrlParseError),
    Client(reqwest::Error),
    UnknownDrive(String),
    Output(JsonError),
    Santricity(santricity::Error<Array>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Io(fname, error) => {
                write!(f, "input/output error: file: {}: {error}", fname.display())
            }
            Self::Toml(fname, error) => {
                write!(f, "configuration error: file: {}: {error}", fname.display())
            }
            Self::Json(fname, error) => {
                write!(f, "json error: file: {}: {error}", fname.display())
            }
            Self::Duration(value, error) => write!(f, "invalid duration {value:?}: {error}"),
            Self::NoControllers => "at least one controller address is needed".fmt(f),
            Self::MissingPassword => {
                "password is needed (--password or SANTRICITY_PASSWORD)".fmt(f)
            }
            Self::InvalidUrl(url, error) => write!(f, "invalid controller address {url}: {error}"),
            Self::Client(error) => write!(f, "failed to create http client: {error}"),
            Self::UnknownDrive(drive) => write!(f, "no drive with reference {drive}"),
            Self::Output(error) => write!(f, "failed to format output: {error}"),
            Self::Santricity(error) => error.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(_, error) => Some(error),
            Self::Toml(_, error) => Some(error),
            Self::Json(_, error) | Self::Output(error) => Some(error),
            Self::Duration(_, error) => Some(error),
            Self::InvalidUrl(_, error) => Some(error),
            Self::Client(error) => Some(error),
            Self::Santricity(error) => Some(error),
            Self::NoControllers | Self::MissingPassword | Self::UnknownDrive(_) => None,
        }
    }
}

impl From<santricity::Error<Array>> for Error {
    fn from(error: santricity::Error<Array>) -> Self {
        Self::Santricity(error)
    }
}
