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

//! Core types of the SANtricity Web Services client.
//!
//! This crate is transport agnostic. It defines the [`Array`] trait that
//! the HTTP implementation and the test mock implement, and the small
//! value types that travel through it.

/// Storage array access trait and credentials.
pub mod array;
/// Web Services resource paths.
pub mod path;
/// Multipart file upload payload.
pub mod upload;

#[doc(inline)]
pub use array::Array;
#[doc(inline)]
pub use array::ArrayCredentials;
#[doc(inline)]
pub use array::ReachabilityError;
#[doc(inline)]
pub use path::ApiPath;
#[doc(inline)]
pub use upload::FileUpload;

use serde::de::Deserializer;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde::Serialize;

/// Response body that carries no information.
///
/// Deserializes from any JSON value (including `null` that is used
/// for empty response bodies) and discards it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer).map(|_| Self {})
    }
}
