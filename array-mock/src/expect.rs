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

//! Expectations for Array Mock.

use santricity_core::ApiPath;
use serde_json::from_str;
use serde_json::Value as JsonValue;
use std::fmt::Display;

/// What the mock answers to an expected request.
#[derive(Debug)]
pub enum Response<E> {
    /// Successful response with JSON body.
    Json(JsonValue),
    /// Error response.
    Error(E),
    /// The array does not answer at all (connection refused).
    Unreachable,
}

/// Request expected by the array.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpectedRequest {
    /// Expected Get.
    Get { path: ApiPath },
    /// Expected Post.
    Post { path: ApiPath, request: JsonValue },
    /// Expected multipart upload.
    Upload {
        path: ApiPath,
        field_name: String,
        file_name: String,
    },
}

/// Expectation for the tests.
#[derive(Debug)]
pub struct Expect<E> {
    pub request: ExpectedRequest,
    pub response: Response<E>,
}

fn json(v: impl Display) -> JsonValue {
    from_str(&v.to_string()).expect("invalid json")
}

impl<E> Expect<E> {
    pub fn get(uri: impl Display, response: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Get {
                path: uri.to_string().into(),
            },
            response: Response::Json(json(response)),
        }
    }

    pub fn get_error(uri: impl Display, error: E) -> Self {
        Expect {
            request: ExpectedRequest::Get {
                path: uri.to_string().into(),
            },
            response: Response::Error(error),
        }
    }

    pub fn get_unreachable(uri: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Get {
                path: uri.to_string().into(),
            },
            response: Response::Unreachable,
        }
    }

    pub fn post(uri: impl Display, request: impl Display, response: impl Display) -> Self {
        Expect {
            request: ExpectedRequest::Post {
                path: uri.to_string().into(),
                request: json(request),
            },
            response: Response::Json(json(response)),
        }
    }

    pub fn post_error(uri: impl Display, request: impl Display, error: E) -> Self {
        Expect {
            request: ExpectedRequest::Post {
                path: uri.to_string().into(),
                request: json(request),
            },
            response: Response::Error(error),
        }
    }

    pub fn upload(
        uri: impl Display,
        field_name: &str,
        file_name: &str,
        response: impl Display,
    ) -> Self {
        Expect {
            request: ExpectedRequest::Upload {
                path: uri.to_string().into(),
                field_name: field_name.into(),
                file_name: file_name.into(),
            },
            response: Response::Json(json(response)),
        }
    }

    pub fn upload_error(uri: impl Display, field_name: &str, file_name: &str, error: E) -> Self {
        Expect {
            request: ExpectedRequest::Upload {
                path: uri.to_string().into(),
                field_name: field_name.into(),
                file_name: file_name.into(),
            },
            response: Response::Error(error),
        }
    }
}
