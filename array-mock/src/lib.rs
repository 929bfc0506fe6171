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

pub mod expect;

#[doc(inline)]
pub use expect::Expect;
pub use expect::ExpectedRequest;
pub use expect::Response;

use santricity_core::ApiPath;
use santricity_core::Array as SantricityArray;
use santricity_core::FileUpload;
use santricity_core::ReachabilityError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_value;
use serde_json::to_value;
use serde_json::Error as JsonError;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(Debug)]
pub enum Error {
    ErrorResponse(Box<dyn StdError + Send + Sync>),
    Unreachable(ApiPath),
    MutexLock(String),
    NothingIsExpected(ExpectedRequest),
    BadRequestJson(JsonError),
    BadResponseJson(JsonError),
    UnexpectedRequest(ExpectedRequest, ExpectedRequest),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ErrorResponse(err) => write!(f, "response: {err}"),
            Self::Unreachable(path) => write!(f, "array is unreachable: {path}"),
            Self::MutexLock(err) => write!(f, "lock error: {err}"),
            Self::NothingIsExpected(request) => {
                write!(
                    f,
                    "nothing is expected to happen but something happened: {request:?}"
                )
            }
            Self::BadRequestJson(err) => write!(f, "bad json request: {err}"),
            Self::BadResponseJson(err) => write!(f, "bad json response: {err}"),
            Self::UnexpectedRequest(request, expected) => {
                write!(f, "unexpected request: {request:?}; expected: {expected:?}")
            }
        }
    }
}

impl StdError for Error {}

impl ReachabilityError for Error {
    fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

impl Error {
    pub fn mutex_lock<T>(err: PoisonError<T>) -> Self {
        Self::MutexLock(err.to_string())
    }
}

/// Array that answers requests from a queue of expectations.
///
/// Requests must arrive in the order the expectations were queued.
/// Every received request is recorded and can be inspected with
/// [`Array::requests`].
pub struct Array<E> {
    expect: Mutex<VecDeque<Expect<E>>>,
    requests: Mutex<Vec<ExpectedRequest>>,
}

impl<E> Default for Array<E> {
    fn default() -> Self {
        Self {
            expect: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl<E> Array<E> {
    /// Replace all queued expectations with `exp`.
    pub fn expect(&self, exp: Expect<E>) {
        let expect: &mut VecDeque<Expect<E>> = &mut self.expect.lock().expect("not poisoned");
        expect.clear();
        expect.push_back(exp);
    }

    /// Queue all expectations in order.
    pub fn expect_all(&self, exps: impl IntoIterator<Item = Expect<E>>) {
        self.expect.lock().expect("not poisoned").extend(exps);
    }

    /// Number of expectations that were not consumed yet.
    pub fn pending(&self) -> usize {
        self.expect.lock().expect("not poisoned").len()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ExpectedRequest> {
        self.requests.lock().expect("not poisoned").clone()
    }
}

impl<E> Array<E>
where
    E: StdError + Send + Sync + 'static,
{
    fn answer<R: DeserializeOwned>(&self, request: ExpectedRequest) -> Result<R, Error> {
        self.requests
            .lock()
            .map_err(Error::mutex_lock)?
            .push(request.clone());
        let expect = self
            .expect
            .lock()
            .map_err(Error::mutex_lock)?
            .pop_front()
            .ok_or_else(|| Error::NothingIsExpected(request.clone()))?;
        if expect.request != request {
            return Err(Error::UnexpectedRequest(request, expect.request));
        }
        let path = match request {
            ExpectedRequest::Get { path }
            | ExpectedRequest::Post { path, .. }
            | ExpectedRequest::Upload { path, .. } => path,
        };
        match expect.response {
            Response::Json(response) => from_value(response).map_err(Error::BadResponseJson),
            Response::Error(err) => Err(Error::ErrorResponse(Box::new(err))),
            Response::Unreachable => Err(Error::Unreachable(path)),
        }
    }
}

impl<E> SantricityArray for Array<E>
where
    E: StdError + Send + Sync + 'static,
{
    type Error = Error;

    async fn get<T: DeserializeOwned + Send + Sync>(&self, path: &ApiPath) -> Result<T, Error> {
        self.answer(ExpectedRequest::Get { path: path.clone() })
    }

    async fn post<V: Sync + Send + Serialize, R: Sync + Send + DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: &V,
    ) -> Result<R, Error> {
        let request: JsonValue = to_value(body).map_err(Error::BadRequestJson)?;
        self.answer(ExpectedRequest::Post {
            path: path.clone(),
            request,
        })
    }

    async fn upload<R: Sync + Send + DeserializeOwned>(
        &self,
        path: &ApiPath,
        file: &FileUpload,
    ) -> Result<R, Error> {
        self.answer(ExpectedRequest::Upload {
            path: path.clone(),
            field_name: file.field_name.clone(),
            file_name: file.file_name.clone(),
        })
    }
}
