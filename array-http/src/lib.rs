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

#[cfg(feature = "reqwest")]
pub mod reqwest;

use santricity_core::ApiPath;
use santricity_core::Array;
use santricity_core::FileUpload;
use santricity_core::ReachabilityError;
use serde::{de::DeserializeOwned, Serialize};
use std::{error::Error as StdError, future::Future};
use url::Url;

#[doc(inline)]
pub use santricity_core::ArrayCredentials;

pub trait HttpClient: Send + Sync {
    type Error: Send + StdError;

    /// Perform an HTTP GET request.
    fn get<T>(
        &self,
        url: Url,
        credentials: &ArrayCredentials,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send
    where
        T: DeserializeOwned + Send + Sync;

    /// Perform an HTTP POST request with JSON body.
    fn post<B, T>(
        &self,
        url: Url,
        body: &B,
        credentials: &ArrayCredentials,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Send + Sync;

    /// Perform an HTTP POST request with `multipart/form-data` body.
    fn post_multipart<T>(
        &self,
        url: Url,
        file: &FileUpload,
        credentials: &ArrayCredentials,
    ) -> impl Future<Output = Result<T, Self::Error>> + Send
    where
        T: DeserializeOwned + Send + Sync;
}

/// HTTP-based array implementation that wraps an [`HttpClient`].
///
/// This struct combines an HTTP client with the address of one array
/// controller and credentials. It implements the [`Array`] trait.
///
/// Handles for both controllers of an array are usually created from
/// clones of the same client so that they share one session (connection
/// pool and TLS policy).
///
/// # Type Parameters
///
/// * `C` - The HTTP client implementation to use
///
/// # Examples
///
/// ```rust,no_run
/// use santricity_array_http::HttpArray;
/// use santricity_array_http::ArrayCredentials;
/// use santricity_array_http::reqwest::Client;
/// use url::Url;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = ArrayCredentials::new("admin".to_string(), "password".to_string());
/// let http_client = Client::new()?;
/// let endpoint = Url::parse("https://192.168.1.100:8443")?;
///
/// let array = HttpArray::new(http_client, endpoint, credentials);
/// # Ok(())
/// # }
/// ```
pub struct HttpArray<C: HttpClient> {
    client: C,
    endpoint: ArrayEndpoint,
    credentials: ArrayCredentials,
}

impl<C: HttpClient> HttpArray<C> {
    /// Create a new HTTP-based array client.
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client implementation to use for requests
    /// * `endpoint` - The base URL of the controller (e.g., `https://192.168.1.100:8443`)
    /// * `credentials` - Authentication credentials for the array
    pub fn new(client: C, endpoint: Url, credentials: ArrayCredentials) -> Self {
        Self {
            client,
            endpoint: ArrayEndpoint::from(endpoint),
            credentials,
        }
    }
}

/// Base URL of one array controller.
///
/// Provides conversion of [`ApiPath`] to full request URLs.
#[derive(Debug, Clone)]
pub struct ArrayEndpoint {
    base_url: Url,
}

impl ArrayEndpoint {
    /// Create a new `ArrayEndpoint` from a base URL
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Convert a path to a full request URL. The path is appended to
    /// the path of the base URL, so a proxy prefix is kept.
    #[must_use]
    pub fn with_path(&self, path: &ApiPath) -> Url {
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{}", path.as_str()));
        url
    }
}

impl From<Url> for ArrayEndpoint {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

impl<C: HttpClient> Array for HttpArray<C>
where
    C::Error: ReachabilityError + StdError + Send + Sync,
{
    type Error = C::Error;

    async fn get<T: DeserializeOwned + Send + Sync>(
        &self,
        path: &ApiPath,
    ) -> Result<T, Self::Error> {
        let endpoint_url = self.endpoint.with_path(path);
        tracing::debug!(url = %endpoint_url, "GET");
        self.client
            .get(endpoint_url, &self.credentials)
            .await
    }

    async fn post<V: Sync + Send + Serialize, R: Sync + Send + DeserializeOwned>(
        &self,
        path: &ApiPath,
        body: &V,
    ) -> Result<R, Self::Error> {
        let endpoint_url = self.endpoint.with_path(path);
        tracing::debug!(url = %endpoint_url, "POST");
        self.client
            .post(endpoint_url, body, &self.credentials)
            .await
    }

    async fn upload<R: Sync + Send + DeserializeOwned>(
        &self,
        path: &ApiPath,
        file: &FileUpload,
    ) -> Result<R, Self::Error> {
        let endpoint_url = self.endpoint.with_path(path);
        tracing::debug!(
            url = %endpoint_url,
            file = %file.file_name,
            size = file.content.len(),
            "POST multipart"
        );
        self.client
            .post_multipart(endpoint_url, file, &self.credentials)
            .await
    }
}
