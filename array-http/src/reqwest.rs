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

use crate::ArrayCredentials;
use crate::HttpClient;
use reqwest::header;
use reqwest::StatusCode;
use santricity_core::FileUpload;
use santricity_core::ReachabilityError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const APPLICATION_JSON: &str = "application/json";

#[derive(Debug)]
pub enum ArrayError {
    ReqwestError(reqwest::Error),
    JsonError(serde_path_to_error::Error<serde_json::Error>),
    /// The array answered with an unsuccessful status. The body usually
    /// explains why the request was rejected.
    InvalidResponse { status: StatusCode, body: String },
}

impl ArrayError {
    /// HTTP status of the response if the array answered with an
    /// unsuccessful status.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidResponse { status, .. } => Some(*status),
            Self::ReqwestError(e) => e.status(),
            Self::JsonError(_) => None,
        }
    }
}

impl From<reqwest::Error> for ArrayError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value)
    }
}

impl ReachabilityError for ArrayError {
    // A connection that is refused, times out, or is closed before any
    // response arrives means the controller is not serving yet.
    fn is_unreachable(&self) -> bool {
        match self {
            Self::ReqwestError(e) => {
                e.status().is_none() && (e.is_connect() || e.is_timeout() || e.is_request())
            }
            _ => false,
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::fmt::Display for ArrayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReqwestError(e) => write!(f, "HTTP client error: {e:?}"),
            Self::InvalidResponse { status, body } if body.is_empty() => {
                write!(f, "Invalid HTTP response: {status}")
            }
            Self::InvalidResponse { status, body } => {
                write!(f, "Invalid HTTP response: {status}: {body}")
            }
            Self::JsonError(e) => write!(
                f,
                "JSON deserialization error at line {} column {} path {}: {e}",
                e.inner().line(),
                e.inner().column(),
                e.path(),
            ),
        }
    }
}

#[allow(clippy::absolute_paths)]
impl std::error::Error for ArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReqwestError(e) => Some(e),
            Self::JsonError(e) => Some(e.inner()),
            Self::InvalidResponse { .. } => None,
        }
    }
}

/// Configuration parameters for the reqwest HTTP client.
///
/// Arrays ship with self-signed certificates, so scripts talking to them
/// usually disable certificate verification with `accept_invalid_certs`.
///
/// # Examples
///
/// ```rust
/// use santricity_array_http::reqwest::ClientParams;
/// use std::time::Duration;
///
/// let params = ClientParams::new()
///     .timeout(Duration::from_secs(600))
///     .connect_timeout(Duration::from_secs(10))
///     .accept_invalid_certs(true);
/// ```
#[derive(Debug, Clone)]
pub struct ClientParams {
    /// Whole request timeout, firmware upload included.
    pub timeout: Option<Duration>,
    /// TCP connection timeout, bounds each poll of a rebooting controller.
    pub connect_timeout: Option<Duration>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
}

impl Default for ClientParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Some(Duration::from_secs(5)),
            accept_invalid_certs: false,
        }
    }
}

impl ClientParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// HTTP client implementation using the reqwest library.
///
/// This provides a concrete implementation of [`HttpClient`] using the
/// reqwest HTTP client library. Cloning the client is cheap and clones
/// share the connection pool, which makes a clone the way to reuse one
/// session for several controllers.
///
/// # Examples
///
/// ```rust,no_run
/// use santricity_array_http::HttpArray;
/// use santricity_array_http::ArrayCredentials;
/// use santricity_array_http::reqwest::Client;
/// use santricity_array_http::reqwest::ClientParams;
/// use url::Url;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::with_params(ClientParams::new().accept_invalid_certs(true))?;
///
/// let credentials = ArrayCredentials::new("admin".to_string(), "password".to_string());
/// let controller_a = HttpArray::new(
///     client.clone(),
///     Url::parse("https://controller-a:8443")?,
///     credentials.clone(),
/// );
/// let controller_b = HttpArray::new(client, Url::parse("https://controller-b:8443")?, credentials);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

#[allow(clippy::missing_errors_doc)]
#[allow(clippy::absolute_paths)]
impl Client {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_params(ClientParams::default())
    }

    pub fn with_params(params: ClientParams) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("santricity/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(params.accept_invalid_certs);

        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = params.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Client {
    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T, ArrayError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %url, %body, "unsuccessful response");
            return Err(ArrayError::InvalidResponse { status, body });
        }

        let body = response.bytes().await.map_err(ArrayError::ReqwestError)?;

        // Some endpoints answer 200/204 without a body.
        if body.iter().all(u8::is_ascii_whitespace) {
            return serde_path_to_error::deserialize(serde_json::Value::Null)
                .map_err(ArrayError::JsonError);
        }

        serde_path_to_error::deserialize(&mut serde_json::Deserializer::from_slice(&body))
            .map_err(ArrayError::JsonError)
    }
}

impl HttpClient for Client {
    type Error = ArrayError;

    async fn get<T>(
        &self,
        url: Url,
        credentials: &ArrayCredentials,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .basic_auth(&credentials.username, Some(credentials.password()))
            .header(header::ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn post<B, T>(
        &self,
        url: Url,
        body: &B,
        credentials: &ArrayCredentials,
    ) -> Result<T, Self::Error>
    where
        B: Serialize + Send + Sync,
        T: DeserializeOwned + Send + Sync,
    {
        let response = self
            .client
            .post(url)
            .basic_auth(&credentials.username, Some(credentials.password()))
            .header(header::ACCEPT, APPLICATION_JSON)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn post_multipart<T>(
        &self,
        url: Url,
        file: &FileUpload,
        credentials: &ArrayCredentials,
    ) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let part = reqwest::multipart::Part::bytes(file.content.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part(file.field_name.clone(), part);

        let response = self
            .client
            .post(url)
            .basic_auth(&credentials.username, Some(credentials.password()))
            .header(header::ACCEPT, APPLICATION_JSON)
            .multipart(form)
            .send()
            .await?;

        tracing::info!(status = %response.status(), "received response to file upload");
        self.handle_response(response).await
    }
}
