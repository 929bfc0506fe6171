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
#[allow(dead_code)]
pub mod test_utils {
    use santricity_array_http::reqwest::Client;
    use santricity_array_http::ArrayCredentials;
    use santricity_array_http::HttpArray;
    use santricity_core::ApiPath;
    use serde::{Deserialize, Serialize};
    use url::Url;
    use wiremock::MockServer;

    /// Basic auth header for `root:password`.
    pub const BASIC_AUTH: &str = "Basic cm9vdDpwYXNzd29yZA==";

    /// Test resource struct used across integration tests
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct TestSystem {
        pub id: String,
        pub fw_version: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct TestRequest {
        pub storage_device_ids: Vec<String>,
    }

    pub fn create_api_path(s: &str) -> ApiPath {
        ApiPath::from(s)
    }

    pub fn create_test_credentials() -> ArrayCredentials {
        ArrayCredentials::new("root".to_string(), "password".to_string())
    }

    pub fn create_test_array(mock_server: &MockServer) -> HttpArray<Client> {
        let client = Client::new().unwrap();
        HttpArray::new(
            client,
            Url::parse(&mock_server.uri()).unwrap(),
            create_test_credentials(),
        )
    }

    /// Array handle pointing to a local port nobody listens on.
    pub fn create_unreachable_array() -> HttpArray<Client> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new().unwrap();
        HttpArray::new(
            client,
            Url::parse(&format!("http://{addr}")).unwrap(),
            create_test_credentials(),
        )
    }

    /// Array handle pointing to a local listener that accepts every
    /// connection and closes it without answering, like a controller
    /// that is still booting.
    pub fn create_dropping_array() -> HttpArray<Client> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                drop(stream);
            }
        });
        let client = Client::new().unwrap();
        HttpArray::new(
            client,
            Url::parse(&format!("http://{addr}")).unwrap(),
            create_test_credentials(),
        )
    }

    pub mod paths {
        pub const HEALTH_CHECK: &str = "/devmgr/v2/health-check";
        pub const STORAGE_SYSTEM_1: &str = "/devmgr/v2/storage-systems/1";
        pub const EMBEDDED_FIRMWARE: &str = "/devmgr/v2/firmware/embedded-firmware";
    }
}
