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

//! Tool configuration.
//!
//! Settings come from an optional TOML file and are overridden by
//! command line options. Example file:
//!
//! ```toml
//! controllers = ["https://controller-a:8443", "https://controller-b:8443"]
//! username = "admin"
//! system-id = "1"
//! verify-tls = false
//!
//! [timing]
//! warm-up = "10s"
//! availability-interval = "1s"
//! max-retries = 1000
//! ```

use crate::Error;
use clap::Args;
use santricity::availability::AvailabilitySettings;
use santricity::controller_firmware::UpgradeSettings;
use santricity::drive_firmware::DriveUpgradeSettings;
use santricity::health_check::HealthCheckSettings;
use santricity::ArrayCredentials;
use santricity::StorageSystemId;
use serde::Deserialize;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default user of embedded Web Services.
pub const DEFAULT_USERNAME: &str = "admin";

/// Options shared by all commands.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Controller address, e.g. `https://controller-a:8443`. Repeat
    /// for every controller of the array.
    #[arg(long = "controller", global = true)]
    pub controllers: Vec<String>,
    #[arg(long, global = true, env = "SANTRICITY_USERNAME")]
    pub username: Option<String>,
    #[arg(long, global = true, env = "SANTRICITY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Storage system identifier.
    #[arg(long, global = true)]
    pub system_id: Option<String>,
    /// Verify controller TLS certificates. `--verify-tls=false` turns
    /// verification off even if the configuration file enables it.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verify_tls: Option<bool>,
}

/// Configuration file content.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub controllers: Vec<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub system_id: Option<String>,
    pub verify_tls: Option<bool>,
    #[serde(default)]
    pub timing: TimingFile,
}

/// Timing section of the configuration file. Durations use the
/// humantime format (`500ms`, `10s`, `2m`).
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TimingFile {
    pub request_timeout: Option<String>,
    pub connect_timeout: Option<String>,
    pub health_check_interval: Option<String>,
    pub warm_up: Option<String>,
    pub availability_interval: Option<String>,
    pub max_retries: Option<u32>,
    pub progress_every: Option<u32>,
    pub drive_state_interval: Option<String>,
}

impl ConfigFile {
    /// Read configuration from TOML file.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid configuration.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(|e| Error::Io(fname.into(), e))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Io(fname.into(), e))?;
        Self::parse(fname, &content)
    }

    fn parse(fname: &Path, content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| Error::Toml(fname.into(), e))
    }
}

/// Resolved configuration.
#[derive(Debug)]
pub struct Config {
    pub controllers: Vec<Url>,
    pub credentials: ArrayCredentials,
    pub system_id: StorageSystemId,
    pub verify_tls: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub upgrade: UpgradeSettings,
    pub drive_upgrade: DriveUpgradeSettings,
}

fn duration(value: Option<&String>, default: Duration) -> Result<Duration, Error> {
    value.map_or(Ok(default), |v| {
        humantime::parse_duration(v).map_err(|e| Error::Duration(v.clone(), e))
    })
}

impl Config {
    /// Merge command line options over the configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or the result has no
    /// controllers, no password or malformed values.
    pub fn resolve(args: &GlobalArgs) -> Result<Self, Error> {
        let file = args
            .config
            .as_deref()
            .map(ConfigFile::read)
            .transpose()?
            .unwrap_or_default();
        Self::merge(args, file)
    }

    fn merge(args: &GlobalArgs, file: ConfigFile) -> Result<Self, Error> {
        let controllers = if args.controllers.is_empty() {
            file.controllers
        } else {
            args.controllers.clone()
        };
        if controllers.is_empty() {
            return Err(Error::NoControllers);
        }
        let controllers = controllers
            .into_iter()
            .map(|c| Url::parse(&c).map_err(|e| Error::InvalidUrl(c, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let username = args
            .username
            .clone()
            .or(file.username)
            .unwrap_or_else(|| DEFAULT_USERNAME.into());
        let password = args
            .password
            .clone()
            .or(file.password)
            .ok_or(Error::MissingPassword)?;

        let system_id = args
            .system_id
            .clone()
            .or(file.system_id)
            .map_or_else(StorageSystemId::default, StorageSystemId::from);

        let timing = &file.timing;
        let health_check_default = HealthCheckSettings::default();
        let availability_default = AvailabilitySettings::default();
        let drive_default = DriveUpgradeSettings::default();

        Ok(Self {
            controllers,
            credentials: ArrayCredentials::new(username, password),
            system_id,
            verify_tls: args.verify_tls.or(file.verify_tls).unwrap_or(false),
            request_timeout: duration(timing.request_timeout.as_ref(), Duration::from_secs(120))?,
            connect_timeout: duration(timing.connect_timeout.as_ref(), Duration::from_secs(5))?,
            upgrade: UpgradeSettings {
                health_check: HealthCheckSettings {
                    poll_interval: duration(
                        timing.health_check_interval.as_ref(),
                        health_check_default.poll_interval,
                    )?,
                },
                ignore_health_check: false,
                availability: AvailabilitySettings {
                    warm_up: duration(timing.warm_up.as_ref(), availability_default.warm_up)?,
                    poll_interval: duration(
                        timing.availability_interval.as_ref(),
                        availability_default.poll_interval,
                    )?,
                    max_retries: timing
                        .max_retries
                        .unwrap_or(availability_default.max_retries),
                    progress_every: timing
                        .progress_every
                        .unwrap_or(availability_default.progress_every),
                },
            },
            drive_upgrade: DriveUpgradeSettings {
                poll_interval: duration(
                    timing.drive_state_interval.as_ref(),
                    drive_default.poll_interval,
                )?,
            },
        })
    }
}
