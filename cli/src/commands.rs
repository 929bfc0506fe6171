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

//! Command-line entry points.
//!
//! - `auto-support`: trigger bundles, list jobs, show or update the
//!   AutoSupport configuration.
//! - `controller-firmware upgrade`: health check, upload and wait for
//!   all controllers to come back.
//! - `drive-firmware upgrade`: upload and apply drive firmware to the
//!   compatible optimal drives.
//!
//! Every command returns the lines to print on success.

use crate::config::Config;
use crate::Array;
use crate::Error;
use clap::Subcommand;
use santricity::auto_support::AutoSupport;
use santricity::auto_support::AutoSupportConfiguration;
use santricity::auto_support::JobId;
use santricity::availability::Availability;
use santricity::controller_firmware::ControllerFirmware;
use santricity::controller_firmware::UpgradeSettings;
use santricity::drive_firmware::Drive;
use santricity::drive_firmware::DriveFirmware;
use santricity::drive_firmware::DriveRef;
use santricity::Controller;
use santricity_array_http::reqwest::Client;
use santricity_array_http::reqwest::ClientParams;
use santricity_array_http::HttpArray;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Tool commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// AutoSupport bundles and configuration.
    #[command(subcommand)]
    AutoSupport(AutoSupportCommands),
    /// Controller firmware.
    #[command(subcommand)]
    ControllerFirmware(ControllerFirmwareCommands),
    /// Drive firmware.
    #[command(subcommand)]
    DriveFirmware(DriveFirmwareCommands),
}

#[derive(Subcommand, Debug)]
pub enum AutoSupportCommands {
    /// Trigger an AutoSupport bundle and show the job collecting it.
    Trigger {
        /// AutoSupport operation type.
        operation_type: String,
        /// AutoSupport dispatch type.
        dispatch_type: String,
    },
    /// Show AutoSupport jobs.
    Jobs {
        /// Job of a prior bundle request. All jobs are shown when
        /// omitted.
        #[arg(long)]
        job_id: Option<String>,
    },
    /// AutoSupport configuration.
    #[command(subcommand)]
    Config(AutoSupportConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum AutoSupportConfigCommands {
    /// Show the current configuration.
    Show,
    /// Update the configuration and show the result.
    Update {
        /// JSON configuration file. AutoSupport is just enabled when
        /// omitted.
        configuration_file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ControllerFirmwareCommands {
    /// Upgrade controller firmware.
    Upgrade {
        /// Firmware bundle (`.dlp`).
        file: PathBuf,
        /// Upgrade even if the health check fails.
        #[arg(long)]
        ignore_health_check: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DriveFirmwareCommands {
    /// Upgrade drive firmware.
    Upgrade {
        /// Drive firmware file.
        file: PathBuf,
        /// Only upgrade drive with this reference. Repeat for several
        /// drives. All drives are considered when omitted.
        #[arg(long = "drive")]
        drives: Vec<String>,
    },
}

fn controllers(config: &Config) -> Result<Vec<Controller<Array>>, Error> {
    let client = Client::with_params(
        ClientParams::new()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .accept_invalid_certs(!config.verify_tls),
    )
    .map_err(Error::Client)?;
    Ok(config
        .controllers
        .iter()
        .map(|url| {
            let array = HttpArray::new(client.clone(), url.clone(), config.credentials.clone());
            Controller::new(url.as_str(), Arc::new(array))
        })
        .collect())
}

fn primary(config: &Config) -> Result<Arc<Array>, Error> {
    controllers(config)?
        .into_iter()
        .next()
        .map(|c| c.array())
        .ok_or(Error::NoControllers)
}

fn to_lines<T: Serialize>(value: &T) -> Result<Vec<String>, Error> {
    serde_json::to_string_pretty(value)
        .map(|s| s.lines().map(ToString::to_string).collect())
        .map_err(Error::Output)
}

fn read_auto_support_configuration(fname: &Path) -> Result<AutoSupportConfiguration, Error> {
    let file = File::open(fname).map_err(|e| Error::Io(fname.into(), e))?;
    serde_json::from_reader(file).map_err(|e| Error::Json(fname.into(), e))
}

/// Process a tool command.
///
/// # Errors
///
/// Returns an error if command processing fails.
pub async fn process_command(command: &Commands, config: &Config) -> Result<Vec<String>, Error> {
    match command {
        Commands::AutoSupport(command) => auto_support(command, config).await,
        Commands::ControllerFirmware(ControllerFirmwareCommands::Upgrade {
            file,
            ignore_health_check,
        }) => {
            let firmware = ControllerFirmware::new(
                controllers(config)?,
                config.system_id.clone(),
                UpgradeSettings {
                    ignore_health_check: *ignore_health_check,
                    ..config.upgrade.clone()
                },
            )?;
            let report = firmware.upgrade(file).await?;
            Ok(report
                .into_iter()
                .map(|c| match c.availability {
                    Availability::Online {
                        attempts,
                        firmware_version,
                    } => format!(
                        "{}: online after {attempts} attempts, firmware {}",
                        c.controller,
                        firmware_version.as_deref().unwrap_or("unknown")
                    ),
                    Availability::Offline { attempts } => {
                        format!("{}: offline after {attempts} attempts", c.controller)
                    }
                })
                .collect())
        }
        Commands::DriveFirmware(DriveFirmwareCommands::Upgrade { file, drives }) => {
            let service = DriveFirmware::new(
                primary(config)?,
                config.system_id.clone(),
                config.drive_upgrade.clone(),
            );
            let selected = if drives.is_empty() {
                None
            } else {
                Some(select_drives(&service.drives().await?, drives)?)
            };
            match service.upgrade(file, selected.as_deref()).await? {
                Some(state) => Ok(vec![format!(
                    "drive firmware upgrade finished: {}",
                    state.overall_status
                )]),
                None => Ok(vec![
                    "firmware is not compatible with any selected drive".into()
                ]),
            }
        }
    }
}

async fn auto_support(command: &AutoSupportCommands, config: &Config) -> Result<Vec<String>, Error> {
    let service = AutoSupport::new(primary(config)?);
    match command {
        AutoSupportCommands::Trigger {
            operation_type,
            dispatch_type,
        } => to_lines(&service.trigger(operation_type, dispatch_type).await?),
        AutoSupportCommands::Jobs { job_id: Some(id) } => {
            to_lines(&service.job(&JobId::new(id.as_str())).await?)
        }
        AutoSupportCommands::Jobs { job_id: None } => to_lines(&service.jobs().await?),
        AutoSupportCommands::Config(AutoSupportConfigCommands::Show) => {
            to_lines(&service.configuration().await?)
        }
        AutoSupportCommands::Config(AutoSupportConfigCommands::Update { configuration_file }) => {
            let configuration = match configuration_file {
                Some(fname) => {
                    info!(file = %fname.display(), "using AutoSupport configuration file");
                    read_auto_support_configuration(fname)?
                }
                None => AutoSupportConfiguration::enabled(),
            };
            to_lines(&service.update_configuration(&configuration).await?)
        }
    }
}

/// Drives of `all` with the given references, in the given order.
fn select_drives(all: &[Drive], refs: &[String]) -> Result<Vec<Drive>, Error> {
    refs.iter()
        .map(|r| {
            let wanted = DriveRef::new(r.as_str());
            all.iter()
                .find(|d| d.drive_ref == wanted)
                .cloned()
                .ok_or_else(|| Error::UnknownDrive(r.clone()))
        })
        .collect()
}
