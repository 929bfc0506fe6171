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

use clap::Parser;
use santricity_cli::commands::process_command;
use santricity_cli::commands::Commands;
use santricity_cli::config::Config;
use santricity_cli::config::GlobalArgs;
use santricity_cli::Error;
use tracing_subscriber::EnvFilter;

const RUST_LOG_QUIET_DEFAULTS: &str = "h2=info,hyper=info,hyper_util=info,rustls=info,reqwest=info";

/// SANtricity Web Services tool.
#[derive(Parser, Debug)]
#[command(name = "santricity")]
#[command(about = "SANtricity storage array firmware upgrades and AutoSupport", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

/// `RUST_LOG` if set, `info` otherwise. Chatty HTTP crates stay at
/// `info` when debug or trace is requested globally.
fn env_filter() -> EnvFilter {
    let directives = match EnvFilter::try_from_default_env() {
        Err(_) => format!("info,{RUST_LOG_QUIET_DEFAULTS}"),
        Ok(level) => match level.to_string().as_str() {
            "debug" | "trace" => format!("{level},{RUST_LOG_QUIET_DEFAULTS}"),
            _ => return level,
        },
    };
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    let cli = Cli::parse();
    let config = Config::resolve(&cli.global)?;

    for line in process_command(&cli.command, &config).await? {
        println!("{line}");
    }
    Ok(())
}
