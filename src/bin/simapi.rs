/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Command line front end for the SIM API client.
//!
//! Runs exactly one lookup and prints the result as indented JSON. Errors are
//! not retried; they end the process with a non-zero exit code.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dotenvy::dotenv;
use log::LevelFilter;
use simapi::{Client, ClientConfig, DEFAULT_BASE_URL};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Interact with the LRZ SIM API.
#[derive(Parser, Debug)]
#[command(name = "simapi", version)]
struct Cli {
    /// Override the API base URL
    #[arg(long, env = "SIMAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Path to a netrc file for authentication
    #[arg(long, env = "SIMAPI_NETRC")]
    netrc: Option<PathBuf>,

    /// Disable automatic loading of ~/.netrc credentials
    #[arg(long)]
    no_netrc: bool,

    /// Timeout in seconds for API requests
    #[arg(long, env = "SIMAPI_TIMEOUT", default_value_t = 10.0)]
    timeout: f64,

    /// Increase logging verbosity (use -vv for debug logs)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all available project groups
    Groups,

    /// List members of a project group
    GroupMembers {
        /// Name of the group to inspect
        group_name: String,

        /// Resolve nested group memberships
        #[arg(long)]
        solve: bool,
    },

    /// Resolve institution links for a project
    ProjectInstitution {
        /// Project identifier, e.g. pn69ju
        project_name: String,
    },

    /// Fetch institution details by ID
    Institution {
        /// Institution LRZ identifier
        institution_id: String,
    },

    /// Fetch person details by LRZ ID
    Person {
        /// LRZ identifier for the person
        person_id: String,
    },

    /// Fetch user details by username
    User {
        /// SIM username / Kennung
        username: String,
    },
}

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn configure_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbosity))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn run(client: &Client, command: Command) -> Result<serde_json::Value> {
    let value = match command {
        Command::Groups => serde_json::to_value(client.list_groups()?)?,
        Command::GroupMembers { group_name, solve } => {
            serde_json::to_value(client.get_group_members(&group_name, solve)?)?
        }
        Command::ProjectInstitution { project_name } => {
            serde_json::to_value(client.get_project_institution_links(&project_name)?)?
        }
        Command::Institution { institution_id } => {
            serde_json::to_value(client.get_institution(&institution_id)?)?
        }
        Command::Person { person_id } => serde_json::to_value(client.get_person(&person_id)?)?,
        Command::User { username } => serde_json::to_value(client.get_user(&username)?)?,
    };
    Ok(value)
}

/// Indented JSON with non-ASCII text left unescaped
fn render(value: &serde_json::Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    configure_logging(cli.verbose);

    let timeout = Duration::try_from_secs_f64(cli.timeout)
        .with_context(|| format!("Invalid timeout {}", cli.timeout))?;
    let client = Client::new(ClientConfig {
        base_url: cli.base_url,
        timeout,
        netrc_path: cli.netrc,
        use_netrc: !cli.no_netrc,
    })?;

    let result = run(&client, cli.command)?;
    println!("{}", render(&result)?);
    Ok(())
}
