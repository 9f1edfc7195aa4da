/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # simapi
//!
//! Client library for the LRZ SIM directory API.
//!
//! ## Features
//!
//! - Project groups and their members
//! - Project to institution links
//! - Institution, person and user (Kennung) lookups
//! - HTTP Basic authentication from a netrc file
//! - Lower level interface for handling the raw communication ([`ApiClient`])
//!
//! All calls are blocking and perform exactly one GET request. There are no
//! retries; every failure is returned as a [`SimApiError`].
//!
//! ## Usage
//!
//! Credentials are read from `~/.netrc` for the host of the base url:
//!
//! ```text
//! machine simapi.sim.lrz.de login <user> password <password>
//! ```
//!
//! ```no_run
//! use simapi::{Client, ClientConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let client = Client::new(ClientConfig::default())?;
//!
//!     for group in client.list_groups()? {
//!         let members = client.get_group_members(&group, true)?;
//!         println!("{group}: {}", members.join(", "));
//!     }
//!
//!     let user = client.get_user("di38qex")?;
//!     if let Some(lrz_id) = &user.lrz_id {
//!         let person = client.get_person(lrz_id)?;
//!         println!("{:?} {:?}", person.rufname, person.nachname);
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod api;
pub mod auth;
pub mod client;
pub mod errors;
pub mod institution;
mod parsers;
pub mod person;
pub mod project;
pub mod user;

pub use api::{ApiClient, ApiParams, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use auth::{Netrc, NetrcEntry, build_basic_auth_header, load_netrc_credentials};
pub use client::*;
pub use errors::*;
pub use institution::*;
pub use person::*;
pub use project::*;
pub use user::*;
