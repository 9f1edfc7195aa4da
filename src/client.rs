/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, unwrap_list, unwrap_single};
use crate::auth::{build_basic_auth_header, load_netrc_credentials};
use crate::errors::{NetrcError, SimApiError};
use crate::parsers::value_to_string;
use crate::{Institution, Person, ProjectInstitutionLink, User};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Settings used to construct a [`Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,

    /// netrc file to read credentials from instead of `~/.netrc`
    pub netrc_path: Option<PathBuf>,

    /// Look for credentials in `~/.netrc` when no explicit path is given
    pub use_netrc: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            netrc_path: None,
            use_netrc: true,
        }
    }
}

/// Client for the SIM API.
///
/// Every accessor performs one blocking GET request and converts the answer
/// into the matching record type.
///
/// ```no_run
/// use simapi::{Client, ClientConfig};
///
/// # fn main() -> Result<(), simapi::SimApiError> {
/// let client = Client::new(ClientConfig::default())?;
/// for link in client.get_project_institution_links("pn69ju")? {
///     let institution = client.get_institution(&link.einrichtungs_id)?;
///     println!("{:?}", institution.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_client: ApiClient,
}

impl Client {
    /// Creates a new client.
    ///
    /// Credentials are taken from the netrc file when `use_netrc` is set or a
    /// `netrc_path` is given. A missing file or a missing entry is logged and the
    /// client continues without authentication.
    pub fn new(config: ClientConfig) -> Result<Self, SimApiError> {
        let mut api_client = ApiClient::new(&config.base_url, config.timeout, None)?;

        if config.use_netrc || config.netrc_path.is_some() {
            match load_netrc_credentials(api_client.base_url(), config.netrc_path.as_deref()) {
                Ok((username, password)) => {
                    api_client.set_auth_header(Some(build_basic_auth_header(&username, &password)));
                }
                Err(err @ NetrcError::NotFound(_)) => {
                    debug!("No netrc file found; continuing without authentication ({err})");
                }
                Err(err) => {
                    debug!("Skipping netrc credentials: {err}");
                }
            }
        }

        Ok(Self { api_client })
    }

    /// Replaces any netrc credentials with the given username and password
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.api_client
            .set_auth_header(Some(build_basic_auth_header(username, password)));
        self
    }

    /// Lower level access to the raw JSON requests
    pub fn api_client(&self) -> &ApiClient {
        &self.api_client
    }

    /// Returns all available project groups
    pub fn list_groups(&self) -> Result<Vec<String>, SimApiError> {
        let data = self.api_client.get_json("/service/AI/groups", None)?;
        string_list(data).ok_or(SimApiError::UnexpectedPayload("for groups endpoint"))
    }

    /// Returns the user names assigned to a group.
    ///
    /// With `solve` the server also expands members of nested groups.
    pub fn get_group_members(
        &self,
        group_name: &str,
        solve: bool,
    ) -> Result<Vec<String>, SimApiError> {
        let endpoint = format!("/service/AI/groups/{}/members", urlencoding::encode(group_name));
        let params = [("solve", if solve { "true" } else { "false" })];
        let data = self.api_client.get_json(&endpoint, Some(&params))?;
        string_list(data).ok_or(SimApiError::UnexpectedPayload("for group members endpoint"))
    }

    /// Returns the institution links of a project
    pub fn get_project_institution_links(
        &self,
        project_name: &str,
    ) -> Result<Vec<ProjectInstitutionLink>, SimApiError> {
        let payload = self
            .api_client
            .get_json("/einrichtung", Some(&[("projektname", project_name)]))?;
        unwrap_list(payload)?
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(SimApiError::from))
            .collect()
    }

    /// Returns the details of one institution
    pub fn get_institution(&self, einrichtungs_id: &str) -> Result<Institution, SimApiError> {
        self.single(&format!("/einrichtung/{}", urlencoding::encode(einrichtungs_id)))
    }

    /// Returns a person by LRZ id
    pub fn get_person(&self, person_id: &str) -> Result<Person, SimApiError> {
        self.single(&format!("/person/{}", urlencoding::encode(person_id)))
    }

    /// Returns an account by user name (Kennung). This endpoint is not enveloped.
    pub fn get_user(&self, username: &str) -> Result<User, SimApiError> {
        let data = self
            .api_client
            .get_json(&format!("/user/{}", urlencoding::encode(username)), None)?;
        if !data.is_object() {
            return Err(SimApiError::UnexpectedPayload("for user endpoint"));
        }
        Ok(serde_json::from_value(data)?)
    }

    // Fetches an enveloped endpoint that must resolve to a single record
    fn single<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SimApiError> {
        let payload = self.api_client.get_json(endpoint, None)?;
        let item = unwrap_single(payload)?;
        Ok(serde_json::from_value(Value::Object(item))?)
    }
}

fn string_list(data: Value) -> Option<Vec<String>> {
    match data {
        Value::Array(items) => Some(items.iter().map(value_to_string).collect()),
        _ => None,
    }
}
