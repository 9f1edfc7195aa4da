/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::errors::SimApiError;
use crate::parsers::value_to_string;
use log::{debug, error};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

// Root SIM API
pub const DEFAULT_BASE_URL: &str = "https://simapi.sim.lrz.de";

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameters appended to a request url
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Directly communicates with the API.
///
/// Performs blocking GET requests and hands back the decoded JSON; the typed
/// accessors live on [`crate::Client`].
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    auth_header: Option<String>,
    https_client: reqwest::blocking::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`. Trailing slashes are removed.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth_header: Option<String>,
    ) -> Result<Self, SimApiError> {
        let https_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SimApiError::Client)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            auth_header,
            https_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }

    pub(crate) fn set_auth_header(&mut self, auth_header: Option<String>) {
        self.auth_header = auth_header;
    }

    /// Joins `endpoint` onto the base url with exactly one slash and appends the
    /// form encoded query, if any.
    pub fn build_url(&self, endpoint: &str, params: Option<&ApiParams<'_>>) -> String {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        match params {
            Some(params) if !params.is_empty() => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(params.iter())
                    .finish();
                format!("{url}?{query}")
            }
            _ => url,
        }
    }

    /// Performs a get request to the SIM API and decodes the JSON body
    pub fn get_json(
        &self,
        endpoint: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Value, SimApiError> {
        let url = self.build_url(endpoint, params);
        debug!("Performing GET request to {url}");

        let mut req = self
            .https_client
            .get(&url)
            .header(ACCEPT, "application/json");
        if let Some(auth_header) = &self.auth_header {
            req = req.header(AUTHORIZATION, auth_header.as_str());
        }

        let request_failed = |source: reqwest::Error| {
            error!("Request to {url} failed: {source}");
            SimApiError::Request {
                url: url.clone(),
                source,
            }
        };
        let resp = req.send().map_err(request_failed)?;

        let status = resp.status().as_u16();
        debug!("Received response with status {status}");
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp.bytes().map_err(request_failed)?;

        if status >= 400 {
            let message = extract_error_message(&body, &content_type, status);
            return Err(SimApiError::Http { status, message });
        }
        serde_json::from_slice(&body).map_err(SimApiError::ExpectedJson)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("auth_header", &self.auth_header.as_ref().map(|_| "xxx"))
            .finish()
    }
}

// Envelope most SIM endpoints wrap their payload in
#[derive(Deserialize, Debug)]
struct ResponseBody {
    #[serde(default)]
    code: Option<Value>,

    #[serde(default)]
    message: Option<Value>,

    #[serde(default)]
    data: Option<Value>,
}

impl ResponseBody {
    fn from_payload(payload: Value) -> Result<Self, SimApiError> {
        if !payload.is_object() {
            return Err(SimApiError::UnexpectedPayload("structure"));
        }
        Ok(serde_json::from_value(payload)?)
    }

    /// Only code 0 carries usable data
    fn into_data(self) -> Result<Option<Value>, SimApiError> {
        let code = self.code.unwrap_or(Value::Null);
        if code.as_f64() == Some(0.0) {
            return Ok(self.data);
        }
        let message = match self.message {
            None | Some(Value::Null) => "Unknown error".to_string(),
            Some(message) => value_to_string(&message),
        };
        Err(SimApiError::ApiResponse {
            code: value_to_string(&code),
            message,
        })
    }
}

/// Unwraps an enveloped payload whose data is a list of records.
///
/// Missing data is an empty list and a lone object is a one element list.
pub(crate) fn unwrap_list(payload: Value) -> Result<Vec<Value>, SimApiError> {
    Ok(match ResponseBody::from_payload(payload)?.into_data()? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    })
}

/// Unwraps an enveloped payload that must hold exactly one object, either bare
/// or as the only element of a list.
pub(crate) fn unwrap_single(payload: Value) -> Result<Map<String, Value>, SimApiError> {
    let item = match ResponseBody::from_payload(payload)?.into_data()? {
        Some(Value::Array(mut items)) => {
            if items.len() != 1 {
                return Err(SimApiError::ExpectedSingleResult(items.len()));
            }
            items.remove(0)
        }
        Some(other) => other,
        None => return Err(SimApiError::UnexpectedPayload("structure")),
    };
    match item {
        Value::Object(map) => Ok(map),
        _ => Err(SimApiError::UnexpectedPayload("structure")),
    }
}

// Empty strings, zero, null and empty containers do not count as a message
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Builds the message for a failed (>= 400) response
pub(crate) fn extract_error_message(body: &[u8], content_type: &str, status: u16) -> String {
    let text = String::from_utf8_lossy(body).into_owned();
    if content_type.contains("application/json") {
        if let Ok(Value::Object(payload)) = serde_json::from_str::<Value>(&text) {
            return ["message", "error"]
                .iter()
                .filter_map(|key| payload.get(*key))
                .find(|v| is_truthy(v))
                .map(value_to_string)
                .unwrap_or(text);
        }
    }
    if text.is_empty() {
        format!("Request failed with status {status}")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(base_url, DEFAULT_TIMEOUT, None).unwrap()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = client("https://simapi.sim.lrz.de//");
        assert_eq!(api.base_url(), "https://simapi.sim.lrz.de");
        assert_eq!(
            api.build_url("/service/AI/groups", None),
            "https://simapi.sim.lrz.de/service/AI/groups"
        );
        assert_eq!(
            api.build_url("person/1", None),
            "https://simapi.sim.lrz.de/person/1"
        );
    }

    #[test]
    fn query_is_form_encoded() {
        let api = client(DEFAULT_BASE_URL);
        assert_eq!(
            api.build_url("/einrichtung", Some(&[("projektname", "pn 69&ju")])),
            "https://simapi.sim.lrz.de/einrichtung?projektname=pn+69%26ju"
        );
        assert_eq!(
            api.build_url("/einrichtung", Some(&[])),
            "https://simapi.sim.lrz.de/einrichtung"
        );
    }

    #[test]
    fn debug_hides_auth_header() {
        let api = ApiClient::new(
            DEFAULT_BASE_URL,
            DEFAULT_TIMEOUT,
            Some("Basic c2VjcmV0".into()),
        )
        .unwrap();
        let rendered = format!("{api:?}");
        assert!(!rendered.contains("c2VjcmV0"));
        assert!(api.is_authenticated());
    }

    #[test]
    fn list_envelope_shapes() {
        let payload = json!({"code": 0, "message": "OK", "data": [{"a": 1}, {"a": 2}]});
        let items = unwrap_list(payload).unwrap();
        assert_eq!(items.len(), 2);

        let items = unwrap_list(json!({"code": 0, "data": {"a": 1}})).unwrap();
        assert_eq!(items, vec![json!({"a": 1})]);

        assert!(unwrap_list(json!({"code": 0})).unwrap().is_empty());
        assert!(unwrap_list(json!({"code": 0, "data": null})).unwrap().is_empty());
    }

    #[test]
    fn single_envelope_shapes() {
        let bare = unwrap_single(json!({"code": 0, "data": {"LRZid": "X"}})).unwrap();
        let listed = unwrap_single(json!({"code": 0, "data": [{"LRZid": "X"}]})).unwrap();
        assert_eq!(bare, listed);

        let err = unwrap_single(json!({"code": 0, "data": []})).unwrap_err();
        assert!(matches!(err, SimApiError::ExpectedSingleResult(0)));
        let err = unwrap_single(json!({"code": 0, "data": [{}, {}]})).unwrap_err();
        assert!(err.to_string().contains("exactly one result"));

        let err = unwrap_single(json!({"code": 0})).unwrap_err();
        assert!(matches!(err, SimApiError::UnexpectedPayload(_)));
        let err = unwrap_single(json!({"code": 0, "data": "text"})).unwrap_err();
        assert!(matches!(err, SimApiError::UnexpectedPayload(_)));
    }

    #[test]
    fn non_zero_code_is_an_error() {
        let payload = json!({"code": 3, "message": "Projekt unbekannt", "data": []});
        let err = unwrap_list(payload).unwrap_err();
        assert_eq!(err.to_string(), "API returned error code 3: Projekt unbekannt");

        let err = unwrap_single(json!({"data": {}})).unwrap_err();
        assert_eq!(err.to_string(), "API returned error code null: Unknown error");
    }

    #[test]
    fn envelope_must_be_an_object() {
        let err = unwrap_list(json!(["a"])).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response payload structure");
    }

    #[test]
    fn error_message_from_json_body() {
        let body = br#"{"message": "Internal error"}"#;
        assert_eq!(
            extract_error_message(body, "application/json; charset=utf-8", 500),
            "Internal error"
        );

        let body = br#"{"message": "", "error": "Forbidden"}"#;
        assert_eq!(extract_error_message(body, "application/json", 403), "Forbidden");

        let body = br#"{"detail": "nope"}"#;
        assert_eq!(
            extract_error_message(body, "application/json", 400),
            r#"{"detail": "nope"}"#
        );
    }

    #[test]
    fn error_message_from_text_body() {
        assert_eq!(extract_error_message(b"Bad Gateway", "text/plain", 502), "Bad Gateway");
        assert_eq!(
            extract_error_message(br#"{"message": "x"}"#, "text/html", 500),
            r#"{"message": "x"}"#
        );
        assert_eq!(
            extract_error_message(b"", "", 404),
            "Request failed with status 404"
        );
    }
}
