/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::parsers::{
    from_lenient_i64, from_lenient_map, from_lenient_str, from_lenient_str_or_empty,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Holds information returned from the User API for a single account (Kennung).
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct User {
    #[serde(default, deserialize_with = "from_lenient_str_or_empty")]
    pub kennung: String,

    /// LRZ id of the person owning this account
    #[serde(
        default,
        rename(deserialize = "mwnlrzid"),
        deserialize_with = "from_lenient_str"
    )]
    pub lrz_id: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_i64")]
    pub status_num: Option<i64>,

    #[serde(default, deserialize_with = "from_lenient_i64")]
    pub validpwd: Option<i64>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub uid: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub gid: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub projekt: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub kennungstyp: Option<String>,

    /// Free-form attributes; the API does not fix their shape
    #[serde(default, deserialize_with = "from_lenient_map")]
    pub daten: Map<String, Value>,
}
