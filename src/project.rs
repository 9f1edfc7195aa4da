/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::parsers::from_lenient_str_or_empty;
use serde::{Deserialize, Serialize};

/// Link from a project name to the institution that owns it.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct ProjectInstitutionLink {
    #[serde(default, deserialize_with = "from_lenient_str_or_empty")]
    pub projektname: String,

    #[serde(
        default,
        rename(deserialize = "einrichtungsId"),
        deserialize_with = "from_lenient_str_or_empty"
    )]
    pub einrichtungs_id: String,

    /// Full URL of the institution resource
    #[serde(default, deserialize_with = "from_lenient_str_or_empty")]
    pub link: String,
}
