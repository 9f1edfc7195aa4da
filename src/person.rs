/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::parsers::{from_lenient_str, from_lenient_str_or_empty, from_lenient_str_vec};
use serde::{Deserialize, Serialize};

/// A person known to the LRZ directory, addressed by its LRZ id.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Person {
    #[serde(
        default,
        rename(deserialize = "LRZid"),
        deserialize_with = "from_lenient_str_or_empty"
    )]
    pub lrz_id: String,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub benutzername: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub anrede: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub rufname: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub nachname: Option<String>,

    #[serde(
        default,
        rename(deserialize = "titelPre"),
        deserialize_with = "from_lenient_str"
    )]
    pub titel_pre: Option<String>,

    #[serde(
        default,
        rename(deserialize = "titelPost"),
        deserialize_with = "from_lenient_str"
    )]
    pub titel_post: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub geschlecht: Option<String>,

    /// Account ids (Kennungen) that belong to this person
    #[serde(default, deserialize_with = "from_lenient_str_vec")]
    pub kennungen: Vec<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_for_missing_fields() {
        let person: Person = serde_json::from_value(json!({"LRZid": "X"})).unwrap();
        assert_eq!(person.lrz_id, "X");
        assert_eq!(person.benutzername, None);
        assert!(person.kennungen.is_empty());
    }

    #[test]
    fn empty_object_is_a_default_person() {
        let person: Person = serde_json::from_value(json!({})).unwrap();
        assert_eq!(person, Person::default());
        assert_eq!(person.lrz_id, "");
    }

    #[test]
    fn maps_camel_case_titles() {
        let person: Person = serde_json::from_value(json!({
            "LRZid": "00000000001F17E0",
            "titelPre": "Prof. Dr.",
            "titelPost": "",
            "kennungen": ["di38qex", "ab12cde"]
        }))
        .unwrap();
        assert_eq!(person.titel_pre.as_deref(), Some("Prof. Dr."));
        assert_eq!(person.titel_post.as_deref(), Some(""));
        assert_eq!(person.kennungen, vec!["di38qex", "ab12cde"]);
    }
}
