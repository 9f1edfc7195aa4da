/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::parsers::{
    from_address_list, from_lenient_bool, from_lenient_str, from_lenient_str_or_empty,
    from_lenient_str_vec,
};
use serde::{Deserialize, Serialize};

/// Details about an institution (Einrichtung) within the LRZ directory.
///
/// Returned by [`crate::Client::get_institution`]. Fields the API omits stay
/// `None` or empty.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Institution {
    #[serde(
        default,
        rename(deserialize = "LRZid"),
        deserialize_with = "from_lenient_str_or_empty"
    )]
    pub lrz_id: String,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub name: Option<String>,

    #[serde(
        default,
        rename(deserialize = "parent_lrzId"),
        deserialize_with = "from_lenient_str_vec"
    )]
    pub parent_ids: Vec<String>,

    #[serde(
        default,
        rename(deserialize = "parent_link"),
        deserialize_with = "from_lenient_str_vec"
    )]
    pub parent_links: Vec<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub bezeichnung: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub nutzerklasse: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub mwnintern: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str_vec")]
    pub kostenabrechnung: Vec<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub einrichtungsart: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub einrichtungstyp: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adsorgpraefix: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub importiert: Option<String>,

    #[serde(default, deserialize_with = "from_address_list")]
    pub anschriften: Vec<InstitutionAddress>,

    #[serde(
        default,
        rename(deserialize = "chef_lrzId"),
        deserialize_with = "from_lenient_str"
    )]
    pub chef_lrz_id: Option<String>,

    #[serde(
        default,
        rename(deserialize = "chef_link"),
        deserialize_with = "from_lenient_str_vec"
    )]
    pub chef_links: Vec<String>,
}

/// A postal address block (Anschrift) attached to an [`Institution`].
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct InstitutionAddress {
    #[serde(default, deserialize_with = "from_lenient_str")]
    pub typ: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub strasse: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub plz: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub ort: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub land: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub postfach: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adresszusatz: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub co: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub person: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub kennung: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub postverteilschluessel: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adressat1: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adressat2: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adressat3: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub adressat4: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "from_lenient_bool")]
    pub geerbt: Option<bool>,

    #[serde(default, deserialize_with = "from_lenient_str")]
    pub person_link: Option<String>,
}
