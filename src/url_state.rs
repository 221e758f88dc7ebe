//! Mapping between [`FilterState`] and the page's query parameters.
//!
//! Values are form-encoded the way the browser's `URLSearchParams` reads them:
//! `+` for spaces, `%XX` escapes, lossy UTF-8 on the way back. Specialties are
//! joined with commas into one `specialties` parameter, so names containing a
//! comma are never stored in a [`FilterState`].

use crate::log;
use crate::types::{ConsultationType, FilterState, SortKey};

pub const PARAM_NAME: &str = "name";
pub const PARAM_CONSULTATION: &str = "consultation";
pub const PARAM_SPECIALTIES: &str = "specialties";
pub const PARAM_SORT: &str = "sort";

pub const SPECIALTY_SEPARATOR: &str = ",";

/// Form-encode one key or value: percent-escapes, with `+` for spaces
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Form-decode one key or value. Malformed escapes are kept as literal text.
pub fn decode_component(value: &str) -> String {
    let spaced = value.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Consultation filter from outside input. Empty or unknown values mean unset.
pub fn consultation_param(value: &str) -> Option<ConsultationType> {
    if value.is_empty() {
        return None;
    }
    let parsed = ConsultationType::parse(value);
    if parsed.is_none() {
        log::warn(&format!("ignoring unknown consultation filter '{}'", value));
    }
    parsed
}

/// Sort key from outside input. Empty or unknown values mean unset.
pub fn sort_param(value: &str) -> Option<SortKey> {
    if value.is_empty() {
        return None;
    }
    let parsed = SortKey::parse(value);
    if parsed.is_none() {
        log::warn(&format!("ignoring unknown sort key '{}'", value));
    }
    parsed
}

/// Split a query string into decoded key/value pairs, keeping their order
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

impl FilterState {
    /// Rebuild the state from key/value pairs. The first occurrence of a key
    /// wins; absent keys and unknown keys leave the defaults in place.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut name = None;
        let mut consultation = None;
        let mut specialties = None;
        let mut sort = None;

        for (key, value) in params {
            let slot = match key.as_ref() {
                PARAM_NAME => &mut name,
                PARAM_CONSULTATION => &mut consultation,
                PARAM_SPECIALTIES => &mut specialties,
                PARAM_SORT => &mut sort,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }

        FilterState {
            search: name.unwrap_or_default(),
            consultation: consultation.as_deref().and_then(consultation_param),
            specialties: specialties
                .map(|joined| {
                    joined
                        .split(SPECIALTY_SEPARATOR)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            sort: sort.as_deref().and_then(sort_param),
        }
    }

    /// Parameters for the non-default fields only, in a fixed order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.search.is_empty() {
            params.push((PARAM_NAME, self.search.clone()));
        }
        if let Some(consultation) = self.consultation {
            params.push((PARAM_CONSULTATION, consultation.as_str().to_string()));
        }
        let specialties: Vec<&str> = self
            .specialties
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        if !specialties.is_empty() {
            params.push((PARAM_SPECIALTIES, specialties.join(SPECIALTY_SEPARATOR)));
        }
        if let Some(sort) = self.sort {
            params.push((PARAM_SORT, sort.as_str().to_string()));
        }
        params
    }

    /// Read the state from a query string such as `?name=rao&sort=fees`
    pub fn from_query(query: &str) -> Self {
        Self::from_params(parse_query(query))
    }

    /// Serialize to a query string without the leading `?`. Default state gives "".
    pub fn to_query(&self) -> String {
        self.to_params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
