//! Request-parameter reader

use crate::probe::Probe;
use reqwest::Url;

// Any absolute base works; only the query component is read
const QUERY_BASE: &str = "http://localhost/";

/// Decoded query-string parameters of the current request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, String)>,
}

impl RequestParams {
    /// Parameters from a full page URL; an unparsable URL has no parameters
    pub fn from_url(url: &str) -> Self {
        match Url::parse(url) {
            Ok(url) => Self::from_parsed(&url),
            Err(_) => Self::default(),
        }
    }

    /// Parameters from a raw query string, with or without the leading `?`
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        match Url::parse(QUERY_BASE) {
            Ok(mut url) => {
                url.set_query(Some(query));
                Self::from_parsed(&url)
            }
            Err(_) => Self::default(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    fn from_parsed(url: &Url) -> Self {
        Self {
            pairs: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Look up the primary parameter, then the fallback one
///
/// Empty values count as absent.
pub fn read_request_params(params: &RequestParams, primary: &str, fallback: &str) -> Probe {
    [primary, fallback]
        .into_iter()
        .filter_map(|name| params.get(name))
        .find(|value| !value.is_empty())
        .map(|value| Probe::from_value(Some(value.to_string())))
        .unwrap_or(Probe::Absent)
}
