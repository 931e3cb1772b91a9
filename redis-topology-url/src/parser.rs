//! Connection string parser.

use crate::error::{UrlError, UrlResult};
use crate::topology::DEFAULT_PORT;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// A single server address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    /// Host name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Borrow as a `(host, port)` pair.
    pub fn as_tuple(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Query-string parameters of a connection string.
///
/// Keys are case-sensitive. When a key repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterTable {
    entries: HashMap<String, String>,
}

impl ParameterTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Insert a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a parameter value, treating empty text as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Check if a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all parameters in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

/// A parsed connection string.
///
/// Grammar: `scheme://host[:port][,host[:port]...][/ignored][?query]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
    scheme: String,
    endpoints: Vec<Endpoint>,
    params: ParameterTable,
}

impl ConnectionString {
    /// Parse a connection string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redis_topology_url::ConnectionString;
    ///
    /// let conn = ConnectionString::parse("redis-sentinel://a:26379,b?name=mymaster").unwrap();
    /// assert_eq!(conn.scheme(), "redis-sentinel:");
    /// assert_eq!(conn.endpoints().len(), 2);
    /// assert_eq!(conn.endpoints()[1].port, 6379);
    /// assert_eq!(conn.param("name"), Some("mymaster"));
    /// ```
    pub fn parse(url: &str) -> UrlResult<Self> {
        debug!(url_len = url.len(), "ConnectionString::parse()");

        let (scheme_name, rest) = url
            .split_once("://")
            .ok_or_else(|| UrlError::format("missing '://' after the scheme"))?;

        if scheme_name.is_empty() || scheme_name.contains(':') {
            return Err(UrlError::format(format!(
                "invalid scheme '{scheme_name}'"
            )));
        }

        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        if authority.is_empty() {
            return Err(UrlError::format("missing host"));
        }

        let endpoints = authority
            .split(',')
            .map(parse_server)
            .collect::<UrlResult<Vec<_>>>()?;

        let params = rest
            .split_once('?')
            .map(|(_, query)| ParameterTable::from_query(query))
            .unwrap_or_default();

        let scheme = format!("{scheme_name}:");
        debug!(scheme = %scheme, endpoints = endpoints.len(), params = params.len(), "Connection string parsed");

        Ok(Self {
            raw: url.to_string(),
            scheme,
            endpoints,
            params,
        })
    }

    /// Get the original, unmodified input.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Get the scheme including its trailing colon.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Get the server endpoints in input order. Never empty.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Get all query parameters.
    pub fn params(&self) -> &ParameterTable {
        &self.params
    }

    /// Get a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }
}

impl std::fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_server(token: &str) -> UrlResult<Endpoint> {
    let (host, port) = match token.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (token, None),
    };

    if host.is_empty() {
        return Err(UrlError::invalid_server(token, "missing host"));
    }

    let port = match port {
        None => DEFAULT_PORT,
        Some(port) if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(UrlError::invalid_server(
                token,
                "port must be a non-negative integer",
            ));
        }
        Some(port) => port
            .parse()
            .map_err(|_| UrlError::invalid_server(token, "port is out of range"))?,
    };

    Ok(Endpoint::new(host, port))
}
