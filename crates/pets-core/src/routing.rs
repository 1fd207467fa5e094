//! Routing helpers for gateway-relative paths.
//!
//! Items leave the gateway with URIs prefixed by the gateway route so the
//! front-end can follow them back through the gateway. A detail request
//! then carries the owning backend name and the item id in fixed, named
//! positions. These helpers centralise both directions.

use crate::error::GatewayError;

/// Prefix an item URI with the gateway route.
///
/// ```
/// # use pets_core::routing::gateway_uri;
/// assert_eq!(gateway_uri("pets", "/dogs/v1/data/1"), "/pets/dogs/v1/data/1");
/// assert_eq!(gateway_uri("pets", "dogs/v1/data/1"), "/pets/dogs/v1/data/1");
/// ```
pub fn gateway_uri(route: &str, original_uri: &str) -> String {
    if original_uri.starts_with('/') || original_uri.is_empty() {
        format!("/{}{}", route, original_uri)
    } else {
        format!("/{}/{}", route, original_uri)
    }
}

/// The named segments of a detail request:
/// `/{route}/{backend}/{version}/{collection}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPath {
    pub backend: String,
    pub version: String,
    pub collection: String,
    pub id: String,
}

impl DetailPath {
    /// Parse the part of the path that follows the gateway route.
    ///
    /// Exactly four non-empty segments are accepted. Segments equal to `.`
    /// or `..`, or containing `?`, `#` or `%`, would change the meaning of
    /// the outbound URL and are refused. Anything else is an
    /// [`GatewayError::InvalidPath`].
    ///
    /// ```
    /// # use pets_core::routing::DetailPath;
    /// let path = DetailPath::parse("dogs/v1/data/1").unwrap();
    /// assert_eq!(path.backend, "dogs");
    /// assert_eq!(path.id, "1");
    /// assert!(DetailPath::parse("dogs/1").is_err());
    /// ```
    pub fn parse(rest: &str) -> Result<Self, GatewayError> {
        let segments: Vec<&str> = rest.trim_start_matches('/').split('/').collect();

        match segments.as_slice() {
            [backend, version, collection, id]
                if segments.iter().all(|s| is_plain_segment(s)) =>
            {
                Ok(Self {
                    backend: backend.to_string(),
                    version: version.to_string(),
                    collection: collection.to_string(),
                    id: id.to_string(),
                })
            }
            _ => Err(GatewayError::InvalidPath(format!(
                "expected {{backend}}/{{version}}/{{collection}}/{{id}}, got '{}'",
                rest
            ))),
        }
    }
}

/// A segment that can be placed in a URL path as-is
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['?', '#', '%'])
}

/// Name of the local host, used in origin records.
///
/// Reads `HOSTNAME`, then `/etc/hostname`, and falls back to `"Unknown"`.
pub fn local_hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        let name = name.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    match std::fs::read_to_string("/etc/hostname") {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => "Unknown".to_string(),
    }
}
