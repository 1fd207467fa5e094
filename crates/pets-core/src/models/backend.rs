//! Backend descriptor model

use serde::{Deserialize, Serialize};

/// A configured provider backend.
///
/// Loaded once at startup and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Logical name, also the `Type` tag stamped on its items
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Path of the collection on the backend (e.g. `/dogs/v1/data`)
    #[serde(default)]
    pub context: String,
}

impl BackendDescriptor {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        context: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            context: context.into(),
        }
    }

    /// `http://{host}:{port}{context}`
    pub fn collection_url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.context)
    }

    /// `http://{host}:{port}{context}/{id}`
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}
