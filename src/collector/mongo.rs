//! Long-lived MongoDB session used to issue `top`.
//!
//! There is no reconnect logic: a failed command is fatal to the monitor,
//! which is restarted instead.

use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::sync::Client;
use tracing::{debug, info};

use super::{CollectError, TopSource};

/// Application name reported to the server.
const APP_NAME: &str = "mgotop";

/// Connection to a single `mongod`.
pub struct MongoSource {
    client: Client,
    host: String,
    port: u16,
}

impl MongoSource {
    /// Opens a session to `host:port` and verifies it with `ping`.
    ///
    /// `timeout` bounds both the TCP connect and server selection, so an
    /// unreachable server fails here rather than on the first sample.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, CollectError> {
        let uri = connection_uri(host, port, timeout);
        debug!(%uri, "connecting");

        let client =
            Client::with_uri_str(&uri).map_err(|e| CollectError::Connection(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .run()
            .map_err(|e| CollectError::Connection(e.to_string()))?;

        info!(host, port, "connected to MongoDB");

        Ok(Self {
            client,
            host: host.to_string(),
            port,
        })
    }
}

impl TopSource for MongoSource {
    fn run_top(&mut self) -> Result<Document, CollectError> {
        self.client
            .database("admin")
            .run_command(doc! { "top": 1 })
            .run()
            .map_err(|e| CollectError::Command(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("mongodb {}:{}", self.host, self.port)
    }
}

/// Builds the `mongodb://` URI for a direct connection.
fn connection_uri(host: &str, port: u16, timeout: Duration) -> String {
    let ms = timeout.as_millis().max(1);
    let host = if host.contains(':') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    format!(
        "mongodb://{}:{}/?directConnection=true&serverSelectionTimeoutMS={}&connectTimeoutMS={}&appName={}",
        host, port, ms, ms, APP_NAME
    )
}
