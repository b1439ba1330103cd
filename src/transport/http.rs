//! Default HTTP client construction

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overall timeout for a single request, in seconds
pub const DEFAULT_HTTP_TIMEOUT: u64 = 120;
/// Timeout for establishing a connection, in seconds
pub const DEFAULT_DIAL_TIMEOUT: u64 = 60;
/// Keep-alive period for an active connection, in seconds
pub const DEFAULT_KEEPALIVE_TIMEOUT: u64 = 60;
pub const DEFAULT_MAX_IDLE_CONNS: usize = 100;
/// How long an idle connection stays in the pool, in seconds
pub const DEFAULT_IDLE_CONN_TIMEOUT: u64 = 100;
pub const DEFAULT_TLS_HANDSHAKE_TIMEOUT: u64 = 60;
pub const DEFAULT_EXPECT_CONTINUE_TIMEOUT: u64 = 1;

/// Timeouts and pool limits applied to the default HTTP client.
///
/// reqwest covers the TLS handshake with the connect timeout and never sends
/// `Expect: 100-continue`, so `tls_handshake_timeout` and
/// `expect_continue_timeout` are carried for configuration parity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    pub timeout: u64,
    pub dial_timeout: u64,
    pub keepalive: u64,
    pub max_idle_conns: usize,
    pub idle_conn_timeout: u64,
    pub tls_handshake_timeout: u64,
    pub expect_continue_timeout: u64,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            keepalive: DEFAULT_KEEPALIVE_TIMEOUT,
            max_idle_conns: DEFAULT_MAX_IDLE_CONNS,
            idle_conn_timeout: DEFAULT_IDLE_CONN_TIMEOUT,
            tls_handshake_timeout: DEFAULT_TLS_HANDSHAKE_TIMEOUT,
            expect_continue_timeout: DEFAULT_EXPECT_CONTINUE_TIMEOUT,
        }
    }
}

impl TransportSettings {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn build_client(&self) -> Result<reqwest::Client> {
        // The TLS handshake happens inside the connector, so the connect
        // timeout must cover whichever of the two is longer.
        let connect_timeout = self.dial_timeout.max(self.tls_handshake_timeout);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            .tcp_keepalive(Duration::from_secs(self.keepalive))
            .pool_max_idle_per_host(self.max_idle_conns)
            .pool_idle_timeout(Duration::from_secs(self.idle_conn_timeout))
            .build()?;

        Ok(client)
    }
}

/// HTTP client used when the caller does not supply one
pub fn new_http_client() -> Result<reqwest::Client> {
    TransportSettings::default().build_client()
}
