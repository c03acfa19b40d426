//! Connection-level transport settings.

use reqwest::{Certificate, ClientBuilder};
use std::{net::IpAddr, time::Duration};

/// Custom transport applied to the per-request client.
///
/// Ignored when TLS verification is skipped: the two are alternative ways of
/// configuring the connection layer.
#[derive(Debug, Clone, Default)]
pub struct Transport {
    /// Timeout for establishing the connection only.
    pub connect_timeout: Option<Duration>,
    /// How long idle pooled connections are kept.
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: Option<usize>,
    /// TCP keepalive interval.
    pub tcp_keepalive: Option<Duration>,
    /// Set `TCP_NODELAY`.
    pub tcp_nodelay: Option<bool>,
    /// Restrict the client to HTTP/1.
    pub http1_only: bool,
    /// Local address to bind outgoing connections to.
    pub local_address: Option<IpAddr>,
    /// Extra trusted root certificates.
    pub root_certificates: Vec<Certificate>,
}

impl Transport {
    pub(crate) fn apply(&self, mut builder: ClientBuilder) -> ClientBuilder {
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(idle) = self.pool_idle_timeout {
            builder = builder.pool_idle_timeout(idle);
        }
        if let Some(max) = self.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(max);
        }
        if let Some(interval) = self.tcp_keepalive {
            builder = builder.tcp_keepalive(interval);
        }
        if let Some(nodelay) = self.tcp_nodelay {
            builder = builder.tcp_nodelay(nodelay);
        }
        if self.http1_only {
            builder = builder.http1_only();
        }
        if let Some(addr) = self.local_address {
            builder = builder.local_address(addr);
        }
        for cert in &self.root_certificates {
            builder = builder.add_root_certificate(cert.clone());
        }
        builder
    }
}

/// How the client treats TLS.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Library defaults.
    #[default]
    Verify,
    /// Accept invalid certificates.
    SkipVerify,
    /// Library TLS defaults plus a custom transport.
    Custom(Transport),
}

impl TlsMode {
    /// Pick the mode from the request toggles; skip-verify wins over a transport.
    pub fn resolve(insecure_skip_verify: bool, transport: Option<Transport>) -> Self {
        match (insecure_skip_verify, transport) {
            (true, _) => TlsMode::SkipVerify,
            (false, Some(t)) => TlsMode::Custom(t),
            (false, None) => TlsMode::Verify,
        }
    }

    pub(crate) fn apply(&self, builder: ClientBuilder) -> ClientBuilder {
        match self {
            TlsMode::Verify => builder,
            TlsMode::SkipVerify => builder.danger_accept_invalid_certs(true),
            TlsMode::Custom(transport) => transport.apply(builder),
        }
    }
}
