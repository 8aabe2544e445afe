use std::time::Duration;

use anyhow::{Context, anyhow};
use log::debug;
use reqwest::Url;
use tokio::{net::TcpStream, time::timeout};

use crate::{ConnectivityProbe, StdResult};

/// Reports the network as online when a TCP connection to the API host can be opened.
pub struct TcpConnectivityProbe {
    address: String,
    connect_timeout: Duration,
}

impl TcpConnectivityProbe {
    /// Creates a new `TcpConnectivityProbe` for the given address (`host:port`).
    pub fn new(address: &str, connect_timeout: Duration) -> Self {
        Self {
            address: address.to_string(),
            connect_timeout,
        }
    }

    /// Creates a new `TcpConnectivityProbe` for the host of the given URL.
    pub fn try_from_url(url: &str, connect_timeout: Duration) -> StdResult<Self> {
        let url = Url::parse(url).with_context(|| format!("Invalid URL: {url}"))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("Missing host in URL: {url}"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| anyhow!("Missing port in URL: {url}"))?;

        Ok(Self::new(&format!("{host}:{port}"), connect_timeout))
    }
}

#[async_trait::async_trait]
impl ConnectivityProbe for TcpConnectivityProbe {
    async fn is_online(&self) -> bool {
        match timeout(self.connect_timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!("Connectivity probe to {} failed: {e}", self.address);
                false
            }
            Err(_) => {
                debug!("Connectivity probe to {} timed out", self.address);
                false
            }
        }
    }
}

/// A probe that always reports the network as online.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOnline;

#[async_trait::async_trait]
impl ConnectivityProbe for AlwaysOnline {
    async fn is_online(&self) -> bool {
        true
    }
}
