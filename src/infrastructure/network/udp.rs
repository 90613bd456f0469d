//! Growl network notification center over UDP

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::net::{lookup_host, UdpSocket};
use tracing::debug;

use crate::application::ports::{NotificationCenter, TransportError};
use crate::domain::config::AuthMethod;
use crate::domain::notification::GrowlMessage;

use super::packet::{PacketCodec, GROWL_UDP_PORT};

/// Sends every posting as a single datagram to a Growl daemon
pub struct UdpNotificationCenter {
    host: String,
    port: u16,
    codec: PacketCodec,
}

impl UdpNotificationCenter {
    /// Create a center for the given host and port
    pub fn new(
        host: impl Into<String>,
        port: u16,
        auth: AuthMethod,
        password: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            codec: PacketCodec::new(auth, password),
        }
    }

    /// Create for a host on the default Growl port
    pub fn with_host(host: impl Into<String>, password: Option<String>) -> Self {
        Self::new(host, GROWL_UDP_PORT, AuthMethod::default(), password)
    }

    pub fn codec(&self) -> &PacketCodec {
        &self.codec
    }

    async fn resolve(&self) -> Result<SocketAddr, TransportError> {
        lookup_host((self.host.as_str(), self.port))
            .await?
            .next()
            .ok_or_else(|| {
                TransportError::SendFailed(format!("Could not resolve host '{}'", self.host))
            })
    }
}

#[async_trait]
impl NotificationCenter for UdpNotificationCenter {
    async fn post(
        &self,
        message: &GrowlMessage,
        _deliver_immediately: bool,
    ) -> Result<(), TransportError> {
        let packet = self
            .codec
            .encode(message)
            .map_err(|e| TransportError::Packet(e.to_string()))?;

        let target = self.resolve().await?;
        let bind_addr: SocketAddr = if target.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };
        let socket = UdpSocket::bind(bind_addr).await?;
        let sent = socket.send_to(&packet, target).await?;

        debug!(
            target = %target,
            kind = %message.name(),
            auth = %self.codec.auth(),
            bytes = sent,
            "Sent Growl packet"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "udp"
    }
}
