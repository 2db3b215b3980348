//! Outbound TLS connection to the chat server.

use crate::error::TransportError;
use std::io;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{info, warn};

/// Encrypted stream to the chat server.
pub type TlsStream = tokio_rustls::client::TlsStream<TcpStream>;

/// Open a TCP connection to `host:port` and upgrade it to TLS.
pub async fn connect(host: &str, port: u16) -> Result<TlsStream, TransportError> {
    let addr = format!("{host}:{port}");
    let tcp_stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| TransportError::Connect {
            addr: addr.clone(),
            source,
        })?;
    info!(addr = %addr, "TCP connection established");

    upgrade_to_tls(tcp_stream, host).await
}

/// Upgrades a TCP stream to TLS, verifying the server against system roots.
pub async fn upgrade_to_tls(
    tcp_stream: TcpStream,
    hostname: &str,
) -> Result<TlsStream, TransportError> {
    // Load system root certificates
    let mut roots = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs();
    for cert in certs.certs {
        if let Err(e) = roots.add(cert) {
            warn!("Failed to add root cert: {}", e);
        }
    }
    for e in &certs.errors {
        warn!("Error loading native certs: {}", e);
    }

    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| TransportError::Tls(io::Error::other(e)))?
        .with_root_certificates(roots)
        .with_no_client_auth();

    let connector = TlsConnector::from(Arc::new(config));
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|_| TransportError::InvalidServerName(hostname.to_string()))?;

    let tls_stream = connector
        .connect(server_name, tcp_stream)
        .await
        .map_err(TransportError::Tls)?;
    info!(hostname = %hostname, "TLS handshake completed");

    Ok(tls_stream)
}
