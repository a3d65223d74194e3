//! TLS material loading for both sessions: the inbound server identity and
//! the outbound trust root.

use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use anyhow::Context;
use rustls::{ClientConfig, RootCertStore, ServerConfig};
use tokio_rustls::{TlsAcceptor, TlsConnector};

use crate::config::TlsConfig;

/// Makes `ring` the process-wide crypto provider. Safe to call repeatedly.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Builds the server config from a PEM certificate chain and private key.
pub fn load_server_config(cert_path: &str, key_path: &str) -> anyhow::Result<ServerConfig> {
    let mut cert_file = BufReader::new(
        File::open(cert_path)
            .with_context(|| format!("failed to open certificate file {}", cert_path))?,
    );
    let mut key_file = BufReader::new(
        File::open(key_path)
            .with_context(|| format!("failed to open private key file {}", key_path))?,
    );

    let certs = rustls_pemfile::certs(&mut cert_file)
        .collect::<Result<Vec<_>, _>>()
        .context("failed to read certificate")?;

    if certs.is_empty() {
        anyhow::bail!("no certificate found in {}", cert_path);
    }

    let key = rustls_pemfile::private_key(&mut key_file)
        .context("failed to read private key")?
        .with_context(|| format!("no private key found in {}", key_path))?;

    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .context("failed to create TLS server config")?;

    Ok(config)
}

/// Acceptor for the inbound listener.
pub fn acceptor(cfg: &TlsConfig) -> anyhow::Result<TlsAcceptor> {
    let config = load_server_config(&cfg.cert_path, &cfg.key_path)?;
    Ok(TlsAcceptor::from(Arc::new(config)))
}

/// Reads every certificate in a PEM bundle into a root store.
///
/// Only the bundle is trusted; no platform roots are added.
pub fn load_root_store(ca_bundle: &str) -> anyhow::Result<RootCertStore> {
    let mut reader = BufReader::new(
        File::open(ca_bundle).with_context(|| format!("failed to open CA bundle {}", ca_bundle))?,
    );

    let mut roots = RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut reader) {
        let cert = cert.context("failed to read CA certificate")?;
        roots.add(cert).context("invalid CA certificate")?;
    }

    if roots.is_empty() {
        anyhow::bail!("no certificates found in {}", ca_bundle);
    }

    Ok(roots)
}

/// Connector that verifies peers against the given CA bundle.
pub fn connector(ca_bundle: &str) -> anyhow::Result<TlsConnector> {
    install_crypto_provider();

    let roots = load_root_store(ca_bundle)?;
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    Ok(TlsConnector::from(Arc::new(config)))
}
