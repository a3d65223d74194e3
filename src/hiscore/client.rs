//! Upstream hiscore client
//!
//! Opens a verified TLS session to the hiscore service, issues a single
//! GET and turns whatever comes back into a [`PlayerSnapshot`]. Every
//! failure, from a missing trust root to an unexpected status code, ends
//! up as a failure snapshot rather than an error.

use std::fmt;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use rustls::pki_types::ServerName;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;

use crate::config::HiscoreConfig;
use crate::hiscore::parser::parse_body;
use crate::hiscore::snapshot::PlayerSnapshot;
use crate::http::query;
use crate::tls;

/// Initial capacity of the response buffer
const BUFFER_SIZE: usize = 8192;

/// Why a lookup failed. The `Display` text is what the client sees in the
/// snapshot's `error` field.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Player name is empty")]
    EmptyName,

    #[error("CA certificate path is not configured")]
    MissingTrustRoot,

    #[error("Unable to load CA certificate bundle")]
    TrustRoot(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("Unable to connect to hiscore service")]
    Connect(#[source] io::Error),

    #[error("TLS handshake with hiscore service failed")]
    Handshake(#[source] io::Error),

    #[error("Failed to issue hiscore request")]
    Send(#[source] io::Error),

    #[error("Failed to read hiscore response")]
    Read(#[source] io::Error),

    #[error("Empty response from hiscore service")]
    EmptyResponse,

    #[error("Malformed HTTP response")]
    MalformedResponse,

    #[error("Failed to parse hiscore status")]
    BadStatusLine,

    #[error("Player not found")]
    PlayerNotFound,

    #[error("Hiscore service returned status {0}")]
    UnexpectedStatus(u16),
}

/// Trust context for upstream sessions, loaded once when the client is
/// built. A missing or unreadable bundle is kept so every lookup can report
/// it.
#[derive(Clone)]
enum TrustRoot {
    NotConfigured,
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
    Ready(TlsConnector),
}

impl fmt::Debug for TrustRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustRoot::NotConfigured => f.write_str("NotConfigured"),
            TrustRoot::Unavailable(e) => write!(f, "Unavailable({})", e),
            TrustRoot::Ready(_) => f.write_str("Ready"),
        }
    }
}

impl TrustRoot {
    fn load(ca_bundle: &str) -> Self {
        if ca_bundle.is_empty() {
            return TrustRoot::NotConfigured;
        }

        match tls::connector(ca_bundle) {
            Ok(connector) => TrustRoot::Ready(connector),
            Err(e) => {
                tracing::warn!(ca_bundle, error = %e, "CA bundle unavailable");
                let e: Box<dyn std::error::Error + Send + Sync> = e.into();
                TrustRoot::Unavailable(Arc::from(e))
            }
        }
    }
}

/// Client for the hiscore `index_lite` endpoint.
#[derive(Debug, Clone)]
pub struct HiscoreClient {
    host: String,
    port: u16,
    /// Host header value, port included when the URL names one
    authority: String,
    path: String,
    server_name: ServerName<'static>,
    trust: TrustRoot,
    user_agent: String,
}

impl HiscoreClient {
    /// Parses the service URL and loads the CA bundle. Only a bad URL is an
    /// error here; trust-root problems surface on each lookup.
    pub fn new(cfg: &HiscoreConfig) -> anyhow::Result<Self> {
        let url = Url::parse(&cfg.url).context("invalid hiscore URL")?;

        if url.scheme() != "https" {
            anyhow::bail!("hiscore URL must use https, got {}", url.scheme());
        }

        let host = url.host_str().context("hiscore URL missing host")?.to_string();
        let port = url.port_or_known_default().unwrap_or(443);
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.clone(),
        };
        let server_name = ServerName::try_from(host.clone())
            .with_context(|| format!("invalid hiscore host name {}", host))?;

        Ok(Self {
            host,
            port,
            authority,
            path: url.path().to_string(),
            server_name,
            trust: TrustRoot::load(&cfg.ca_bundle),
            user_agent: cfg.user_agent.clone(),
        })
    }

    /// Looks up a player. Never fails; problems are reported in the
    /// snapshot.
    ///
    /// `name` is the decoded query value. It is sent upstream byte for
    /// byte; the snapshot echoes it as text.
    pub async fn fetch_player(&self, name: &[u8]) -> PlayerSnapshot {
        let display_name = String::from_utf8_lossy(name);

        let result = self.try_fetch(name, &display_name).await;

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    player = %display_name,
                    success = snapshot.success,
                    skills = snapshot.skills.len(),
                    "Hiscore lookup complete"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(player = %display_name, error = ?e, "Hiscore lookup failed");
                PlayerSnapshot::failure(display_name, e.to_string())
            }
        }
    }

    async fn try_fetch(
        &self,
        name: &[u8],
        display: &str,
    ) -> Result<PlayerSnapshot, FetchError> {
        if name.is_empty() {
            return Err(FetchError::EmptyName);
        }

        let connector = match &self.trust {
            TrustRoot::Ready(connector) => connector,
            TrustRoot::NotConfigured => return Err(FetchError::MissingTrustRoot),
            TrustRoot::Unavailable(e) => return Err(FetchError::TrustRoot(e.clone())),
        };

        let tcp = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(FetchError::Connect)?;

        tracing::trace!(host = %self.host, port = self.port, "Connected to hiscore service");

        let mut stream = connector
            .connect(self.server_name.clone(), tcp)
            .await
            .map_err(FetchError::Handshake)?;

        let result = exchange(&mut stream, self.build_request(name).as_bytes()).await;

        // Peer may already be gone; the session is dropped either way
        if let Err(e) = stream.shutdown().await {
            tracing::trace!(error = %e, "Hiscore session shutdown failed");
        }

        let raw = result?;
        let body = interpret_response(&raw)?;

        Ok(parse_body(display, &body))
    }

    /// Builds the GET request for a player.
    pub fn build_request(&self, name: &[u8]) -> String {
        format!(
            "GET {}?player={} HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\nConnection: close\r\n\r\n",
            self.path,
            query::encode(name),
            self.authority,
            self.user_agent
        )
    }
}

/// Sends the request and reads until the peer closes.
async fn exchange<S>(stream: &mut S, request: &[u8]) -> Result<Vec<u8>, FetchError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await.map_err(FetchError::Send)?;
    stream.flush().await.map_err(FetchError::Send)?;

    tracing::trace!("Request sent to hiscore service");

    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);
    loop {
        match stream.read_buf(&mut buffer).await {
            Ok(0) => break,
            Ok(_) => {}
            // TCP close without close_notify still ends the response
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(FetchError::Read(e)),
        }
    }

    Ok(buffer.to_vec())
}

/// Splits a raw upstream response and checks its status.
///
/// Returns the body of a 200 response.
pub fn interpret_response(raw: &[u8]) -> Result<String, FetchError> {
    if raw.is_empty() {
        return Err(FetchError::EmptyResponse);
    }

    let header_end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or(FetchError::MalformedResponse)?;

    let header = String::from_utf8_lossy(&raw[..header_end]);
    let mut tokens = header.split_whitespace();
    let _version = tokens.next().ok_or(FetchError::BadStatusLine)?;
    let status: u16 = tokens
        .next()
        .and_then(|code| code.parse().ok())
        .filter(|&code| code != 0)
        .ok_or(FetchError::BadStatusLine)?;

    match status {
        200 => Ok(String::from_utf8_lossy(&raw[header_end + 4..]).into_owned()),
        404 => Err(FetchError::PlayerNotFound),
        other => Err(FetchError::UnexpectedStatus(other)),
    }
}
