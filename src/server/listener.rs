use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, Outcome};
use crate::server::router::Router;
use crate::tls;

/// A bound TLS listener.
///
/// Connections are served one at a time: the next accept only happens after
/// the previous connection has been torn down.
pub struct Listener {
    tcp: TcpListener,
    acceptor: TlsAcceptor,
}

impl Listener {
    /// Loads the server identity and binds the socket. Either failing is
    /// fatal for the process.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let acceptor = tls::acceptor(&cfg.tls)?;
        let tcp = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;

        Ok(Self { tcp, acceptor })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.tcp.local_addr()?)
    }

    /// Accepts and serves connections until accepting fails.
    pub async fn run<R: Router>(self, router: R) -> anyhow::Result<()> {
        info!("Listening on {}", self.local_addr()?);

        loop {
            let (socket, peer) = self.tcp.accept().await.context("accept failed")?;
            info!("Accepted connection from {}", peer);

            serve(&self.acceptor, socket, peer, &router).await;
        }
    }
}

/// Handshakes and serves a single connection. Failures are logged and
/// swallowed so the caller can go back to accepting.
pub async fn serve<R: Router>(
    acceptor: &TlsAcceptor,
    socket: TcpStream,
    peer: SocketAddr,
    router: &R,
) {
    let stream = match acceptor.accept(socket).await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(peer = %peer, error = %e, "TLS handshake failed");
            return;
        }
    };

    match Connection::new(stream, router).run().await {
        Ok(Outcome::Responded) => info!("Response sent to {}", peer),
        Ok(Outcome::PeerClosed) => tracing::debug!(peer = %peer, "Peer closed without a request"),
        Err(e) => tracing::error!("Connection error from {}: {}", peer, e),
    }
}
