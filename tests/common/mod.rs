//! Shared TLS fixtures: self-signed certificates and a mock hiscore service.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hiscore_proxy::config::{Config, HiscoreConfig};
use hiscore_proxy::tls;
use rcgen::CertifiedKey;
use rustls::pki_types::ServerName;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

pub const HISCORE_PATH: &str = "/m=hiscore_oldschool/index_lite.ws";

pub const ZEZIMA_BODY: &str = "1,2277,4600000000\n15,99,200000000\n\n22,99,200000000\n-1,-1\n";

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// PEM files for a certificate valid for `localhost`.
pub struct TestIdentity {
    pub cert_path: String,
    pub key_path: String,
}

pub fn temp_file(name: &str, contents: &str) -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path: PathBuf =
        std::env::temp_dir().join(format!("hiscore-proxy-{}-{}-{}", std::process::id(), n, name));
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

pub fn identity() -> TestIdentity {
    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();

    TestIdentity {
        cert_path: temp_file("cert.pem", &cert.pem()),
        key_path: temp_file("key.pem", &key_pair.serialize_pem()),
    }
}

pub fn acceptor(id: &TestIdentity) -> TlsAcceptor {
    tls::install_crypto_provider();
    let config = tls::load_server_config(&id.cert_path, &id.key_path).unwrap();
    TlsAcceptor::from(Arc::new(config))
}

/// A one-shot TLS hiscore service. The handle yields the request it saw,
/// or an empty string if the handshake failed.
pub struct MockUpstream {
    pub port: u16,
    pub ca_bundle: String,
    pub request: JoinHandle<String>,
}

impl MockUpstream {
    pub fn hiscore_config(&self) -> HiscoreConfig {
        HiscoreConfig {
            url: format!("https://localhost:{}{}", self.port, HISCORE_PATH),
            ca_bundle: self.ca_bundle.clone(),
            ..HiscoreConfig::default()
        }
    }
}

pub async fn mock_upstream(response: String) -> MockUpstream {
    let id = identity();
    let acceptor = acceptor(&id);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let request = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let Ok(mut stream) = acceptor.accept(socket).await else {
            return String::new();
        };

        let mut seen = Vec::new();
        let mut buf = [0u8; 1024];
        while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            seen.extend_from_slice(&buf[..n]);
        }

        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;

        String::from_utf8_lossy(&seen).into_owned()
    });

    MockUpstream {
        port,
        ca_bundle: id.cert_path,
        request,
    }
}

pub fn ok_response(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

pub fn proxy_config(id: &TestIdentity) -> Config {
    let mut cfg = Config::default();
    cfg.listen_addr = "127.0.0.1:0".to_string();
    cfg.tls.cert_path = id.cert_path.clone();
    cfg.tls.key_path = id.key_path.clone();
    cfg
}

/// Sends one raw request over TLS and returns everything the server wrote.
pub async fn tls_request(port: u16, ca_bundle: &str, request: &[u8]) -> String {
    let connector = tls::connector(ca_bundle).unwrap();
    let tcp = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
    let server_name = ServerName::try_from("localhost").unwrap();
    let mut stream = connector.connect(server_name, tcp).await.unwrap();

    if request.is_empty() {
        // close_notify with no data: the server sees a zero-byte read
        stream.shutdown().await.unwrap();
    } else {
        stream.write_all(request).await.unwrap();
        stream.flush().await.unwrap();
    }

    let mut response = Vec::new();
    let _ = stream.read_to_end(&mut response).await;
    String::from_utf8_lossy(&response).into_owned()
}
