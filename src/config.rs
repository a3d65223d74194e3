use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_HISCORE_URL: &str =
    "https://secure.runescape.com/m=hiscore_oldschool/index_lite.ws";

/// Which router the listener serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServeMode {
    /// Proxy `/player` lookups to the hiscore service
    #[default]
    Hiscore,
    /// Answer every request with a fixed HTML page
    StaticPage,
}

impl ServeMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hiscore" => Some(ServeMode::Hiscore),
            "static_page" => Some(ServeMode::StaticPage),
            _ => None,
        }
    }
}

/// Certificate and key for the inbound server identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: "server.crt".to_string(),
            key_path: "server.key".to_string(),
        }
    }
}

/// Upstream hiscore endpoint and the trust root used to verify it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HiscoreConfig {
    pub url: String,
    pub ca_bundle: String,
    pub user_agent: String,
}

impl Default for HiscoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_HISCORE_URL.to_string(),
            ca_bundle: "cacert.pem".to_string(),
            user_agent: "OSRS-Hiscore-Client/0.1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    pub tls: TlsConfig,
    pub hiscore: HiscoreConfig,
    pub mode: ServeMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:443".to_string(),
            tls: TlsConfig::default(),
            hiscore: HiscoreConfig::default(),
            mode: ServeMode::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// If `CONFIG` names a YAML file it provides the base values; `LISTEN`,
    /// `TLS_CERT`, `TLS_KEY`, `HISCORE_URL`, `OSRS_CA_BUNDLE` and `MODE`
    /// override individual fields.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable variable lookup.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Some(cert) = lookup("TLS_CERT") {
            cfg.tls.cert_path = cert;
        }
        if let Some(key) = lookup("TLS_KEY") {
            cfg.tls.key_path = key;
        }
        if let Some(url) = lookup("HISCORE_URL") {
            cfg.hiscore.url = url;
        }
        if let Some(bundle) = lookup("OSRS_CA_BUNDLE") {
            cfg.hiscore.ca_bundle = bundle;
        }
        if let Some(mode) = lookup("MODE") {
            cfg.mode = ServeMode::from_str(&mode)
                .with_context(|| format!("unknown MODE '{}'", mode))?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        Self::from_yaml(&raw).with_context(|| format!("invalid config file {}", path))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }
}
