use std::collections::HashMap;

use hiscore_proxy::config::{Config, DEFAULT_HISCORE_URL, ServeMode};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::load_with(lookup(&[])).unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:443");
    assert_eq!(cfg.tls.cert_path, "server.crt");
    assert_eq!(cfg.tls.key_path, "server.key");
    assert_eq!(cfg.hiscore.url, DEFAULT_HISCORE_URL);
    assert_eq!(cfg.hiscore.ca_bundle, "cacert.pem");
    assert_eq!(cfg.hiscore.user_agent, "OSRS-Hiscore-Client/0.1");
    assert_eq!(cfg.mode, ServeMode::Hiscore);
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::load_with(lookup(&[
        ("LISTEN", "127.0.0.1:8443"),
        ("OSRS_CA_BUNDLE", "/etc/ssl/certs/ca-certificates.crt"),
        ("TLS_CERT", "/srv/tls/cert.pem"),
        ("TLS_KEY", "/srv/tls/key.pem"),
        ("MODE", "static_page"),
    ]))
    .unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8443");
    assert_eq!(cfg.hiscore.ca_bundle, "/etc/ssl/certs/ca-certificates.crt");
    assert_eq!(cfg.tls.cert_path, "/srv/tls/cert.pem");
    assert_eq!(cfg.tls.key_path, "/srv/tls/key.pem");
    assert_eq!(cfg.mode, ServeMode::StaticPage);
}

#[test]
fn test_config_unknown_mode_is_rejected() {
    let result = Config::load_with(lookup(&[("MODE", "websocket")]));
    assert!(result.is_err());
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml(
        r#"
listen_addr: "0.0.0.0:8443"
hiscore:
  ca_bundle: "bundle.pem"
"#,
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:8443");
    assert_eq!(cfg.hiscore.ca_bundle, "bundle.pem");
    // Unspecified fields keep their defaults
    assert_eq!(cfg.hiscore.url, DEFAULT_HISCORE_URL);
    assert_eq!(cfg.tls.cert_path, "server.crt");
}

#[test]
fn test_config_file_then_env() {
    let path = std::env::temp_dir()
        .join(format!("hiscore-proxy-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "listen_addr: \"0.0.0.0:9443\"\nmode: static_page\n").unwrap();
    let path = path.to_string_lossy().into_owned();

    let env = [("CONFIG", path.as_str()), ("LISTEN", "127.0.0.1:1443")];
    let cfg = Config::load_with(lookup(&env)).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:1443");
    assert_eq!(cfg.mode, ServeMode::StaticPage);
}

#[test]
fn test_config_missing_file() {
    let result = Config::load_with(lookup(&[("CONFIG", "/nonexistent/hiscore.yaml")]));
    assert!(result.is_err());
}

#[test]
fn test_config_load_from_process_env() {
    unsafe {
        std::env::set_var("OSRS_CA_BUNDLE", "from-env.pem");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.hiscore.ca_bundle, "from-env.pem");
    unsafe {
        std::env::remove_var("OSRS_CA_BUNDLE");
    }
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}
