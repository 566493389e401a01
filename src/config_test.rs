use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_uses_defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_origin, DEFAULT_API_ORIGIN);
    assert_eq!(cfg.dist_dir, PathBuf::from(DEFAULT_DIST_DIR));
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[
        ("PORT", "8080"),
        ("API_ORIGIN", "https://api.example.test/"),
        ("DIST_DIR", "/srv/app"),
        ("PROXY_TIMEOUT_SECS", " 5 "),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_origin, "https://api.example.test");
    assert_eq!(cfg.dist_dir, PathBuf::from("/srv/app"));
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(5));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup_from(&[("PORT", "  "), ("API_ORIGIN", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_origin, DEFAULT_API_ORIGIN);
}

#[test]
fn invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".to_owned() });
}

#[test]
fn zero_or_garbage_timeout_is_rejected() {
    assert!(matches!(
        ServerConfig::from_lookup(lookup_from(&[("PROXY_TIMEOUT_SECS", "0")])),
        Err(ConfigError::Invalid { var: "PROXY_TIMEOUT_SECS", .. })
    ));
    assert!(matches!(
        ServerConfig::from_lookup(lookup_from(&[("PROXY_TIMEOUT_SECS", "-1")])),
        Err(ConfigError::Invalid { var: "PROXY_TIMEOUT_SECS", .. })
    ));
}

#[test]
fn origin_without_scheme_is_rejected() {
    let err = ServerConfig::from_lookup(lookup_from(&[("API_ORIGIN", "localhost:8000")])).unwrap_err();
    assert_eq!(err, ConfigError::BadOrigin("localhost:8000".to_owned()));
}
