use sftpgw::config::types::LogFormat;
use sftpgw::config::{parse_config, sample_config};
use sftpgw::registry::HostRegistry;

// -------------------------------------------------------------------------
// Test: a minimal config parses with defaults applied
// -------------------------------------------------------------------------
#[test]
fn minimal_config_uses_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg.server.listen, "127.0.0.1:8080");
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.logging.format, LogFormat::Pretty);
    assert_eq!(cfg.sftp.keepalive_secs, 30);
    assert_eq!(cfg.sftp.connect_timeout_secs, 10);
    assert!(cfg.hosts.is_empty());
}

// -------------------------------------------------------------------------
// Test: full config round-trips every field
// -------------------------------------------------------------------------
#[test]
fn full_config_parses() {
    let cfg = parse_config(
        r#"
[server]
listen = "0.0.0.0:9000"

[logging]
level = "debug"
format = "json"

[sftp]
keepalive_secs = 5
connect_timeout_secs = 3

[[hosts]]
ip = "195.144.107.198"
port = 2222
username = "demo"
password = "password"

[[hosts]]
ip = "10.0.0.1"
username = "backup"
password = "s3cret"
"#,
    )
    .unwrap();
    assert_eq!(cfg.server.listen, "0.0.0.0:9000");
    assert_eq!(cfg.logging.format, LogFormat::Json);
    assert_eq!(cfg.sftp.keepalive_secs, 5);
    assert_eq!(cfg.hosts.len(), 2);
    assert_eq!(cfg.hosts[0].port, 2222);
    // port defaults to 22 when omitted
    assert_eq!(cfg.hosts[1].port, 22);
}

// -------------------------------------------------------------------------
// Test: validation failures
// -------------------------------------------------------------------------
#[test]
fn rejects_bad_listen_address() {
    let err = parse_config("[server]\nlisten = \"not-an-addr\"\n").unwrap_err();
    assert!(err.to_string().contains("listen"), "{err}");
}

#[test]
fn rejects_non_ipv4_host() {
    let toml = r#"
[[hosts]]
ip = "example.com"
username = "u"
password = "p"
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("IPv4"), "{err}");
}

#[test]
fn rejects_duplicate_host_ips() {
    let toml = r#"
[[hosts]]
ip = "10.0.0.1"
username = "u"
password = "p"

[[hosts]]
ip = "10.0.0.1"
username = "v"
password = "q"
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("duplicate"), "{err}");
}

#[test]
fn rejects_empty_username() {
    let toml = r#"
[[hosts]]
ip = "10.0.0.1"
username = ""
password = "p"
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("username"), "{err}");
}

#[test]
fn rejects_zero_port() {
    let toml = r#"
[[hosts]]
ip = "10.0.0.1"
port = 0
username = "u"
password = "p"
"#;
    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("port"), "{err}");
}

// -------------------------------------------------------------------------
// Test: the generated sample config is itself valid
// -------------------------------------------------------------------------
#[test]
fn sample_config_is_valid() {
    let cfg = parse_config(sample_config()).unwrap();
    assert_eq!(cfg.hosts.len(), 1);
    assert_eq!(cfg.hosts[0].ip, "195.144.107.198");
}

// -------------------------------------------------------------------------
// Test: registry lookup semantics
// -------------------------------------------------------------------------
#[test]
fn registry_lookup() {
    let cfg = parse_config(sample_config()).unwrap();
    let registry = HostRegistry::new(&cfg.hosts);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("195.144.107.198"));
    assert!(!registry.contains("127.0.0.1"));
    assert_eq!(registry.get("195.144.107.198").unwrap().username, "demo");
}

// -------------------------------------------------------------------------
// Test: Debug never leaks the password
// -------------------------------------------------------------------------
#[test]
fn host_debug_redacts_password() {
    let cfg = parse_config(sample_config()).unwrap();
    let debug = format!("{:?}", cfg.hosts[0]);
    assert!(debug.contains("<redacted>"));
    // the secret value itself must not appear (field name is unquoted)
    assert!(!debug.contains("\"password\""));
}
