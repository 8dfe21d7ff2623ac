// Exercises the real SFTP stack against the public Rebex demo server
// (test.rebex.net, demo/password). Needs outbound network access, so it is
// ignored by default: `cargo test --test rebex_live_test -- --ignored`

use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use sftpgw::api::{self, AppState};
use sftpgw::config::parse_config;
use sftpgw::registry::HostRegistry;
use sftpgw::sftp::cache::SessionCache;
use sftpgw::sftp::client::SftpConnector;

const REBEX_IP: &str = "195.144.107.198";
const README_CONTENT: &str = "Welcome,\r\n\r\nyou are connected to an FTP or SFTP server used for testing purposes \
by Rebex FTP/SSL or Rebex SFTP sample code.\r\nOnly read access is allowed and the FTP download speed is limited to \
16KBps.\r\n\r\nFor infomation about Rebex FTP/SSL, Rebex SFTP and other Rebex .NET components, please visit our \
website at http://www.rebex.net/\r\n\r\nFor feedback and support, contact support@rebex.net\r\n\r\nThanks!\r\n";

async fn start_live_gateway() -> u16 {
    let cfg = parse_config(&format!(
        r#"
[[hosts]]
ip = "{REBEX_IP}"
port = 22
username = "demo"
password = "password"
"#
    ))
    .unwrap();

    let state = AppState {
        registry: Arc::new(HostRegistry::new(&cfg.hosts)),
        cache: Arc::new(SessionCache::new(Arc::new(SftpConnector::new(
            cfg.sftp.clone(),
        )))),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        api::start_server_on_listener(listener, state, CancellationToken::new())
            .await
            .unwrap();
    });
    port
}

#[tokio::test]
#[ignore = "requires outbound network access to test.rebex.net"]
async fn fetches_readme_from_rebex() {
    let port = start_live_gateway().await;
    let url = format!(
        "http://127.0.0.1:{port}/sftp/api/v1.0/get-file?ip={REBEX_IP}&path=/readme.txt"
    );

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ip"], REBEX_IP);
    assert_eq!(body["path"], "/readme.txt");
    assert_eq!(body["hostname"], "test.rebex.net");
    assert_eq!(body["content"], README_CONTENT);

    // second request reuses the cached session
    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "requires outbound network access to test.rebex.net"]
async fn unknown_remote_path_is_404() {
    let port = start_live_gateway().await;
    let url = format!(
        "http://127.0.0.1:{port}/sftp/api/v1.0/get-file?ip={REBEX_IP}&path=/unknown.txt"
    );

    let resp = reqwest::get(&url).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "File not found!");
}
