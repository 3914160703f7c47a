use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::net::TcpListener;

pub const HEADER: &str = "#HostName,IP,Score,Ping,Speed,CountryLong,CountryShort,NumVpnSessions,Uptime,TotalUsers,TotalTraffic,LogType,Operator,Message,OpenVPN_ConfigData_Base64";

pub fn row(ip: &str, score: u64, country_long: &str, cc: &str, profile: &str) -> String {
    format!(
        "public-vpn-{score},{ip},{score},14,3145728,{country_long},{cc},12,86400000,1000,100000,2weeks,,,{}",
        STANDARD.encode(profile)
    )
}

pub fn feed(rows: &[String]) -> String {
    format!("*vpn_servers\r\n{HEADER}\r\n{}\r\n*\r\n", rows.join("\r\n"))
}

pub async fn write_feed(dir: &Path, rows: &[String]) -> PathBuf {
    let path: PathBuf = dir.join("vpngate_data.csv");
    tokio::fs::write(&path, feed(rows)).await.unwrap();
    path
}

/// A loopback port that accepts every connection until the test ends.
pub async fn open_port() -> u16 {
    let listener: TcpListener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        loop {
            let _ = listener.accept().await;
        }
    });
    port
}

/// A loopback port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener: TcpListener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
