//! Periodic self-ping that keeps free hosting tiers from idling the bot.
//!
//! Runs on its own timer, independent of update processing. Failures are
//! logged and never affect bot state.

use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Builds the ping URL for a base URL (trailing slashes are ignored).
pub fn ping_url(base_url: &str) -> String {
    format!("{}/ping", base_url.trim_end_matches('/'))
}

/// Sends one GET to `url`, failing on transport errors and non-2xx answers.
pub async fn ping_once(client: &Client, url: &str) -> AppResult<()> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::HttpStatus(status));
    }
    Ok(())
}

/// Spawns the self-ping loop.
///
/// The first tick fires after one full `period`, the health server has
/// usually just started at that point.
pub fn start_keep_alive_task(base_url: String, period: Duration) -> AppResult<JoinHandle<()>> {
    let client = Client::builder().timeout(config::network::timeout()).build()?;
    let url = ping_url(&base_url);
    log::info!("Self-ping enabled: {} every {}s", url, period.as_secs());

    Ok(tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() yields immediately on the first tick
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match ping_once(&client, &url).await {
                Ok(()) => log::debug!("Self-ping ok: {}", url),
                Err(e) => log::warn!("Self-ping failed: {}", e),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::web_server;
    use tokio::net::TcpListener;

    #[test]
    fn test_ping_url() {
        assert_eq!(ping_url("http://localhost:3000"), "http://localhost:3000/ping");
        assert_eq!(ping_url("https://bot.example.com/"), "https://bot.example.com/ping");
    }

    #[tokio::test]
    async fn test_ping_once_against_health_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(web_server::serve(listener));

        let client = Client::new();
        let result = ping_once(&client, &ping_url(&format!("http://{}", addr))).await;
        assert!(result.is_ok(), "{:?}", result);
    }

    #[tokio::test]
    async fn test_ping_once_reports_bad_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(web_server::serve(listener));

        let client = Client::new();
        let result = ping_once(&client, &format!("http://{}/missing", addr)).await;
        assert!(matches!(result, Err(AppError::HttpStatus(status)) if status.as_u16() == 404));
    }
}
