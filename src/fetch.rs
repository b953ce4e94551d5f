use log::debug;
use once_cell::sync::Lazy;
use reqwest::Client;

use crate::error::{Error, Result};
use crate::schedule::Schedule;

pub const DEFAULT_UPSTREAM: &str =
    "https://xjvq5wtiye.execute-api.us-east-1.amazonaws.com/interview/api/v1/challenge";

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .expect("default client configuration is valid")
});

/// One GET against the schedule endpoint. No retries; transport timeouts are
/// left to the client defaults.
pub async fn fetch_schedule(url: &str) -> Result<Schedule> {
    debug!("requesting schedule from {url}");

    let response = CLIENT.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::UpstreamStatus(status));
    }

    let body = response.text().await?;

    Ok(serde_json::from_str(&body)?)
}
