//! Remote presentation mode: long-polls a server's `/client` endpoint and
//! narrates the cues it receives.

use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::domain::phase::Cue;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::realtime::announcer::announce;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub fn cue_url(server: &str) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        format!("{}/client", server.trim_end_matches('/'))
    } else {
        format!("http://{server}/client")
    }
}

/// Polls until the server reports the end of the game.
pub async fn run(server: &str) -> Result<(), AppError> {
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| AppError::config(format!("Unable to build HTTP client: {e}")))?;
    let url = cue_url(server);
    info!(%url, "Listening for cues");

    loop {
        let response = match http.get(&url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => continue,
            Err(e) => {
                warn!(error = %e, "Cue poll failed, retrying");
                sleep(RETRY_DELAY).await;
                continue;
            }
        };

        match response.status() {
            StatusCode::OK => {
                let cue: Cue = response.json().await.map_err(|e| {
                    AppError::internal(ErrorCode::Internal, format!("Malformed cue: {e}"))
                })?;
                announce(cue);
                if cue == Cue::GameOver {
                    return Ok(());
                }
            }
            StatusCode::GATEWAY_TIMEOUT => {}
            status => {
                warn!(%status, "Unexpected cue response, retrying");
                sleep(RETRY_DELAY).await;
            }
        }
    }
}
