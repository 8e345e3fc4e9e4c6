use actix_web::{web, HttpResponse};
use tokio::time::timeout;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::AppState;

/// Long-poll for the next phase cue.
///
/// Cues are consumed: each one goes to exactly one poller. Answers 504
/// when nothing arrives within the long-poll window.
async fn next_cue(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let feed = app_state.cue_feed.clone().ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::CueFeedClosed,
            "Cue feed is only available in server mode",
        )
    })?;

    let waited = timeout(app_state.long_poll, async {
        let mut stream = feed.lock().await;
        stream.next().await
    })
    .await;

    match waited {
        Ok(Some(cue)) => {
            debug!(?cue, "Cue delivered to poller");
            Ok(HttpResponse::Ok().json(cue))
        }
        Ok(None) => Err(AppError::internal(
            ErrorCode::CueFeedClosed,
            "The game has stopped publishing cues",
        )),
        Err(_) => Err(AppError::timeout(
            ErrorCode::LongPollTimeout,
            "No cue within the long-poll window",
        )),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/client", web::get().to(next_cue));
}
