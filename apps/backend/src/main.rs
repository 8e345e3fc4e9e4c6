use std::io;

use actix_web::{web, App, HttpServer};
use tracing::info;
use werewolf_backend::realtime::{announcer, client};
use werewolf_backend::{routes, AppState, RequestTrace, RunMode, ServerConfig};

mod telemetry;

#[actix_web::main]
async fn main() -> io::Result<()> {
    telemetry::init_tracing().map_err(io::Error::other)?;

    // First argument picks the mode: local (default) | server | client <addr>
    let mode = RunMode::from_args(std::env::args().skip(1)).map_err(io::Error::other)?;
    if let RunMode::Client { server } = &mode {
        return client::run(server).await.map_err(io::Error::other);
    }

    let config = ServerConfig::from_env().map_err(io::Error::other)?;
    let (state, cues) = AppState::from_config(&config);
    let state = match mode {
        RunMode::Server => state.with_cue_feed(cues),
        _ => {
            announcer::spawn(cues);
            state
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        ?mode,
        pacing_ms = config.pacing.as_millis() as u64,
        "Starting Werewolf backend"
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
