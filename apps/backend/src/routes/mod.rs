use actix_web::web;

pub mod game;
pub mod health;
pub mod realtime;

/// Registers every endpoint at the paths clients already use.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(game::configure_routes)
        .configure(realtime::configure_routes);
}
