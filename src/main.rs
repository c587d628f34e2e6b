#[macro_use]
extern crate rocket;

use log::info;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use std::env;

use pathfinder_snake::bot::Bot;
use pathfinder_snake::config::Config;
use pathfinder_snake::debug_logger::DebugLogger;

mod handler;

/// `PORT` (set by most hosts) overrides `ROCKET_PORT`; `RUST_LOG` defaults to info
fn apply_env_defaults() {
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
}

/// Mounts the four Battlesnake endpoints over a ready `Bot`
fn build(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server header", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/pathfinder-snake");
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}

#[launch]
async fn rocket() -> _ {
    apply_env_defaults();
    env_logger::init();

    let config = Config::load_or_default();
    info!(
        "Starting pathfinder-snake (debug log: {})",
        if config.debug.enabled { config.debug.log_file_path.as_str() } else { "off" }
    );

    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    build(Bot::with_debug_logger(config, debug_logger))
}
