#[macro_use]
extern crate rocket;

mod ai;
mod config;
mod cors;
mod export;
mod models;
mod routes;


use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket};
use serde_json::{json, Value};

use std::sync::Arc;

use ai::groq::GroqClient;
use ai::{CompletionClient, GenerationSettings};
use config::Config;

#[catch(400)]
fn bad_request() -> Json<Value> {
    Json(json!({"ok": false, "error": "Bad request"}))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({"ok": false, "error": format!("No route for {}", req.uri().path())}))
}

#[catch(422)]
fn unprocessable() -> Json<Value> {
    Json(json!({"ok": false, "error": "Request body has the wrong shape"}))
}

#[catch(500)]
fn server_error() -> Json<Value> {
    Json(json!({"ok": false, "error": "Internal server error"}))
}

/// Assemble the server around an already-built completion client.
pub fn build(config: &Config, client: Arc<dyn CompletionClient>) -> Rocket<Build> {
    rocket::build()
        .manage(client)
        .manage(GenerationSettings::from(&config.llm))
        .attach(cors::Cors::new(&config.server.cors_allowed_origin))
        .mount("/", routes::routes())
        .register("/", catchers![bad_request, not_found, unprocessable, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = config::load().expect("Failed to load configuration");
    let client = GroqClient::new(&config.llm).expect("Failed to build completion client");

    log::info!(
        "Completion provider: groq, model {} (configured: {})",
        config.llm.model,
        client.is_configured()
    );

    build(&config, Arc::new(client))
}
