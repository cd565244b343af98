#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Entry point for the store map API server.

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use store_map_dataset::DataConfig;
use store_map_server::{AppState, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var("STORE_MAP_CONFIG")
        .map_or_else(|_| PathBuf::from("store-map.toml"), PathBuf::from);

    log::info!("Loading data layout...");
    let config = DataConfig::load_or_default(&config_path).expect("Failed to load data config");

    log::info!("Loading store registry...");
    let state = web::Data::new(AppState::load(config).expect("Failed to load store registry"));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/cities", web::get().to(handlers::cities))
                    .route("/stores", web::get().to(handlers::stores))
                    .route("/cities/{city}/stores", web::get().to(handlers::city_stores))
                    .route(
                        "/cities/{city}/stores/{code}/analysis",
                        web::get().to(handlers::store_analysis),
                    )
                    .route(
                        "/cities/{city}/comparison",
                        web::get().to(handlers::comparison),
                    )
                    .route("/expansion", web::get().to(handlers::expansion_areas))
                    .route(
                        "/expansion/{area}/analysis",
                        web::get().to(handlers::expansion_analysis),
                    ),
            )
            // Serve the dashboard frontend (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
