//! # Bubble-Board Binary
//!
//! The entry point that assembles the application based on compile-time features.

use actix_web::{web, App, HttpServer};
use bb_api::handlers::AppState;
use bb_api::middleware;
use bb_core::BoardService;
use std::sync::Arc;

#[cfg(feature = "storage-local")]
use bb_storage_local::LocalContentStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let uploads_dir =
        std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "./data/uploads".to_string());

    // Initialize the content store implementation
    #[cfg(feature = "storage-local")]
    let store = LocalContentStore::new(uploads_dir.clone().into(), "/uploads".to_string());

    // All registry and broadcaster state lives in the service for the
    // process lifetime; nothing survives a restart.
    let state = web::Data::new(AppState {
        service: BoardService::new(Arc::new(store)),
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    log::info!("bubble-board listening on http://127.0.0.1:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(bb_api::configure_routes)
            .service(actix_files::Files::new("/uploads", &uploads_dir))
            .service(actix_files::Files::new("/", "./public").index_file("index.html"))
    })
    .bind(("127.0.0.1", port))?
    .run()
    .await
}
