//! # bb-api
//!
//! The web routing and orchestration layer for Bubble-Board.

pub mod handlers;
pub mod middleware;
pub mod ws;

use actix_web::web;

/// Configures the board routes.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .app_data(handlers::json_config())
            // File posts (multipart, blob optional)
            .route("/upload", web::post().to(handlers::upload))
            // Text-only posts
            .route("/postText", web::post().to(handlers::post_text))
            // Full snapshot, comments included
            .route("/posts", web::get().to(handlers::list_posts))
            // Comment on an existing post
            .route("/posts/{id}/comments", web::post().to(handlers::add_comment))
            // Live event stream
            .route("/ws", web::get().to(ws::board_updates)),
    );
}
