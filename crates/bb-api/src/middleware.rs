//! Middleware for the Bubble-Board API.
//!
//! Custom middleware for logging and cross-origin access.

use actix_cors::Cors;
use actix_web::middleware::Logger;

// Returns the standard request logger:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Configures CORS (Cross-Origin Resource Sharing)
// Important if the UI and API ever live on different subdomains.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
