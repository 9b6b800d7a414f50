//! # bb-core
//!
//! The central domain logic and interface definitions for Bubble-Board.

pub mod broadcast;
pub mod error;
pub mod identity;
pub mod models;
pub mod registry;
pub mod service;
pub mod traits;

// Re-exporting for easier access in other crates
pub use broadcast::*;
pub use error::*;
pub use identity::*;
pub use models::*;
pub use registry::*;
pub use service::*;
pub use traits::*;
