//! # Web Server Components
//!
//! ## Server Core ([`server`])
//! Runs the steganography codec on uploaded images, off the async runtime.
//!
//! ## Routes ([`routes`])
//! Multipart parsing, validation, status codes and download headers.

pub mod config;
pub mod routes;
pub mod server;

pub use config::WebConfig;
pub use routes::router;
pub use server::ServerCore;
