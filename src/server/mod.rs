//! Trivia server module.
//!
//! Serves the trivia operations over WebSocket.

mod handler;
mod server;

pub use handler::dispatch;
pub use server::{open_service, run, serve, SharedService};
