//! Terminal quiz client.
//!
//! Plays rounds against a trivia server over WebSocket.

mod client;
mod state;
mod ui;

pub use client::run;
pub use state::{ClientApp, ClientState, DEFAULT_ROUNDS};
