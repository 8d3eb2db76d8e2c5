//! Wire protocol shared by the server and the terminal client.

mod messages;

pub use messages::{ClientMessage, Envelope, ServerMessage, DEFAULT_PORT, NO_MATCHES_MESSAGE};
