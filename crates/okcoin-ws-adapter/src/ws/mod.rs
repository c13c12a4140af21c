/*
[INPUT]:  Session configuration and subscription requests
[OUTPUT]: Real-time ticker, depth and trade records
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding new channels or changing connection logic
*/

pub mod client;
pub mod decode;
pub mod message;
pub mod transport;

pub use client::{CNY_WS_API_URL, Session, SessionConfig, SessionState, USD_WS_API_URL};
pub use decode::classify;
pub use message::{Envelope, PING_MESSAGE, PONG_MESSAGE, build_message, decode_envelopes};
pub use transport::{BufferSizes, Connection, Connector, TungsteniteConnector};
