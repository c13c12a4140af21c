/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public OKCoin stream adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod error;
pub mod types;
pub mod ws;

pub use auth::{Credentials, RequestSigner};

pub use error::{OkcoinError, Result};

// Re-export all types
pub use types::*;

// Re-export commonly used types from ws
pub use ws::{
    Connection,
    Connector,
    Envelope,
    Session,
    SessionConfig,
    SessionState,
    TungsteniteConnector,
    build_message,
    classify,
    decode_envelopes,
};
