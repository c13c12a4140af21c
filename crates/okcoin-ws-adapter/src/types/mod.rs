/*
[INPUT]:  OKCoin WebSocket schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums for requests, channels and market records
[POS]:    Data layer - type definitions for stream communication
[UPDATE]: When the stream schema changes or new types added
*/

pub mod channels;
pub mod models;
pub mod requests;

pub use channels::*;
pub use models::*;
pub use requests::*;
