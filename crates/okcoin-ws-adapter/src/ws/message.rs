/*
[INPUT]:  Outbound requests, raw inbound frame bytes
[OUTPUT]: Wire subscription messages and parsed envelopes
[POS]:    WebSocket layer - message building and envelope parsing
[UPDATE]: When adding new message types or changing format
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::RequestSigner;
use crate::error::{OkcoinError, Result};
use crate::types::{MarketData, Request};
use crate::ws::decode;

pub const PING_MESSAGE: &str = r#"{"event":"ping"}"#;
pub const PONG_MESSAGE: &str = r#"{"event":"pong"}"#;

/// Channel payload before type-specific decoding
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    pub channel: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Decode the payload into its typed record
    pub fn classify(&self) -> Result<MarketData> {
        decode::classify(self)
    }
}

/// Parse one inbound frame into its envelopes.
///
/// A frame is either one envelope object or an array of them. Shape errors
/// name the array position of the offending element.
pub fn decode_envelopes(raw: &[u8]) -> Result<Vec<Envelope>> {
    let frame: Value = serde_json::from_slice(raw)
        .map_err(|err| OkcoinError::Protocol(format!("malformed frame: {err}")))?;
    match frame {
        Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value(element).map_err(|err| {
                    OkcoinError::Protocol(format!("malformed envelope at [{index}]: {err}"))
                })
            })
            .collect(),
        single => serde_json::from_value(single)
            .map(|envelope| vec![envelope])
            .map_err(|err| OkcoinError::Protocol(format!("malformed envelope: {err}"))),
    }
}

/// Build one outbound message from a batch of requests.
///
/// A single request is sent as a bare object, several as a JSON array.
pub fn build_message(requests: &[Request], signer: &RequestSigner) -> Result<String> {
    let events = requests
        .iter()
        .map(|request| build_event(request, signer))
        .collect::<Result<Vec<_>>>()?;

    match events.as_slice() {
        [] => Err(OkcoinError::Validation("no requests".to_string())),
        [single] => Ok(single.clone()),
        _ => Ok(format!("[{}]", events.join(","))),
    }
}

fn build_event(request: &Request, signer: &RequestSigner) -> Result<String> {
    let event = request.event();
    let channel = serde_json::to_string(&request.channel)?;
    match &request.params {
        None => Ok(format!(r#"{{"event":"{event}","channel":{channel}}}"#)),
        Some(params) => {
            let parameters = serde_json::to_string(&signer.sign(params))?;
            Ok(format!(
                r#"{{"event":"{event}","channel":{channel}, "parameters": {parameters}}}"#
            ))
        }
    }
}
