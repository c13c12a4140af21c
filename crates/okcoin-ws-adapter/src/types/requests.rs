/*
[INPUT]:  Channel names, enable flag and optional parameters
[OUTPUT]: Subscription requests ready for message building
[POS]:    Data layer - outbound request type
[UPDATE]: When request fields or defaults change
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::channels::is_parameterized;

/// One channel subscription change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub channel: String,
    /// `true` adds the channel, `false` removes it
    pub enable: bool,
    /// Present whenever the request must be signed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<BTreeMap<String, String>>,
}

impl Request {
    /// Create a request without explicit parameters.
    ///
    /// Parameterized channels get an empty parameter map so they are still signed.
    pub fn new(channel: impl Into<String>, enable: bool) -> Self {
        let channel = channel.into();
        let params = is_parameterized(&channel).then(BTreeMap::new);
        Self {
            channel,
            enable,
            params,
        }
    }

    pub fn subscribe(channel: impl Into<String>) -> Self {
        Self::new(channel, true)
    }

    pub fn unsubscribe(channel: impl Into<String>) -> Self {
        Self::new(channel, false)
    }

    /// Replace the parameters
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params = Some(
            params
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Wire event name for this request
    pub fn event(&self) -> &'static str {
        if self.enable {
            "addChannel"
        } else {
            "removeChannel"
        }
    }
}
