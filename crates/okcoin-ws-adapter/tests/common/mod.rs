/*
[INPUT]:  Test scenarios needing a transport or stream payloads
[OUTPUT]: Scripted in-memory connector and captured feed fixtures
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for okcoin-ws-adapter tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use okcoin_ws_adapter::{Connection, Connector, Credentials, OkcoinError, Result};
use url::Url;

pub const TICKER_FRAME: &str = r#"[{"channel":"ok_btcusd_ticker","data":{"buy":"253.36","high":"256.52","last":"253.36","low":"250.92","sell":"253.4","timestamp":"1435925683940","vol":"8,705.22"}}]"#;

pub const DEPTH_FRAME: &str = r#"[{"channel":"ok_btcusd_depth","data":{"bids":[[255.5,3.066],[255.49,0.175],[255.42,0.709],[255.41,0.125],[255.39,7.316],[255.34,0.125],[255.33,0.125],[255.31,0.115],[255.29,0.125],[255.27,0.125],[255.25,0.109],[255.24,1.54],[255.2,0.36],[255.18,0.01],[255.16,1.458],[255.11,1.839],[255.1,6.552],[254.98,1.536],[254.97,1630],[254.96,36.264]],"asks":[[256.18,0.01],[256,2.099],[255.98,4.01],[255.84,10],[255.82,0.36],[255.78,0.01],[255.77,3.883],[255.76,0.695],[255.75,0.238],[255.74,0.209],[255.73,0.278],[255.72,0.371],[255.71,0.222],[255.7,0.232],[255.69,0.239],[255.68,0.215],[255.67,0.295],[255.63,0.05],[255.61,0.05],[255.51,0.5]],"timestamp":"1436012091204"}}]"#;

pub const TRADES_FRAME: &str = r#"[{"channel":"ok_btcusd_trades_v1","data":[["24307225","257.46","0.05","22:32:24","ask"],["24307282","257.46","0.17","22:32:44","ask"],["24307400","257.46","0.78","22:33:10","ask"],["24307513","257.46","0.52","22:33:34","ask"],["24307634","257.49","10.15","22:33:59","ask"],["24307727","257.5","0.3","22:34:22","ask"],["24307729","257.46","0.83","22:34:22","ask"],["24307868","257.46","0.62","22:34:52","ask"],["24307980","257.46","0.16","22:35:21","ask"],["24308067","257.46","0.65","22:35:43","ask"],["24308188","257.46","0.92","22:36:13","ask"],["24308293","257.46","0.05","22:36:37","ask"],["24308316","257.53","0.729","22:36:39","bid"],["24308318","257.54","0.148","22:36:39","bid"],["24308320","257.57","0.148","22:36:39","bid"],["24308322","257.59","0.148","22:36:39","bid"],["24308324","257.61","0.148","22:36:39","bid"],["24308326","257.63","0.148","22:36:39","bid"],["24308327","257.64","0.705","22:36:39","ask"],["24308395","257.65","0.169","22:36:55","ask"],["24308397","257.64","0.711","22:36:55","ask"],["24308516","257.65","0.148","22:37:22","ask"]]}]"#;

/// Credentials used by the scripted sessions
pub fn test_credentials() -> Credentials {
    Credentials::new("pub", "priv").expect("test credentials are valid")
}

#[derive(Debug, Default)]
pub struct Script {
    pub dialed: Vec<String>,
    pub written: Vec<String>,
    pub inbound: VecDeque<Result<Vec<u8>>>,
    pub closed: bool,
}

/// In-memory connector replaying queued frames
#[derive(Debug, Clone, Default)]
pub struct ScriptedConnector {
    script: Arc<Mutex<Script>>,
}

impl ScriptedConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame for the next read
    pub fn push_frame(&self, frame: &str) {
        self.script
            .lock()
            .unwrap()
            .inbound
            .push_back(Ok(frame.as_bytes().to_vec()));
    }

    /// Queue a transport failure for the next read
    pub fn push_error(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .inbound
            .push_back(Err(OkcoinError::Connection(message.to_string())));
    }

    pub fn dialed(&self) -> Vec<String> {
        self.script.lock().unwrap().dialed.clone()
    }

    pub fn written(&self) -> Vec<String> {
        self.script.lock().unwrap().written.clone()
    }

    pub fn closed(&self) -> bool {
        self.script.lock().unwrap().closed
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    async fn dial(&self, url: &Url) -> Result<Box<dyn Connection>> {
        self.script.lock().unwrap().dialed.push(url.to_string());
        Ok(Box::new(ScriptedConnection {
            script: self.script.clone(),
        }))
    }
}

struct ScriptedConnection {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn write_text(&mut self, text: &str) -> Result<()> {
        self.script.lock().unwrap().written.push(text.to_string());
        Ok(())
    }

    async fn read_text(&mut self) -> Result<Vec<u8>> {
        self.script
            .lock()
            .unwrap()
            .inbound
            .pop_front()
            .unwrap_or_else(|| Err(OkcoinError::Connection("script exhausted".to_string())))
    }

    async fn close(&mut self) -> Result<()> {
        self.script.lock().unwrap().closed = true;
        Ok(())
    }
}
