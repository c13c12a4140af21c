/*
[INPUT]:  Decoded channel payloads
[OUTPUT]: Typed market records (ticker, depth, trades)
[POS]:    Data layer - record definitions returned to callers
[UPDATE]: When the stream schema changes or new record types added
*/

use serde::{Deserialize, Serialize};

use super::channels::ChannelKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    pub channel: String,
    pub buy: f64,
    pub high: f64,
    pub last: f64,
    pub low: f64,
    pub sell: f64,
    pub vol: f64,
    /// Milliseconds since epoch, zero when the feed omits it
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthRecord {
    pub channel: String,
    /// Levels in feed order
    pub bids: Vec<PriceLevel>,
    /// Levels in feed order
    pub asks: Vec<PriceLevel>,
    pub timestamp: u64,
}

impl DepthRecord {
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: u64,
    pub price: f64,
    pub amount: f64,
    /// Exchange-local wall clock as sent, e.g. `22:33:10`
    pub time: String,
    pub is_bid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradesRecord {
    pub channel: String,
    pub trades: Vec<TradeRecord>,
}

/// A fully decoded channel payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarketData {
    Ticker(TickerRecord),
    Depth(DepthRecord),
    Trades(TradesRecord),
}

impl MarketData {
    pub fn channel(&self) -> &str {
        match self {
            MarketData::Ticker(record) => &record.channel,
            MarketData::Depth(record) => &record.channel,
            MarketData::Trades(record) => &record.channel,
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            MarketData::Ticker(_) => ChannelKind::Ticker,
            MarketData::Depth(_) => ChannelKind::Depth,
            MarketData::Trades(_) => ChannelKind::Trades,
        }
    }
}
