/*
[INPUT]:  Envelopes with untyped JSON payloads
[OUTPUT]: Typed ticker, depth and trades records
[POS]:    WebSocket layer - per-channel record decoding
[UPDATE]: When payload layouts change or new record types added
*/

//! Record decoders for the market channels.
//!
//! Payloads are loosely typed: prices may be JSON numbers or strings with
//! thousands separators, timestamps arrive as numeric strings and trades are
//! positional string arrays. Each decoder either returns a complete record or
//! a [`OkcoinError::Decode`] naming the channel and the failing field.

use serde_json::{Map, Value};

use crate::error::{OkcoinError, Result};
use crate::types::{
    ChannelKind, DepthRecord, MarketData, PriceLevel, TickerRecord, TradeRecord, TradesRecord,
};
use crate::ws::message::Envelope;

const TRADE_FIELDS: usize = 5;
const BID_SIDE: &str = "bid";

/// Decode an envelope into the record type its channel names
pub fn classify(envelope: &Envelope) -> Result<MarketData> {
    let channel = envelope.channel.as_str();
    match ChannelKind::of(channel) {
        Some(ChannelKind::Ticker) => decode_ticker(channel, &envelope.data).map(MarketData::Ticker),
        Some(ChannelKind::Depth) => decode_depth(channel, &envelope.data).map(MarketData::Depth),
        Some(ChannelKind::Trades) => decode_trades(channel, &envelope.data).map(MarketData::Trades),
        None => Err(OkcoinError::UnrecognizedChannel(channel.to_string())),
    }
}

pub fn decode_ticker(channel: &str, data: &Value) -> Result<TickerRecord> {
    let object = expect_object(channel, data)?;
    Ok(TickerRecord {
        channel: channel.to_string(),
        buy: float_field(channel, object, "buy")?,
        high: float_field(channel, object, "high")?,
        last: float_field(channel, object, "last")?,
        low: float_field(channel, object, "low")?,
        sell: float_field(channel, object, "sell")?,
        vol: float_field(channel, object, "vol")?,
        timestamp: timestamp_field(channel, object)?,
    })
}

pub fn decode_depth(channel: &str, data: &Value) -> Result<DepthRecord> {
    let object = expect_object(channel, data)?;
    Ok(DepthRecord {
        channel: channel.to_string(),
        bids: price_levels(channel, object, "bids")?,
        asks: price_levels(channel, object, "asks")?,
        timestamp: timestamp_field(channel, object)?,
    })
}

pub fn decode_trades(channel: &str, data: &Value) -> Result<TradesRecord> {
    let rows = data
        .as_array()
        .ok_or_else(|| OkcoinError::decode(channel, "data", "expected an array of trades"))?;
    let trades = rows
        .iter()
        .enumerate()
        .map(|(index, row)| decode_trade(channel, index, row))
        .collect::<Result<Vec<_>>>()?;
    Ok(TradesRecord {
        channel: channel.to_string(),
        trades,
    })
}

fn decode_trade(channel: &str, index: usize, row: &Value) -> Result<TradeRecord> {
    let row_field = format!("data[{index}]");
    let cells = row
        .as_array()
        .filter(|cells| cells.len() == TRADE_FIELDS)
        .ok_or_else(|| {
            OkcoinError::decode(channel, &row_field, "expected a 5-element array")
        })?;

    let mut text = [""; TRADE_FIELDS];
    for (slot, cell) in text.iter_mut().zip(cells) {
        *slot = cell
            .as_str()
            .ok_or_else(|| OkcoinError::decode(channel, &row_field, "expected string cells"))?;
    }
    let [id, price, amount, time, side] = text;

    Ok(TradeRecord {
        id: id.parse::<u64>().map_err(|err| {
            OkcoinError::decode(channel, format!("{row_field}.id"), format!("{err}: {id:?}"))
        })?,
        price: parse_float(price).map_err(|reason| {
            OkcoinError::decode(channel, format!("{row_field}.price"), reason)
        })?,
        amount: parse_float(amount).map_err(|reason| {
            OkcoinError::decode(channel, format!("{row_field}.amount"), reason)
        })?,
        time: time.to_string(),
        is_bid: side == BID_SIDE,
    })
}

fn expect_object<'a>(channel: &str, data: &'a Value) -> Result<&'a Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| OkcoinError::decode(channel, "data", "expected an object"))
}

/// Look a field up by its lower-case name, ignoring the case of the payload key
fn lookup<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn float_field(channel: &str, object: &Map<String, Value>, name: &str) -> Result<f64> {
    let value = lookup(object, name)
        .ok_or_else(|| OkcoinError::decode(channel, name, "missing"))?;
    coerce_float(value).map_err(|reason| OkcoinError::decode(channel, name, reason))
}

fn timestamp_field(channel: &str, object: &Map<String, Value>) -> Result<u64> {
    const NAME: &str = "timestamp";
    match lookup(object, NAME) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(raw)) => raw
            .parse::<u64>()
            .map_err(|err| OkcoinError::decode(channel, NAME, format!("{err}: {raw:?}"))),
        Some(Value::Number(number)) => number
            .as_u64()
            .ok_or_else(|| OkcoinError::decode(channel, NAME, "expected an unsigned integer")),
        Some(_) => Err(OkcoinError::decode(channel, NAME, "expected a numeric string")),
    }
}

fn price_levels(channel: &str, object: &Map<String, Value>, side: &str) -> Result<Vec<PriceLevel>> {
    let levels = lookup(object, side)
        .and_then(Value::as_array)
        .ok_or_else(|| OkcoinError::decode(channel, side, "expected an array of levels"))?;

    levels
        .iter()
        .enumerate()
        .map(|(index, level)| match level.as_array().map(Vec::as_slice) {
            Some([price, amount]) => match (price.as_f64(), amount.as_f64()) {
                (Some(price), Some(amount)) => Ok(PriceLevel { price, amount }),
                _ => Err(OkcoinError::decode(
                    channel,
                    format!("{side}[{index}]"),
                    "expected numeric price and amount",
                )),
            },
            _ => Err(OkcoinError::decode(
                channel,
                format!("{side}[{index}]"),
                "expected a [price, amount] pair",
            )),
        })
        .collect()
}

fn coerce_float(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| format!("number out of range: {number}")),
        Value::String(raw) => parse_float(raw),
        other => Err(format!("expected a number or numeric string, got {other}")),
    }
}

/// Parse a float that may contain thousands separators, e.g. `8,705.22`
pub fn parse_float(raw: &str) -> std::result::Result<f64, String> {
    raw.replace(',', "")
        .parse::<f64>()
        .map_err(|err| format!("{err}: {raw:?}"))
}
