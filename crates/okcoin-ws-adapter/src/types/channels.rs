/*
[INPUT]:  Channel name strings
[OUTPUT]: Channel classification and name helpers
[POS]:    Data layer - channel catalogue
[UPDATE]: When channels are added or the naming scheme changes
*/

/// Channels that always carry signed parameters
pub const PARAMETERIZED_CHANNELS: &[&str] = &[
    "ok_usd_realtrades",
    "ok_spotusd_trade",
    "ok_spotusd_cancel_order",
    "ok_spotusd_userinfo",
    "ok_spotusd_order_info",
];

const TICKER_SUFFIX: &str = "_ticker";
const DEPTH_SUFFIX: &str = "_depth";
const TRADES_SUFFIX: &str = "_trades_v1";

/// Record family a channel decodes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Ticker,
    Depth,
    Trades,
}

impl ChannelKind {
    /// Classify a channel by its name, `None` for channels without a record type
    pub fn of(channel: &str) -> Option<Self> {
        if channel.ends_with(TICKER_SUFFIX) {
            Some(ChannelKind::Ticker)
        } else if channel.ends_with(DEPTH_SUFFIX) {
            Some(ChannelKind::Depth)
        } else if channel.ends_with(TRADES_SUFFIX) {
            Some(ChannelKind::Trades)
        } else {
            None
        }
    }
}

/// Check whether a channel requires signed parameters
pub fn is_parameterized(channel: &str) -> bool {
    PARAMETERIZED_CHANNELS.contains(&channel)
}

/// Ticker channel for a pair such as `btcusd`
pub fn ticker_channel(pair: &str) -> String {
    format!("ok_{pair}{TICKER_SUFFIX}")
}

/// Depth channel for a pair such as `btcusd`
pub fn depth_channel(pair: &str) -> String {
    format!("ok_{pair}{DEPTH_SUFFIX}")
}

/// Trades channel for a pair such as `btcusd`
pub fn trades_channel(pair: &str) -> String {
    format!("ok_{pair}{TRADES_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ok_btcusd_ticker", Some(ChannelKind::Ticker))]
    #[case("ok_ltcusd_ticker", Some(ChannelKind::Ticker))]
    #[case("ok_btcusd_depth", Some(ChannelKind::Depth))]
    #[case("ok_ltcusd_depth", Some(ChannelKind::Depth))]
    #[case("ok_btcusd_trades_v1", Some(ChannelKind::Trades))]
    #[case("ok_btcusd_trades", None)]
    #[case("ok_spotusd_userinfo", None)]
    #[case("addChannel", None)]
    fn test_channel_kind(#[case] channel: &str, #[case] expected: Option<ChannelKind>) {
        assert_eq!(ChannelKind::of(channel), expected);
    }

    #[test]
    fn test_parameterized_membership() {
        assert!(is_parameterized("ok_spotusd_userinfo"));
        assert!(is_parameterized("ok_usd_realtrades"));
        assert!(!is_parameterized("ok_btcusd_ticker"));
    }

    #[test]
    fn test_channel_helpers() {
        assert_eq!(ticker_channel("btcusd"), "ok_btcusd_ticker");
        assert_eq!(depth_channel("ltcusd"), "ok_ltcusd_depth");
        assert_eq!(trades_channel("btcusd"), "ok_btcusd_trades_v1");
    }
}
