//! Display formatting for feed data.
//!
//! Pure string and tone transforms shared by the GUI panels and the CLI
//! table output. Every feed has a fixed placeholder it degrades to.

use rust_decimal::Decimal;

use crate::api::{Notification, PriceBoard, TelegramStatus};

/// Placeholder shown when the ticker fetch fails outright
pub const TICKER_UNAVAILABLE: &str = "Data unavailable";
/// Placeholder for a missing profile stat
pub const STAT_UNAVAILABLE: &str = "N/A";
/// Placeholder for a missing or failed market brief
pub const BRIEF_UNAVAILABLE: &str = "No data";
/// Placeholder shown when the analyze call fails
pub const ANALYZE_FAILED: &str = "Error";
/// Placeholder for an empty or failed notification feed
pub const NO_NOTIFICATIONS: &str = "No notifications.";

/// Color class for a signed figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    pub fn of(value: Decimal) -> Self {
        if value.is_sign_negative() && !value.is_zero() {
            Tone::Negative
        } else if value.is_zero() {
            Tone::Neutral
        } else {
            Tone::Positive
        }
    }
}

/// Two fixed decimals, the shared money/percent format
pub fn fixed2(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// A price cell: two decimals, or the placeholder glyph when unknown
pub fn price_cell(price: Option<Decimal>) -> String {
    match price {
        Some(p) => fixed2(p),
        None => STAT_UNAVAILABLE.to_string(),
    }
}

/// The ticker strip: space-joined `"<SYM> <price>"` pairs in symbol order
pub fn ticker_line(board: &PriceBoard) -> String {
    board
        .iter()
        .map(|(symbol, price)| format!("{} {}", symbol, price_cell(*price)))
        .collect::<Vec<_>>()
        .join("   ")
}

/// A signed figure with its tone, e.g. P/L and P/L percent
pub fn signed_cell(value: Option<Decimal>) -> (String, Tone) {
    match value {
        Some(v) => (fixed2(v), Tone::of(v)),
        None => (STAT_UNAVAILABLE.to_string(), Tone::Neutral),
    }
}

/// One text block per notification; the fixed placeholder when empty
pub fn notification_blocks(items: &[Notification]) -> Vec<String> {
    if items.is_empty() {
        vec![NO_NOTIFICATIONS.to_string()]
    } else {
        items.iter().map(|n| n.text().to_string()).collect()
    }
}

/// "Online"/"Offline" plus an optional last-seen suffix
pub fn telegram_line(status: &TelegramStatus) -> String {
    let state = if status.status { "Online" } else { "Offline" };
    match &status.last_active {
        Some(ts) => format!("{} (last seen: {})", state, ts),
        None => state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn board(entries: &[(&str, Option<Decimal>)]) -> PriceBoard {
        let map: BTreeMap<String, Option<Decimal>> = entries
            .iter()
            .map(|(s, p)| (s.to_string(), *p))
            .collect();
        PriceBoard(map)
    }

    #[test]
    fn test_ticker_line_symbol_order_and_precision() {
        let board = board(&[
            ("TSLA", Some(dec!(244.5))),
            ("AAPL", Some(dec!(189))),
            ("MSFT", None),
        ]);
        assert_eq!(ticker_line(&board), "AAPL 189.00   MSFT N/A   TSLA 244.50");
    }

    #[test]
    fn test_pl_percent_tones() {
        use crate::api::Position;

        let winner = Position {
            symbol: "AAPL".into(),
            qty: dec!(10),
            avg: dec!(100),
            price: None,
            pl: Some(dec!(50)),
        };
        let (text, tone) = signed_cell(winner.pl_percent());
        assert_eq!(text, "5.00");
        assert_eq!(tone, Tone::Positive);

        let loser = Position {
            pl: Some(dec!(-20)),
            ..winner
        };
        let (text, tone) = signed_cell(loser.pl_percent());
        assert_eq!(text, "-2.00");
        assert_eq!(tone, Tone::Negative);
    }

    #[test]
    fn test_notification_blocks() {
        assert_eq!(notification_blocks(&[]), vec![NO_NOTIFICATIONS.to_string()]);

        let items = vec![
            Notification::Entry {
                text: "Bought 2 AAPL".into(),
            },
            Notification::Plain("plain line".into()),
        ];
        assert_eq!(
            notification_blocks(&items),
            vec!["Bought 2 AAPL".to_string(), "plain line".to_string()]
        );
    }

    #[test]
    fn test_telegram_line() {
        let online = TelegramStatus {
            status: true,
            last_active: Some("2026-08-27T10:00:00".into()),
        };
        assert_eq!(
            telegram_line(&online),
            "Online (last seen: 2026-08-27T10:00:00)"
        );

        let offline = TelegramStatus {
            status: false,
            last_active: None,
        };
        assert_eq!(telegram_line(&offline), "Offline");
    }

    #[test]
    fn test_zero_is_neutral() {
        assert_eq!(Tone::of(dec!(0)), Tone::Neutral);
        assert_eq!(Tone::of(dec!(0.01)), Tone::Positive);
        assert_eq!(Tone::of(dec!(-0.01)), Tone::Negative);
    }
}
