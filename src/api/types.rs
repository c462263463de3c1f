//! Typed response shapes for the backend endpoints.
//!
//! Every endpoint gets one discriminated shape, validated at the boundary.
//! The only tolerated looseness is inside a position, where P/L may arrive
//! either as a raw `pl` figure or be derived from `price` and `avg`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Price map from `GET /prices?syms=...`, keyed by symbol.
///
/// Values that are not finite numbers decode to `None` and render as the
/// placeholder glyph. BTreeMap keeps the ticker in symbol order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceBoard(pub BTreeMap<String, Option<Decimal>>);

impl PriceBoard {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<Decimal>)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for PriceBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let board = raw
            .into_iter()
            .map(|(symbol, value)| {
                let price = value.as_f64().and_then(Decimal::from_f64);
                (symbol, price)
            })
            .collect();
        Ok(Self(board))
    }
}

/// `GET /portfolio/profile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub capital: Decimal,
    pub open_trades: u32,
    pub pl_today: Decimal,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// One open position from `GET /portfolio/positions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub qty: Decimal,
    pub avg: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub pl: Option<Decimal>,
}

impl Position {
    /// Current market value, when a live price is known
    pub fn value(&self) -> Option<Decimal> {
        self.price.map(|price| price * self.qty)
    }

    /// P/L from the raw field when present, otherwise derived from price
    pub fn pl(&self) -> Option<Decimal> {
        self.pl
            .or_else(|| self.price.map(|price| (price - self.avg) * self.qty))
    }

    /// P/L percentage against the cost basis.
    ///
    /// `pl / (avg*qty) * 100` when the endpoint supplies `pl`, else
    /// `(price-avg)/avg * 100`. Zero cost basis yields `None`.
    pub fn pl_percent(&self) -> Option<Decimal> {
        let hundred = Decimal::from(100);
        if let Some(pl) = self.pl {
            let basis = self.avg * self.qty;
            if basis.is_zero() {
                return None;
            }
            return Some(pl / basis * hundred);
        }
        let price = self.price?;
        if self.avg.is_zero() {
            return None;
        }
        Some((price - self.avg) / self.avg * hundred)
    }
}

/// Envelope for `GET /portfolio/positions`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PositionsResponse {
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// One entry from `GET /notifications`; the backend sends either
/// `{"text": "..."}` objects or plain strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Notification {
    Entry { text: String },
    Plain(String),
}

impl Notification {
    pub fn text(&self) -> &str {
        match self {
            Notification::Entry { text } => text,
            Notification::Plain(text) => text,
        }
    }
}

/// `GET /telegram_status`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelegramStatus {
    pub status: bool,
    #[serde(default)]
    pub last_active: Option<String>,
}

/// `GET /hourly_summary` and the `POST /analyze` reply; the summary
/// field is sometimes absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketBrief {
    #[serde(default)]
    pub summary: Option<String>,
}

/// `POST /analyze` request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeRequest {
    pub capital: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lev: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inds: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_board_orders_symbols_and_tolerates_junk() {
        let board: PriceBoard =
            serde_json::from_str(r#"{"TSLA": 244.5, "AAPL": 189.0, "MSFT": null}"#).unwrap();
        let symbols: Vec<_> = board.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "TSLA"]);
        assert_eq!(board.0["AAPL"], Some(dec!(189.0)));
        assert_eq!(board.0["MSFT"], None);
    }

    #[test]
    fn test_position_pl_from_raw_field() {
        let pos = Position {
            symbol: "AAPL".into(),
            qty: dec!(10),
            avg: dec!(100),
            price: None,
            pl: Some(dec!(50)),
        };
        assert_eq!(pos.pl(), Some(dec!(50)));
        assert_eq!(pos.pl_percent(), Some(dec!(5)));
    }

    #[test]
    fn test_position_pl_derived_from_price() {
        let pos = Position {
            symbol: "NVDA".into(),
            qty: dec!(2),
            avg: dec!(100),
            price: Some(dec!(110)),
            pl: None,
        };
        assert_eq!(pos.pl(), Some(dec!(20)));
        assert_eq!(pos.pl_percent(), Some(dec!(10)));
        assert_eq!(pos.value(), Some(dec!(220)));
    }

    #[test]
    fn test_position_zero_basis_yields_no_percent() {
        let pos = Position {
            symbol: "X".into(),
            qty: dec!(0),
            avg: dec!(0),
            price: None,
            pl: Some(dec!(1)),
        };
        assert_eq!(pos.pl_percent(), None);
    }

    #[test]
    fn test_notification_shapes() {
        let mixed: Vec<Notification> =
            serde_json::from_str(r#"[{"text": "Bought 2 AAPL"}, "plain line"]"#).unwrap();
        assert_eq!(mixed[0].text(), "Bought 2 AAPL");
        assert_eq!(mixed[1].text(), "plain line");
    }

    #[test]
    fn test_analyze_request_omits_empty_fields() {
        let req = AnalyzeRequest {
            capital: dec!(10000),
            risk: None,
            lev: None,
            inds: vec![],
            llm: Some("gpt-4o".into()),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("risk").is_none());
        assert!(json.get("inds").is_none());
        assert_eq!(json["llm"], "gpt-4o");
    }
}
