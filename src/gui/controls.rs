//! Typed view state for the analyze controls.
//!
//! Pill groups are modeled as explicit selection state instead of ambient
//! widget queries: single-select groups hold at most one value, the
//! indicator group toggles each pill independently.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::api::AnalyzeRequest;

/// Mutually-exclusive pill group (risk, leverage, model)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleSelect<T> {
    selected: Option<T>,
}

impl<T> Default for SingleSelect<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T: Copy + PartialEq> SingleSelect<T> {
    pub fn select(&mut self, value: T) {
        self.selected = Some(value);
    }

    pub fn is_selected(&self, value: T) -> bool {
        self.selected == Some(value)
    }

    pub fn selected(&self) -> Option<T> {
        self.selected
    }
}

/// Independently-toggled pill group (indicators)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelect<T: Ord> {
    selected: BTreeSet<T>,
}

impl<T: Ord> Default for MultiSelect<T> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<T: Copy + Ord> MultiSelect<T> {
    pub fn toggle(&mut self, value: T) {
        if !self.selected.insert(value) {
            self.selected.remove(&value);
        }
    }

    pub fn is_selected(&self, value: T) -> bool {
        self.selected.contains(&value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Wire value sent in the analyze body
    pub fn value(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leverage {
    X1,
    X2,
    X5,
    X10,
}

impl Leverage {
    pub const ALL: [Leverage; 4] = [Leverage::X1, Leverage::X2, Leverage::X5, Leverage::X10];

    pub fn label(self) -> &'static str {
        match self {
            Leverage::X1 => "1x",
            Leverage::X2 => "2x",
            Leverage::X5 => "5x",
            Leverage::X10 => "10x",
        }
    }

    pub fn value(self) -> u32 {
        match self {
            Leverage::X1 => 1,
            Leverage::X2 => 2,
            Leverage::X5 => 5,
            Leverage::X10 => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Indicator {
    Rsi,
    Macd,
    Ema,
    Bollinger,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Rsi,
        Indicator::Macd,
        Indicator::Ema,
        Indicator::Bollinger,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Rsi => "RSI",
            Indicator::Macd => "MACD",
            Indicator::Ema => "EMA",
            Indicator::Bollinger => "Bollinger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    O3Mini,
}

impl Model {
    pub const ALL: [Model; 3] = [Model::Gpt4o, Model::Gpt4oMini, Model::O3Mini];

    /// Model used when no pill is selected
    pub const DEFAULT: Model = Model::Gpt4o;

    pub fn label(self) -> &'static str {
        self.value()
    }

    pub fn value(self) -> &'static str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::O3Mini => "o3-mini",
        }
    }
}

/// Capital slider bounds and starting value
pub const CAPITAL_MIN: u32 = 100;
pub const CAPITAL_MAX: u32 = 100_000;
pub const CAPITAL_DEFAULT: u32 = 10_000;

/// Complete control state behind the analyze action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsState {
    pub capital: u32,
    pub risk: SingleSelect<RiskLevel>,
    pub leverage: SingleSelect<Leverage>,
    pub indicators: MultiSelect<Indicator>,
    pub model: SingleSelect<Model>,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            capital: CAPITAL_DEFAULT,
            risk: SingleSelect::default(),
            leverage: SingleSelect::default(),
            indicators: MultiSelect::default(),
            model: SingleSelect::default(),
        }
    }
}

impl ControlsState {
    /// Snapshot the controls into an analyze body. Absent selections are
    /// omitted, except the model which falls back to the default.
    pub fn to_request(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            capital: Decimal::from(self.capital),
            risk: self.risk.selected().map(|r| r.value().to_string()),
            lev: self.leverage.selected().map(Leverage::value),
            inds: self
                .indicators
                .iter()
                .map(|i| i.label().to_string())
                .collect(),
            llm: Some(
                self.model
                    .selected()
                    .unwrap_or(Model::DEFAULT)
                    .value()
                    .to_string(),
            ),
        }
    }
}
