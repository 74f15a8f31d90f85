//! Derivatives contract types.

use super::common::StringDecimal;
use serde::{Deserialize, Serialize};

/// Parameters for `GET /derivatives/v3/public/kline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KlineParam {
    /// "linear" or "inverse".
    pub category: String,
    /// Symbol.
    pub symbol: String,
    /// Interval: 1 3 5 15 30 60 120 240 360 720 D M W.
    pub interval: String,
    /// Start time in milliseconds.
    pub start: i64,
    /// End time in milliseconds.
    pub end: i64,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Kline page. Each row is
/// `[startTime, open, high, low, close, volume, turnover]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContractKlines {
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Symbol.
    pub symbol: String,
    /// Interval.
    pub interval: String,
    /// Rows, newest first.
    pub list: Vec<Vec<String>>,
}

/// Wallet balances.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContractBalances {
    /// One entry per coin.
    pub list: Vec<ContractBalance>,
}

/// Wallet balance of one coin.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractBalance {
    /// Coin.
    pub coin: String,
    /// Equity.
    #[serde(default)]
    pub equity: StringDecimal,
    /// Wallet balance.
    #[serde(default)]
    pub wallet_balance: StringDecimal,
    /// Available balance.
    #[serde(default)]
    pub available_balance: StringDecimal,
    /// Position margin.
    #[serde(default)]
    pub position_margin: StringDecimal,
    /// Order margin.
    #[serde(default)]
    pub order_margin: StringDecimal,
    /// Unrealised PnL.
    #[serde(default)]
    pub unrealised_pnl: StringDecimal,
    /// Cumulative realised PnL.
    #[serde(default)]
    pub cum_realised_pnl: StringDecimal,
}
