//! Backend endpoint contracts and HTTP client

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiError, ApiResult};
pub use types::{
    AnalyzeRequest, MarketBrief, Notification, Position, PositionsResponse, PriceBoard, Profile,
    TelegramStatus,
};
