//! Background polling service feeding the dashboard panels.
//!
//! One independent tokio task per feed, each writing into its own state
//! slot. The GUI reads through non-blocking `*_sync` getters. A failed
//! fetch substitutes the feed's fixed placeholder; the next scheduled tick
//! is the only retry mechanism.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::api::{
    AnalyzeRequest, ApiClient, ApiError, Notification, Position, PriceBoard, Profile,
    TelegramStatus,
};
use crate::config::DashboardConfig;
use crate::feeds::FeedStatus;
use crate::render;

type Slot<T> = Arc<RwLock<FeedStatus<T>>>;

fn new_slot<T>() -> Slot<T> {
    Arc::new(RwLock::new(FeedStatus::Loading))
}

/// Repaint hook invoked after every feed update
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct DashboardService {
    client: ApiClient,
    config: DashboardConfig,

    ticker: Slot<PriceBoard>,
    profile: Slot<Profile>,
    positions: Slot<Vec<Position>>,
    notifications: Slot<Vec<Notification>>,
    telegram: Slot<TelegramStatus>,

    /// Markdown text of the market brief, shared by the periodic
    /// summary poll and the manual analyze action
    brief: Slot<String>,
    /// Generation counter ordering writes to the brief slot: a manual
    /// analyze bumps it, and any response completing against a stale
    /// generation is discarded instead of racing the newer one
    brief_generation: Arc<AtomicU64>,
    analyze_in_flight: Arc<AtomicUsize>,
}

impl DashboardService {
    pub fn new(client: ApiClient, config: DashboardConfig) -> Self {
        Self {
            client,
            config,
            ticker: new_slot(),
            profile: new_slot(),
            positions: new_slot(),
            notifications: new_slot(),
            telegram: new_slot(),
            brief: new_slot(),
            brief_generation: Arc::new(AtomicU64::new(0)),
            analyze_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Spawn one polling task per feed. Loops run for the lifetime of the
    /// process; the hook requests a repaint after each completed update.
    pub fn spawn_polling(&self, repaint: RepaintHook) {
        let poll = self.config.poll;

        self.spawn_loop(poll.ticker_secs, repaint.clone(), |s| async move {
            s.refresh_ticker().await;
        });
        self.spawn_loop(poll.portfolio_secs, repaint.clone(), |s| async move {
            s.refresh_portfolio().await;
        });
        self.spawn_loop(poll.notifications_secs, repaint.clone(), |s| async move {
            s.refresh_notifications().await;
        });
        self.spawn_loop(poll.telegram_secs, repaint.clone(), |s| async move {
            s.refresh_telegram().await;
        });
        self.spawn_loop(poll.brief_secs, repaint, |s| async move {
            s.refresh_brief().await;
        });
    }

    fn spawn_loop<F, Fut>(&self, period_secs: u64, repaint: RepaintHook, refresh: F)
    where
        F: Fn(DashboardService) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send,
    {
        let service = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(period_secs.max(1)));
            loop {
                interval.tick().await;
                refresh(service.clone()).await;
                repaint();
            }
        });
    }

    pub async fn refresh_ticker(&self) {
        let status = match self.client.prices(&self.config.symbols).await {
            Ok(board) => FeedStatus::Ready(board),
            // A backend error field short-circuits to that text verbatim
            Err(ApiError::Backend(message)) => FeedStatus::Unavailable(message),
            Err(e) => {
                warn!(error = %e, "Ticker fetch failed");
                FeedStatus::Unavailable(render::TICKER_UNAVAILABLE.to_string())
            }
        };
        *self.ticker.write().await = status;
    }

    pub async fn refresh_portfolio(&self) {
        let profile = match self.client.profile().await {
            Ok(profile) => FeedStatus::Ready(profile),
            Err(e) => {
                warn!(error = %e, "Profile fetch failed");
                FeedStatus::Unavailable(render::STAT_UNAVAILABLE.to_string())
            }
        };
        *self.profile.write().await = profile;

        let positions = match self.client.positions().await {
            Ok(response) => FeedStatus::Ready(response.positions),
            Err(e) => {
                warn!(error = %e, "Positions fetch failed");
                FeedStatus::Unavailable(render::STAT_UNAVAILABLE.to_string())
            }
        };
        *self.positions.write().await = positions;
    }

    pub async fn refresh_notifications(&self) {
        let status = match self.client.notifications().await {
            Ok(items) => FeedStatus::Ready(items),
            Err(e) => {
                warn!(error = %e, "Notifications fetch failed");
                FeedStatus::Unavailable(render::NO_NOTIFICATIONS.to_string())
            }
        };
        *self.notifications.write().await = status;
    }

    pub async fn refresh_telegram(&self) {
        let status = match self.client.telegram_status().await {
            Ok(status) => FeedStatus::Ready(status),
            Err(e) => {
                warn!(error = %e, "Telegram status fetch failed");
                FeedStatus::Unavailable("Offline".to_string())
            }
        };
        *self.telegram.write().await = status;
    }

    pub async fn refresh_brief(&self) {
        let generation = self.brief_generation.load(Ordering::Acquire);
        let text = match self.client.hourly_summary().await {
            Ok(brief) => brief
                .summary
                .unwrap_or_else(|| render::BRIEF_UNAVAILABLE.to_string()),
            Err(e) => {
                warn!(error = %e, "Hourly summary fetch failed");
                render::BRIEF_UNAVAILABLE.to_string()
            }
        };
        self.store_brief_if_current(generation, text).await;
    }

    /// Run the analyze action. Each call bumps the brief generation, so a
    /// superseded request's late response is discarded; concurrent calls
    /// are allowed and the latest-initiated one wins.
    pub async fn analyze(&self, request: AnalyzeRequest) {
        let generation = self.brief_generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.analyze_in_flight.fetch_add(1, Ordering::AcqRel);

        let text = match self.client.analyze(&request).await {
            Ok(brief) => brief
                .summary
                .unwrap_or_else(|| render::BRIEF_UNAVAILABLE.to_string()),
            Err(e) => {
                error!(error = %e, "Analyze request failed");
                render::ANALYZE_FAILED.to_string()
            }
        };

        self.store_brief_if_current(generation, text).await;
        self.analyze_in_flight.fetch_sub(1, Ordering::AcqRel);
    }

    /// Fire-and-forget analyze for the GUI button
    pub fn analyze_async(&self, request: AnalyzeRequest) {
        let service = self.clone();
        tokio::spawn(async move {
            service.analyze(request).await;
        });
    }

    async fn store_brief_if_current(&self, generation: u64, text: String) {
        if self.brief_generation.load(Ordering::Acquire) != generation {
            debug!(generation, "Discarding stale brief response");
            return;
        }
        *self.brief.write().await = FeedStatus::Ready(text);
    }

    // Non-blocking getters for the UI thread

    pub fn ticker_sync(&self) -> FeedStatus<PriceBoard> {
        Self::read_slot(&self.ticker)
    }

    pub fn profile_sync(&self) -> FeedStatus<Profile> {
        Self::read_slot(&self.profile)
    }

    pub fn positions_sync(&self) -> FeedStatus<Vec<Position>> {
        Self::read_slot(&self.positions)
    }

    pub fn notifications_sync(&self) -> FeedStatus<Vec<Notification>> {
        Self::read_slot(&self.notifications)
    }

    pub fn telegram_sync(&self) -> FeedStatus<TelegramStatus> {
        Self::read_slot(&self.telegram)
    }

    pub fn brief_sync(&self) -> FeedStatus<String> {
        Self::read_slot(&self.brief)
    }

    pub fn analyze_in_flight_sync(&self) -> bool {
        self.analyze_in_flight.load(Ordering::Acquire) > 0
    }

    fn read_slot<T: Clone>(slot: &Slot<T>) -> FeedStatus<T> {
        match slot.try_read() {
            Ok(guard) => guard.clone(),
            Err(_) => FeedStatus::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn service() -> DashboardService {
        // Nothing in these tests touches the network
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        DashboardService::new(client, DashboardConfig::default())
    }

    #[tokio::test]
    async fn test_slots_start_loading() {
        let service = service();
        assert!(service.ticker_sync().is_loading());
        assert!(service.brief_sync().is_loading());
        assert!(!service.analyze_in_flight_sync());
    }

    #[tokio::test]
    async fn test_current_brief_generation_is_stored() {
        let service = service();
        let generation = service.brief_generation.load(Ordering::Acquire);

        service
            .store_brief_if_current(generation, "markets are calm".into())
            .await;

        assert_eq!(
            service.brief_sync(),
            FeedStatus::Ready("markets are calm".to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_brief_generation_is_discarded() {
        let service = service();
        let stale = service.brief_generation.load(Ordering::Acquire);

        // A manual analyze supersedes anything captured earlier
        service.brief_generation.fetch_add(1, Ordering::AcqRel);
        let current = service.brief_generation.load(Ordering::Acquire);

        service
            .store_brief_if_current(current, "fresh analysis".into())
            .await;
        service
            .store_brief_if_current(stale, "stale summary".into())
            .await;

        assert_eq!(
            service.brief_sync(),
            FeedStatus::Ready("fresh analysis".to_string())
        );
    }

    #[tokio::test]
    async fn test_analyze_against_dead_endpoint_reports_error_text() {
        let service = service();
        let request = AnalyzeRequest {
            capital: dec!(10000),
            risk: None,
            lev: None,
            inds: vec![],
            llm: None,
        };

        service.analyze(request).await;

        assert_eq!(
            service.brief_sync(),
            FeedStatus::Ready(render::ANALYZE_FAILED.to_string())
        );
        assert!(!service.analyze_in_flight_sync());
    }
}
