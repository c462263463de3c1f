//! egui-based dashboard application

pub mod app;
pub mod controls;

pub use app::DashboardApp;

use anyhow::Result;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::data_paths::DataPaths;
use crate::feeds::DashboardService;
use crate::prefs::{PreferenceStore, Theme};

/// Launch the dashboard GUI application
pub async fn launch_dashboard(
    width: u32,
    height: u32,
    title: &str,
    host: &str,
    data_paths: DataPaths,
) -> Result<()> {
    info!("Launching dashboard GUI");

    let config = DashboardConfig::load_or_create(&data_paths)?;
    let client = ApiClient::new(host)?;
    let service = DashboardService::new(client, config);

    let store = PreferenceStore::new(&data_paths);
    let prefs = store.load();
    let theme = prefs.theme;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_min_inner_size([800.0, 600.0])
            .with_title(title),
        ..Default::default()
    };

    let app_result = eframe::run_native(
        title,
        native_options,
        Box::new(move |cc| {
            setup_style(&cc.egui_ctx, theme);
            let app = DashboardApp::new(cc, service, store, prefs);
            Ok(Box::new(app))
        }),
    );

    match app_result {
        Ok(()) => {
            info!("Dashboard closed");
            Ok(())
        }
        Err(e) => {
            error!("Dashboard error: {}", e);
            Err(anyhow::anyhow!("GUI error: {}", e))
        }
    }
}

/// Apply theme visuals plus the trading accent colors
pub(crate) fn setup_style(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Dark => ctx.set_visuals(egui::Visuals::dark()),
        Theme::Light => ctx.set_visuals(egui::Visuals::light()),
    }

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    // Red for losses, yellow for warnings
    style.visuals.error_fg_color = egui::Color32::from_rgb(220, 80, 80);
    style.visuals.warn_fg_color = egui::Color32::from_rgb(255, 200, 100);

    ctx.set_style(style);
}

/// Green used for winning P/L figures
pub(crate) const GAIN_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 190, 110);
