//! Main dashboard application with egui interface

use egui_commonmark::{CommonMarkCache, CommonMarkViewer};
use std::sync::Arc;
use tracing::{info, warn};

use crate::feeds::{DashboardService, FeedStatus};
use crate::gui::controls::{
    ControlsState, Indicator, Leverage, Model, MultiSelect, RiskLevel, SingleSelect, CAPITAL_MAX,
    CAPITAL_MIN,
};
use crate::prefs::{self, PreferenceStore, Preferences};
use crate::render::{self, Tone};

pub struct DashboardApp {
    service: DashboardService,

    /// User preferences, written back on every change
    store: PreferenceStore,
    prefs: Preferences,

    /// Analyze control state
    controls: ControlsState,

    /// Markdown rendering cache for the market brief
    commonmark: CommonMarkCache,

    /// Avatar state
    avatar_texture: Option<egui::TextureHandle>,
    avatar_path: String,
    avatar_error: Option<String>,

    nickname: String,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        service: DashboardService,
        store: PreferenceStore,
        prefs: Preferences,
    ) -> Self {
        info!("Creating dashboard app");

        // Every feed update repaints the UI
        let repaint_ctx = cc.egui_ctx.clone();
        service.spawn_polling(Arc::new(move || repaint_ctx.request_repaint()));

        let avatar_texture = prefs
            .avatar
            .as_deref()
            .and_then(|url| match Self::texture_from_data_url(&cc.egui_ctx, url) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    warn!(error = %e, "Stored avatar could not be decoded");
                    None
                }
            });

        let nickname = prefs.nickname.clone().unwrap_or_default();

        Self {
            service,
            store,
            prefs,
            controls: ControlsState::default(),
            commonmark: CommonMarkCache::default(),
            avatar_texture,
            avatar_path: String::new(),
            avatar_error: None,
            nickname,
        }
    }

    fn texture_from_data_url(
        ctx: &egui::Context,
        url: &str,
    ) -> anyhow::Result<egui::TextureHandle> {
        let bytes = prefs::decode_data_url(url)?;
        Self::texture_from_bytes(ctx, &bytes)
    }

    fn texture_from_bytes(ctx: &egui::Context, bytes: &[u8]) -> anyhow::Result<egui::TextureHandle> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        Ok(ctx.load_texture("avatar", color_image, egui::TextureOptions::LINEAR))
    }

    fn save_prefs(&self) {
        if let Err(e) = self.store.save(&self.prefs) {
            warn!(error = %e, "Failed to persist preferences");
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.prefs.theme = self.prefs.theme.toggled();
        crate::gui::setup_style(ctx, self.prefs.theme);
        self.save_prefs();
    }

    fn load_avatar(&mut self, ctx: &egui::Context) {
        let path = self.avatar_path.trim().to_string();
        if path.is_empty() {
            return;
        }

        let loaded = std::fs::read(&path)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| {
                let format = image::guess_format(&bytes)?;
                let texture = Self::texture_from_bytes(ctx, &bytes)?;
                Ok((format.to_mime_type(), bytes, texture))
            });

        match loaded {
            Ok((mime, bytes, texture)) => {
                self.prefs.avatar = Some(prefs::encode_data_url(mime, &bytes));
                self.avatar_texture = Some(texture);
                self.avatar_error = None;
                self.save_prefs();
            }
            Err(e) => {
                warn!(error = %e, path = %path, "Avatar load failed");
                self.avatar_error = Some(format!("Could not load image: {}", e));
            }
        }
    }

    fn tone_color(&self, visuals: &egui::Visuals, tone: Tone) -> egui::Color32 {
        match tone {
            Tone::Positive => crate::gui::GAIN_COLOR,
            Tone::Negative => visuals.error_fg_color,
            Tone::Neutral => visuals.text_color(),
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Trading Assistant");
                ui.separator();

                let ticker_text = match self.service.ticker_sync() {
                    FeedStatus::Ready(board) => render::ticker_line(&board),
                    FeedStatus::Unavailable(text) => text,
                    FeedStatus::Loading => "…".to_string(),
                };
                ui.monospace(ticker_text);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = match self.prefs.theme {
                        prefs::Theme::Light => "🌙",
                        prefs::Theme::Dark => "☀",
                    };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_profile_section(ui, ctx);
                    ui.separator();
                    self.show_account_section(ui);
                    ui.separator();
                    self.show_telegram_section(ui);
                    ui.separator();
                    self.show_notifications_section(ui);
                });
            });
    }

    fn show_profile_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Profile");
        ui.horizontal(|ui| {
            match &self.avatar_texture {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(egui::vec2(48.0, 48.0)));
                }
                None => {
                    ui.label(egui::RichText::new("👤").size(36.0));
                }
            }

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.nickname)
                    .hint_text("nickname")
                    .desired_width(140.0),
            );
            if response.changed() {
                self.prefs.nickname = if self.nickname.is_empty() {
                    None
                } else {
                    Some(self.nickname.clone())
                };
                self.save_prefs();
            }
        });

        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.avatar_path)
                    .hint_text("path to avatar image")
                    .desired_width(160.0),
            );
            if ui.button("Load").clicked() {
                self.load_avatar(ctx);
            }
        });
        if let Some(error) = &self.avatar_error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    }

    fn show_account_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Account");

        match self.service.profile_sync() {
            FeedStatus::Ready(profile) => {
                egui::Grid::new("account_stats").num_columns(2).show(ui, |ui| {
                    ui.label("Capital");
                    ui.monospace(format!("${}", render::fixed2(profile.capital)));
                    ui.end_row();

                    ui.label("Open trades");
                    ui.monospace(profile.open_trades.to_string());
                    ui.end_row();

                    ui.label("P/L today");
                    let (text, tone) = render::signed_cell(Some(profile.pl_today));
                    let color = self.tone_color(ui.visuals(), tone);
                    ui.monospace(egui::RichText::new(text).color(color));
                    ui.end_row();
                });
            }
            FeedStatus::Unavailable(text) => {
                egui::Grid::new("account_stats").num_columns(2).show(ui, |ui| {
                    for label in ["Capital", "Open trades", "P/L today"] {
                        ui.label(label);
                        ui.monospace(text.clone());
                        ui.end_row();
                    }
                });
            }
            FeedStatus::Loading => {
                ui.label("…");
            }
        }
    }

    fn show_telegram_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Telegram");
        let line = match self.service.telegram_sync() {
            FeedStatus::Ready(status) => render::telegram_line(&status),
            FeedStatus::Unavailable(text) => text,
            FeedStatus::Loading => "…".to_string(),
        };
        ui.label(line);
    }

    fn show_notifications_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Notifications");
        match self.service.notifications_sync() {
            FeedStatus::Ready(items) => {
                for block in render::notification_blocks(&items) {
                    ui.label(block);
                }
            }
            FeedStatus::Unavailable(text) => {
                ui.label(text);
            }
            FeedStatus::Loading => {
                ui.label("…");
            }
        }
    }

    fn show_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_brief_section(ui);
                ui.separator();
                self.show_positions_section(ui);
                ui.separator();
                self.show_analyze_section(ui);
            });
        });
    }

    fn show_brief_section(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Market Brief");
            if self.service.analyze_in_flight_sync() {
                ui.add(egui::Spinner::new());
            }
        });

        let text = match self.service.brief_sync() {
            FeedStatus::Ready(text) => text,
            FeedStatus::Unavailable(text) => text,
            FeedStatus::Loading => "…".to_string(),
        };
        CommonMarkViewer::new().show(ui, &mut self.commonmark, &text);
    }

    fn show_positions_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Positions");

        match self.service.positions_sync() {
            FeedStatus::Ready(positions) if positions.is_empty() => {
                ui.label("No positions.");
            }
            FeedStatus::Ready(positions) => {
                egui::Grid::new("positions")
                    .striped(true)
                    .num_columns(6)
                    .show(ui, |ui| {
                        for header in ["Symbol", "Qty", "Avg", "Value", "P/L", "P/L %"] {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for position in &positions {
                            ui.monospace(&position.symbol);
                            ui.monospace(render::fixed2(position.qty));
                            ui.monospace(render::fixed2(position.avg));
                            ui.monospace(render::price_cell(position.value()));

                            let (pl_text, pl_tone) = render::signed_cell(position.pl());
                            let color = self.tone_color(ui.visuals(), pl_tone);
                            ui.monospace(egui::RichText::new(pl_text).color(color));

                            let (pct_text, pct_tone) = render::signed_cell(position.pl_percent());
                            let color = self.tone_color(ui.visuals(), pct_tone);
                            ui.monospace(egui::RichText::new(pct_text).color(color));
                            ui.end_row();
                        }
                    });
            }
            FeedStatus::Unavailable(text) => {
                ui.label(text);
            }
            FeedStatus::Loading => {
                ui.label("…");
            }
        }
    }

    fn show_analyze_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Analyze");

        ui.add(
            egui::Slider::new(&mut self.controls.capital, CAPITAL_MIN..=CAPITAL_MAX)
                .text("Capital"),
        );

        Self::single_select_row(ui, "Risk", &RiskLevel::ALL, &mut self.controls.risk, |r| {
            r.label()
        });
        Self::single_select_row(
            ui,
            "Leverage",
            &Leverage::ALL,
            &mut self.controls.leverage,
            |l| l.label(),
        );
        Self::multi_select_row(
            ui,
            "Indicators",
            &Indicator::ALL,
            &mut self.controls.indicators,
            |i| i.label(),
        );
        Self::single_select_row(ui, "Model", &Model::ALL, &mut self.controls.model, |m| {
            m.label()
        });

        ui.horizontal(|ui| {
            if ui.button("Analyze").clicked() {
                self.service.analyze_async(self.controls.to_request());
            }
            if self.service.analyze_in_flight_sync() {
                ui.add(egui::Spinner::new());
            }
        });
    }

    fn single_select_row<T: Copy + PartialEq>(
        ui: &mut egui::Ui,
        title: &str,
        values: &[T],
        state: &mut SingleSelect<T>,
        label: impl Fn(T) -> &'static str,
    ) {
        ui.horizontal(|ui| {
            ui.label(title);
            for value in values {
                if ui
                    .selectable_label(state.is_selected(*value), label(*value))
                    .clicked()
                {
                    state.select(*value);
                }
            }
        });
    }

    fn multi_select_row<T: Copy + Ord>(
        ui: &mut egui::Ui,
        title: &str,
        values: &[T],
        state: &mut MultiSelect<T>,
        label: impl Fn(T) -> &'static str,
    ) {
        ui.horizontal(|ui| {
            ui.label(title);
            for value in values {
                if ui
                    .selectable_label(state.is_selected(*value), label(*value))
                    .clicked()
                {
                    state.toggle(*value);
                }
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_top_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central(ctx);
    }
}
