//! App module - contains the main application state and logic

mod login;

use crate::auth::AuthService;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) auth: AuthService,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Sign-in form
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) login_visible: bool,
    pub(crate) focus_email: bool,
    pub(crate) was_pending: bool,
    pub(crate) remember_email: bool,
    // Settings modal
    pub(crate) show_settings: bool,
    pub(crate) server_url_str: String,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Central panel rect for toast positioning
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window state
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let server_url = settings.server_url_or_default();
        let email = if settings.remember_email {
            settings.last_email.clone().unwrap_or_default()
        } else {
            String::new()
        };

        Self {
            auth: AuthService::new(server_url.clone()),
            runtime: tokio::runtime::Runtime::new().unwrap(),
            email,
            password: String::new(),
            login_visible: false,
            focus_email: false,
            was_pending: false,
            remember_email: settings.remember_email,
            show_settings: false,
            server_url_str: server_url,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            server_url: Some(self.server_url_str.clone()),
            remember_email: self.remember_email,
            last_email: if self.remember_email && !self.email.trim().is_empty() {
                Some(self.email.trim().to_string())
            } else {
                None
            },
        };
        settings.save(&self.data_dir);
    }

    /// Open the sign-in form
    pub fn show_login(&mut self) {
        self.login_visible = true;
        self.focus_email = true;
    }

    /// Close the sign-in form and drop the typed password
    pub fn close_login(&mut self) {
        self.login_visible = false;
        self.password.clear();
    }

    pub fn is_login_visible(&self) -> bool {
        self.login_visible
    }

    /// Raise a toast in the bottom-right corner of the window
    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}
