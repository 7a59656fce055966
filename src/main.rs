#![windows_subsystem = "windows"]
//! Ticketbox Sign-In - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod auth;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod user;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use types::AuthState;
use ui::components::{close_button, disabled_button, field_label, form_text_field, painted_button};
use utils::format_expiry;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "ticketbox-signin.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ticketbox_signin=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Ticketbox Sign-In");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Ticketbox Sign-In starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(460.0, 560.0)))
        .with_min_inner_size([420.0, 480.0])
        .with_title("Ticketbox Sign-In");

    // Window/taskbar icon rasterized from the inline SVG
    {
        let (rgba, w, h) = utils::rasterize_logo_square(64);
        let icon = egui::IconData {
            rgba,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Ticketbox Sign-In",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // React to the pending request finishing (close form, raise toast)
        self.poll_auth();

        self.render_central_panel(ctx);
        self.render_login_modal(ctx);
        self.render_settings_modal(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}

// ============================================================================
// CENTRAL PANEL
// ============================================================================

impl App {
    fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                // Store panel rect for toast positioning
                self.central_panel_rect = Some(ui.max_rect());

                // Settings gear, top-right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    let (rect, response) =
                        ui.allocate_exact_size(egui::vec2(24.0, 24.0), egui::Sense::click());
                    let color = if response.hovered() {
                        ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        theme::TEXT_SECONDARY
                    } else {
                        theme::TEXT_DIM
                    };
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        egui_phosphor::regular::GEAR,
                        egui::FontId::proportional(16.0),
                        color,
                    );
                    if response.clicked() {
                        self.show_settings = true;
                    }
                });

                ui.add_space(20.0);

                // Logo + wordmark
                let avail_w = ui.available_width();
                ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                    let texture = self.logo_texture.get_or_insert_with(|| {
                        let (pixels, w, h) = utils::rasterize_logo(480);
                        ctx.load_texture(
                            "logo",
                            egui::ColorImage::from_rgba_unmultiplied(
                                [w as usize, h as usize],
                                &pixels,
                            ),
                            egui::TextureOptions::LINEAR,
                        )
                    });

                    let aspect = texture.size()[1] as f32 / texture.size()[0] as f32;
                    let logo_w = (avail_w * 0.35).min(150.0);
                    let logo_size = egui::vec2(logo_w, logo_w * aspect);
                    ui.image(egui::load::SizedTexture::new(texture.id(), logo_size));

                    ui.add_space(4.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("TICKETBOX")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });

                ui.add_space(24.0);

                // Session card
                theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    match self.auth.state() {
                        AuthState::SignedIn(user) => {
                            ui.horizontal(|ui| {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(egui_phosphor::regular::USER_CIRCLE)
                                            .size(18.0)
                                            .color(theme::STATUS_SUCCESS),
                                    )
                                    .selectable(false),
                                );
                                ui.label(
                                    egui::RichText::new(&user.id)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_PRIMARY),
                                );
                            });
                            ui.add_space(theme::SPACING_SM);
                            if user.is_expired() {
                                ui.label(
                                    egui::RichText::new("Session expired")
                                        .size(theme::FONT_LABEL)
                                        .color(theme::STATUS_WARNING),
                                );
                            } else {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "Session valid until {}",
                                        format_expiry(&user.expires_at)
                                    ))
                                    .size(theme::FONT_LABEL)
                                    .color(theme::TEXT_MUTED),
                                );
                            }
                            ui.add_space(theme::SPACING_MD);
                            if painted_button(
                                ui,
                                "Sign Out",
                                theme::BTN_DANGER,
                                egui::vec2(100.0, theme::BUTTON_HEIGHT),
                            )
                            .clicked()
                            {
                                self.sign_out();
                            }
                        }
                        _ => {
                            ui.label(
                                egui::RichText::new("You are not signed in")
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            ui.add_space(theme::SPACING_SM);
                            ui.label(
                                egui::RichText::new(format!("Server: {}", self.auth.base_url()))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            );
                            ui.add_space(theme::SPACING_MD);
                            if painted_button(
                                ui,
                                "Sign In",
                                theme::BTN_ACCENT,
                                egui::vec2(100.0, theme::BUTTON_HEIGHT),
                            )
                            .clicked()
                            {
                                self.show_login();
                            }
                        }
                    }
                });

                // Footer version
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                });
            });
    }

    // ========================================================================
    // SIGN-IN MODAL
    // ========================================================================

    fn render_login_modal(&mut self, ctx: &egui::Context) {
        if !self.is_login_visible() {
            return;
        }

        let state = self.auth.state();
        let pending = matches!(state, AuthState::Pending);

        let modal_response = egui::Modal::new(egui::Id::new("login_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(300.0);

                // Title bar with close button
                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Sign In").size(theme::FONT_HEADING).strong(),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if close_button(ui) {
                            self.close_login();
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_MD);

                field_label(ui, "Email");
                let email_resp = form_text_field(ui, &mut self.email, "you@example.com", false);
                if self.focus_email {
                    self.focus_email = false;
                    email_resp.request_focus();
                }

                ui.add_space(theme::SPACING_SM);
                field_label(ui, "Password");
                let password_resp = form_text_field(ui, &mut self.password, "", true);

                // Error line (validation or request failure)
                if let Some(msg) = state.error() {
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new(msg)
                            .size(theme::FONT_LABEL)
                            .color(theme::STATUS_ERROR),
                    );
                }

                ui.add_space(theme::SPACING_MD);
                if theme::settings_checkbox(ui, self.remember_email, "Remember email", true) {
                    self.remember_email = !self.remember_email;
                }

                ui.add_space(theme::SPACING_MD);

                let submitted = (email_resp.lost_focus() || password_resp.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    if pending {
                        disabled_button(
                            ui,
                            "Signing in...",
                            egui::vec2(120.0, theme::BUTTON_HEIGHT),
                        );
                        ui.add(egui::Spinner::new().size(16.0).color(theme::ACCENT_LIGHT));
                    } else if painted_button(
                        ui,
                        "Sign In",
                        theme::BTN_ACCENT,
                        egui::vec2(120.0, theme::BUTTON_HEIGHT),
                    )
                    .clicked()
                        || submitted
                    {
                        self.submit_login(ctx);
                    }
                });
            });

        if modal_response.should_close() && !pending {
            self.close_login();
        }
    }

    // ========================================================================
    // SETTINGS MODAL
    // ========================================================================

    fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(300.0);

                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Settings").size(theme::FONT_HEADING).strong(),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if close_button(ui) {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(4.0);
                ui.separator();
                ui.add_space(theme::SPACING_MD);

                field_label(ui, "Server");
                let url_resp = form_text_field(ui, &mut self.server_url_str, DEFAULT_SERVER_URL, false);
                if url_resp.lost_focus() {
                    let url = self.server_url_str.trim().to_string();
                    if !url.is_empty() && url != self.auth.base_url() {
                        info!(url = %url, "Server URL changed");
                        self.auth.set_base_url(url);
                        self.save_settings();
                    }
                }
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new("Applies to the next sign-in.")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }

    // ========================================================================
    // TOAST
    // ========================================================================

    /// Toast notification (bottom-right of central panel, 3s visible then fade, pause on hover)
    fn render_toast(&mut self, ctx: &egui::Context) {
        if let (Some(msg), Some(panel_rect)) = (&self.toast_message.clone(), self.central_panel_rect)
        {
            let visible_duration = 3.0;
            let fade_duration = 0.5;
            let total_duration = visible_duration + fade_duration;
            let margin = 12.0;

            let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);

            let response = egui::Area::new(egui::Id::new("signin_toast"))
                .fixed_pos(toast_pos)
                .pivot(egui::Align2::RIGHT_BOTTOM)
                .show(ctx, |ui| {
                    let elapsed =
                        self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                    let alpha = if elapsed > visible_duration {
                        (total_duration - elapsed) / fade_duration
                    } else {
                        1.0
                    };

                    egui::Frame::new()
                        .fill(egui::Color32::from_rgba_unmultiplied(
                            0x1a,
                            0x1a,
                            0x1e,
                            (230.0 * alpha) as u8,
                        ))
                        .stroke(egui::Stroke::new(
                            1.0,
                            egui::Color32::from_rgba_unmultiplied(
                                theme::ACCENT.r(),
                                theme::ACCENT.g(),
                                theme::ACCENT.b(),
                                (100.0 * alpha) as u8,
                            ),
                        ))
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(16, 10))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(msg).color(
                                egui::Color32::from_rgba_unmultiplied(
                                    255,
                                    255,
                                    255,
                                    (255.0 * alpha) as u8,
                                ),
                            ));
                        });
                });

            // Pause timer while hovering
            if response.response.hovered() {
                self.toast_start = Some(std::time::Instant::now());
            }

            let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
            if elapsed >= total_duration {
                self.toast_message = None;
                self.toast_start = None;
            } else {
                ctx.request_repaint();
            }
        }
    }
}
