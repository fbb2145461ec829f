//! Overlay stacking the active toasts in the top-right corner.

use dealgrid_business::{Toast, ToastLevel, ToastsState};
use dealgrid_states::{StateCtx, Time};

/// Renders the toast stack over everything else and applies dismiss clicks.
///
/// Expiry runs first against the virtual clock, so a toast past its TTL
/// never renders even when no input arrived in between.
pub fn toast_overlay(state_ctx: &mut StateCtx, ctx: &egui::Context) {
    let now = state_ctx.state::<Time>().now();
    state_ctx.state_mut::<ToastsState>().expire(now);

    let toasts: Vec<Toast> = state_ctx.state::<ToastsState>().toasts().to_vec();
    if toasts.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toast_overlay"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in &toasts {
                if render_toast(toast, ui) {
                    dismissed = Some(toast.id);
                }
            }
        });

    if let Some(id) = dismissed {
        state_ctx.state_mut::<ToastsState>().dismiss(id);
    }
}

fn accent_color(level: ToastLevel) -> egui::Color32 {
    match level {
        ToastLevel::Success => egui::Color32::from_rgb(34, 139, 34),
        ToastLevel::Error => egui::Color32::RED,
        ToastLevel::Info => egui::Color32::LIGHT_BLUE,
    }
}

/// Returns true when the toast's dismiss button was clicked.
fn render_toast(toast: &Toast, ui: &mut egui::Ui) -> bool {
    let accent = accent_color(toast.level);
    let mut clicked = false;
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .stroke(egui::Stroke::new(1.0, accent))
        .inner_margin(egui::Margin::same(8))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.set_max_width(320.0);
            ui.horizontal(|ui| {
                ui.colored_label(accent, egui::RichText::new(toast.title.as_str()).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        clicked = true;
                    }
                });
            });
            ui.label(toast.message.as_str());
        });
    ui.add_space(6.0);
    clicked
}
