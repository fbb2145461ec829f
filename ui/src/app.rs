use chrono::Utc;
use dealgrid_business::ToastsState;
use dealgrid_states::Time;

use crate::{state::State, widgets};

pub struct DealGridApp {
    pub state: State,
}

impl DealGridApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for DealGridApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the virtual clock, then apply queued async results.
        self.state.ctx.update::<Time>(|time| time.set(Utc::now()));
        self.state.ctx.sync_computes();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::query_bar(&mut self.state.ctx, &mut self.state.query_bar, ui);
                widgets::env_version(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Opportunities");
            ui.separator();
            widgets::related_list_panel(&mut self.state.ctx, ui);
        });

        widgets::toast_overlay(&mut self.state.ctx, ctx);

        // Dispatch queued commands, then re-run dirty computes.
        self.state.ctx.flush_commands();
        self.state.ctx.run_computed();

        if self.state.ctx.has_active_tasks() {
            ctx.request_repaint();
        } else if !self.state.ctx.state::<ToastsState>().is_empty() {
            // Keep painting while toasts are up so their expiry is observed
            // without waiting for input.
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}
