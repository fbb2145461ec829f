//! Badge showing which build environment the binary was produced for.

use dealgrid_utils::version_info::{env_version_info, format_env_version};

/// Environment badge for the top bar, colored by build channel.
pub fn env_version(ui: &mut egui::Ui) {
    let (env_name, _) = env_version_info();
    let color = match env_name {
        "stable" => egui::Color32::GREEN,
        "nightly" => egui::Color32::from_rgb(255, 165, 0),
        "sandbox" => egui::Color32::YELLOW,
        _ => egui::Color32::WHITE,
    };
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.colored_label(color, format_env_version());
    });
}
