//! Header row of the related-list table.

use dealgrid_business::ColumnDescriptor;
use egui_extras::TableRow;

#[inline]
pub fn render_table_header(descriptors: &[ColumnDescriptor], header: &mut TableRow<'_, '_>) {
    for descriptor in descriptors {
        header.col(|ui| {
            render_header_cell(&descriptor.label, ui);
        });
    }
}

#[inline]
fn render_header_cell(label: &str, ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.strong(label);
    });
}
