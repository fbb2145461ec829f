//! One table row: a cell per column descriptor plus the bottom border.

use dealgrid_business::{ColumnDescriptor, ColumnKind, OpportunityRow, RelatedListState};
use egui_extras::TableRow;
use ustr::Ustr;

use super::cells::{render_stage_cell, render_value_cell};

#[inline]
pub fn render_opportunity_row(
    state: &mut RelatedListState,
    descriptors: &[ColumnDescriptor],
    row: &mut TableRow<'_, '_>,
    opportunity: &OpportunityRow,
) {
    let row_id = Ustr::from(&opportunity.record.id);
    for descriptor in descriptors {
        row.col(|ui| {
            let stored = opportunity.record.field_text(descriptor.field_name.as_str());
            match descriptor.kind {
                ColumnKind::Picklist => render_stage_cell(
                    state,
                    descriptor,
                    row_id,
                    &stored,
                    opportunity.stage_options.as_slice(),
                    ui,
                ),
                ColumnKind::Text | ColumnKind::Currency | ColumnKind::Date => {
                    render_value_cell(state, descriptor, row_id, &stored, ui);
                }
            }
            draw_cell_bottom_border(ui);
        });
    }
}

fn draw_cell_bottom_border(ui: &egui::Ui) {
    let rect = ui.max_rect();
    ui.painter().hline(
        rect.x_range(),
        rect.bottom(),
        egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
    );
}
