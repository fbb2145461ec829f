//! Individual cells: read-only display, the text editor and the stage
//! picklist.
//!
//! A cell with a pending draft paints a tint under whatever it renders, so
//! unsaved changes stay visible without merging drafts into the rows.

use dealgrid_business::{ColumnDescriptor, RelatedListState, STAGE_PLACEHOLDER, StageOption};
use ustr::Ustr;

/// Text, currency and date cells. Shows the draft over the stored value,
/// formatted per column kind; a click opens the editor on the raw text.
#[inline]
pub fn render_value_cell(
    state: &mut RelatedListState,
    descriptor: &ColumnDescriptor,
    row_id: Ustr,
    stored: &str,
    ui: &mut egui::Ui,
) {
    if state.is_editing(row_id, descriptor.field_name) {
        render_cell_editor(state, descriptor, stored, ui);
        return;
    }

    let draft = state.buffer.get(row_id, descriptor.field_name).map(str::to_owned);
    if draft.is_some() {
        draw_draft_tint(ui);
    }
    let raw = draft.as_deref().unwrap_or(stored);
    let display = descriptor.kind.display(raw);

    let response = ui
        .centered_and_justified(|ui| {
            ui.add(egui::Label::new(display).truncate().sense(egui::Sense::click()))
        })
        .inner;
    // While an editor is open elsewhere, a click only blurs it; a second
    // click starts editing here.
    if descriptor.editable && state.editor.is_none() && response.clicked() {
        state.begin_edit(row_id, descriptor.field_name, raw.to_owned());
    }
}

/// The open text editor. Rejected input keeps it open in the error color;
/// Escape discards, anything else that drops focus commits.
fn render_cell_editor(
    state: &mut RelatedListState,
    descriptor: &ColumnDescriptor,
    stored: &str,
    ui: &mut egui::Ui,
) {
    let Some(editor) = state.editor.as_mut() else {
        return;
    };
    let invalid = editor.invalid;
    let mut text_edit = egui::TextEdit::singleline(&mut editor.text).desired_width(f32::INFINITY);
    if invalid {
        text_edit = text_edit.text_color(ui.visuals().error_fg_color);
    }
    let response = ui.add(text_edit);
    if ui.memory(|memory| memory.focused().is_none()) {
        response.request_focus();
    }
    if response.lost_focus() {
        if ui.input(|input| input.key_pressed(egui::Key::Escape)) {
            state.cancel_edit();
        } else {
            state.commit_edit(descriptor.kind, stored);
        }
    }
}

/// The stage picklist. Selection commits straight into the draft buffer;
/// an empty value shows the placeholder.
#[inline]
pub fn render_stage_cell(
    state: &mut RelatedListState,
    descriptor: &ColumnDescriptor,
    row_id: Ustr,
    stored: &str,
    options: &[StageOption],
    ui: &mut egui::Ui,
) {
    let draft = state.buffer.get(row_id, descriptor.field_name).map(str::to_owned);
    if draft.is_some() {
        draw_draft_tint(ui);
    }
    let selected = draft.as_deref().unwrap_or(stored);
    let selected_label = options
        .iter()
        .find(|option| option.value == selected)
        .map(|option| option.label.as_str());
    let text = if selected.is_empty() {
        descriptor.placeholder.unwrap_or(STAGE_PLACEHOLDER)
    } else {
        selected_label.unwrap_or(selected)
    };

    let mut chosen = None;
    egui::ComboBox::from_id_salt((row_id, descriptor.field_name))
        .width(ui.available_width())
        .selected_text(text)
        .show_ui(ui, |ui| {
            for option in options {
                if ui
                    .selectable_label(option.value == selected, option.label.as_str())
                    .clicked()
                {
                    chosen = Some(option.value.clone());
                }
            }
        });
    if let Some(value) = chosen {
        state.set_draft(row_id, descriptor.field_name, value, stored);
    }
}

fn draw_draft_tint(ui: &egui::Ui) {
    ui.painter().rect_filled(
        ui.available_rect_before_wrap(),
        0.0,
        egui::Color32::from_rgba_unmultiplied(255, 200, 0, 36),
    );
}
