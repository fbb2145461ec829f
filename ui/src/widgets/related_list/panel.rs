//! The related-list panel.
//!
//! Each frame runs in a fixed order: observe terminal fetch/save phases
//! (toasts fire here, not in commands), keep the rows cache in step with the
//! query revision, then draw the toolbar, status banner and table.

use dealgrid_business::{
    ColumnDescriptor, ColumnsCompute, FetchPhase, OpportunityRow, RefreshRelatedListCommand,
    RelatedListQuery, RelatedListRows, RelatedListState, SavePhase, SaveRecords,
    SaveRecordsCommand, ToastsState,
};
use dealgrid_states::{StateCtx, Time};
use egui_extras::TableBuilder;

use super::table::{
    HEADER_HEIGHT, ROW_HEIGHT, render_opportunity_row, render_table_header, table_columns,
};

/// Renders the whole related list for one frame.
pub fn related_list_panel(state_ctx: &mut StateCtx, ui: &mut egui::Ui) {
    observe_fetch(state_ctx);
    observe_save(state_ctx);
    watch_revision(state_ctx);

    render_toolbar(state_ctx, ui);

    if state_ctx.state::<RelatedListQuery>().parent_id().is_none() {
        ui.add_space(12.0);
        ui.label("Set an account record id to load its opportunities.");
        return;
    }

    let rows_cache = state_ctx.cached::<RelatedListRows>().cloned().unwrap_or_default();
    if let Some(message) = rows_cache.failure_message() {
        ui.colored_label(egui::Color32::RED, format!("Error: {message}"));
    }

    let columns = state_ctx
        .cached::<ColumnsCompute>()
        .map(|compute| compute.columns.clone())
        .unwrap_or_default();
    if columns.is_empty() {
        return;
    }

    render_table(
        state_ctx.state_mut::<RelatedListState>(),
        &columns,
        &rows_cache.rows,
        ui,
    );

    if rows_cache.rows.is_empty() && matches!(rows_cache.phase, FetchPhase::Loaded { .. }) {
        ui.label("No opportunities to display.");
    }
}

/// Announces a failed fetch as an error toast, once per query revision. The
/// banner above the table keeps repeating the message; the toast must not.
fn observe_fetch(state_ctx: &mut StateCtx) {
    let Some(rows) = state_ctx.cached::<RelatedListRows>() else {
        return;
    };
    let FetchPhase::Failed { revision, message } = &rows.phase else {
        return;
    };
    let (revision, message) = (*revision, message.clone());
    if state_ctx.state::<RelatedListState>().announced_fetch_failure == Some(revision) {
        return;
    }
    let now = state_ctx.state::<Time>().now();
    state_ctx.state_mut::<RelatedListState>().announced_fetch_failure = Some(revision);
    state_ctx.state_mut::<ToastsState>().error(
        "Error",
        format!("Error fetching opportunities: {message}"),
        now,
    );
}

/// Reacts to a terminal save phase and resets the cache back to idle in the
/// same frame. Success clears the buffer and queues the refetch; failure
/// leaves the buffer intact for another attempt.
fn observe_save(state_ctx: &mut StateCtx) {
    let Some(save) = state_ctx.cached::<SaveRecords>() else {
        return;
    };
    match save.phase.clone() {
        SavePhase::Idle | SavePhase::Saving => {}
        SavePhase::Saved => {
            let now = state_ctx.state::<Time>().now();
            state_ctx
                .state_mut::<ToastsState>()
                .success("Success", "Opportunities updated", now);
            state_ctx.state_mut::<RelatedListState>().buffer.clear();
            state_ctx.compute_mut::<SaveRecords>().reset();
            state_ctx.enqueue_command::<RefreshRelatedListCommand>();
        }
        SavePhase::Failed { message } => {
            let now = state_ctx.state::<Time>().now();
            state_ctx.state_mut::<ToastsState>().error(
                "Error",
                format!("Error updating opportunities: {message}"),
                now,
            );
            state_ctx.compute_mut::<SaveRecords>().reset();
        }
    }
}

/// Queues a fetch whenever the rows cache has not answered the current
/// query revision. Nothing to ask without a parent record id.
fn watch_revision(state_ctx: &mut StateCtx) {
    if state_ctx.state::<RelatedListQuery>().parent_id().is_none() {
        return;
    }
    let revision = state_ctx.state::<RelatedListQuery>().revision();
    let wants_fetch = state_ctx
        .cached::<RelatedListRows>()
        .is_some_and(|rows| rows.wants_fetch(revision));
    if wants_fetch {
        state_ctx.enqueue_command::<RefreshRelatedListCommand>();
    }
}

fn render_toolbar(state_ctx: &mut StateCtx, ui: &mut egui::Ui) {
    let is_loading = state_ctx
        .cached::<RelatedListRows>()
        .is_some_and(|rows| rows.is_loading());
    let is_saving = state_ctx
        .cached::<SaveRecords>()
        .is_some_and(|save| save.is_saving());
    let edited_rows = state_ctx.state::<RelatedListState>().buffer.edited_rows();

    ui.horizontal(|ui| {
        if ui.button("🔄 Refresh").clicked() {
            state_ctx.enqueue_command::<RefreshRelatedListCommand>();
        }
        let can_save = edited_rows > 0 && !is_saving;
        if ui.add_enabled(can_save, egui::Button::new("💾 Save")).clicked() {
            state_ctx.enqueue_command::<SaveRecordsCommand>();
        }
        if ui.add_enabled(edited_rows > 0, egui::Button::new("Discard")).clicked() {
            let state = state_ctx.state_mut::<RelatedListState>();
            state.buffer.clear();
            state.cancel_edit();
        }
        if edited_rows > 0 {
            ui.label(format!("{edited_rows} unsaved row(s)"));
        }
        if is_loading {
            ui.spinner();
            ui.label("Loading...");
        }
        if is_saving {
            ui.spinner();
            ui.label("Saving...");
        }
    });
    ui.separator();
}

fn render_table(
    state: &mut RelatedListState,
    columns: &[ColumnDescriptor],
    rows: &[OpportunityRow],
    ui: &mut egui::Ui,
) {
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for column in table_columns(columns) {
        builder = builder.column(column);
    }
    builder
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(columns, &mut header);
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let opportunity = &rows[row.index()];
                render_opportunity_row(state, columns, &mut row, opportunity);
            });
        });
}
