//! Inputs for the query parameters: parent account id and field list.

use dealgrid_business::{DEFAULT_FIELD_LIST, RelatedListQuery};
use dealgrid_states::StateCtx;
use ustr::Ustr;

/// Text buffers behind the query bar's inputs.
///
/// Owned by the app state so typing survives frames without touching
/// [`RelatedListQuery`]; the query only changes on focus loss.
#[derive(Debug, Default)]
pub struct QueryBarState {
    pub parent_id_input: String,
    pub field_list_input: String,
}

impl QueryBarState {
    pub fn from_query(query: &RelatedListQuery) -> Self {
        Self {
            parent_id_input: query
                .parent_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            field_list_input: query.field_list().to_owned(),
        }
    }
}

/// Renders both inputs and commits them into [`RelatedListQuery`] when an
/// input loses focus (Enter included). Committing an effective change bumps
/// the query revision, and the related-list panel refetches on mismatch.
pub fn query_bar(state_ctx: &mut StateCtx, bar: &mut QueryBarState, ui: &mut egui::Ui) {
    ui.label("Account");
    let parent_response = ui.add(
        egui::TextEdit::singleline(&mut bar.parent_id_input)
            .hint_text("account record id")
            .desired_width(150.0),
    );
    if parent_response.lost_focus() {
        let trimmed = bar.parent_id_input.trim();
        let parent_id = (!trimmed.is_empty()).then(|| Ustr::from(trimmed));
        if state_ctx.state::<RelatedListQuery>().parent_id() != parent_id {
            state_ctx.update::<RelatedListQuery>(|query| query.set_parent_id(parent_id));
        }
    }

    ui.label("Fields");
    let fields_response = ui.add(
        egui::TextEdit::singleline(&mut bar.field_list_input)
            .hint_text(DEFAULT_FIELD_LIST)
            .desired_width(260.0),
    );
    if fields_response.lost_focus() {
        // A blank field list falls back to the default rather than an
        // empty table.
        if bar.field_list_input.trim().is_empty() {
            bar.field_list_input = DEFAULT_FIELD_LIST.to_owned();
        }
        if state_ctx.state::<RelatedListQuery>().field_list() != bar.field_list_input {
            let field_list = bar.field_list_input.clone();
            state_ctx.update::<RelatedListQuery>(|query| query.set_field_list(field_list));
        }
    }
}
