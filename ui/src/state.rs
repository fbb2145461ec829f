use dealgrid_business::{
    BusinessConfig, ColumnsCompute, RefreshRelatedListCommand, RelatedListQuery, RelatedListRows,
    RelatedListState, SaveRecords, SaveRecordsCommand, ToastsState,
};
use dealgrid_states::{StateCtx, Time};
use ustr::Ustr;

use crate::widgets::QueryBarState;

/// Account record id used by test harnesses, so their mock servers can
/// mount the read endpoint under a known path.
pub const TEST_PARENT_ID: &str = "001xx000003DGbY";

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Text buffers behind the query bar's inputs.
    pub query_bar: QueryBarState,
}

impl Default for State {
    fn default() -> Self {
        Self::with_config(BusinessConfig::from_env())
    }
}

impl State {
    fn with_config(config: BusinessConfig) -> Self {
        let query = RelatedListQuery::from_config(&config);
        let query_bar = QueryBarState::from_query(&query);

        let mut ctx = StateCtx::new();
        ctx.add_state(Time::default());
        ctx.add_state(config);
        ctx.add_state(query);
        ctx.add_state(RelatedListState::default());
        ctx.add_state(ToastsState::default());
        ctx.record_compute(ColumnsCompute::default());
        ctx.record_compute(RelatedListRows::default());
        ctx.record_compute(SaveRecords::default());
        ctx.record_command(RefreshRelatedListCommand);
        ctx.record_command(SaveRecordsCommand);

        Self { ctx, query_bar }
    }

    pub fn test(base_url: String) -> Self {
        let mut config = BusinessConfig::new(base_url);
        config.parent_id = Some(Ustr::from(TEST_PARENT_ID));
        Self::with_config(config)
    }
}
