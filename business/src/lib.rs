mod columns;
mod columns_compute;
mod config;
mod fetch_rows_compute;
pub mod http;
mod opportunity_api;
mod query;
mod records;
mod related_list_state;
mod save_records_compute;
mod toasts;

pub use columns::{
    ColumnDescriptor, ColumnKind, STAGE_PLACEHOLDER, build_columns, format_label, parse_field_list,
};
pub use columns_compute::ColumnsCompute;
pub use config::{BusinessConfig, DEFAULT_FIELD_LIST};
pub use fetch_rows_compute::{FetchPhase, RefreshRelatedListCommand, RelatedListRows};
pub use opportunity_api::{ApiError, fetch_related_opportunities, update_opportunities};
pub use query::RelatedListQuery;
pub use records::{
    OpportunityRecord, OpportunityRow, RecordPatch, RelatedListResponse, StageOption,
    UpdateRequest, format_currency, format_date,
};
pub use related_list_state::{ActiveEditor, EditBuffer, RelatedListState};
pub use save_records_compute::{SavePhase, SaveRecords, SaveRecordsCommand};
pub use toasts::{TOAST_TTL_SECONDS, Toast, ToastLevel, ToastsState};
