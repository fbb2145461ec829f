//! The widgets used by the application.

mod env_version;
mod query_bar;
mod related_list;
mod toasts;

pub use env_version::env_version;
pub use query_bar::{QueryBarState, query_bar};
pub use related_list::related_list_panel;
pub use toasts::toast_overlay;
