//! The editable related list: toolbar, status line, data table and the
//! observers that turn terminal fetch/save phases into toasts.

mod panel;
mod table;

pub use panel::related_list_panel;
