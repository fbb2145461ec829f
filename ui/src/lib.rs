//! egui frontend for the DealGrid related-list application.
#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod state;
pub mod widgets;

pub use app::DealGridApp;
