//! Typed state container for egui applications.
//!
//! Three kinds of registrations live in a [`StateCtx`]:
//!
//! - [`State`]: plain data, read and mutated on the UI thread.
//! - [`Compute`]: derived values, re-run when a declared dependency changes.
//! - [`Command`]: async side-effecting work (network calls); results travel
//!   back over a channel and are applied at the start of a later frame.
//!
//! The owning application drives the context once per frame:
//! [`StateCtx::sync_computes`] first (apply queued async results), widgets in
//! between (read states, queue updates and commands), then
//! [`StateCtx::flush_commands`] and [`StateCtx::run_computed`] last.

mod basic_state;
mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod snapshot;
mod state;
mod state_sync_status;
mod task;
mod updater;

pub use basic_state::Time;
pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use snapshot::CommandSnapshot;
pub use state::{State, assign_boxed};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};
pub use updater::Updater;

pub use tokio_util::sync::CancellationToken;
