//! Save command + status cache for the related list's batched write-back.
//!
//! The terminal phases are one-shot: the panel observes `Saved` or `Failed`
//! once, reacts (toast, buffer clear, refetch), and resets the cache back to
//! idle synchronously in the same frame.

use std::any::Any;

use dealgrid_states::{
    CancellationToken, Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, Updater,
    assign_boxed,
};
use log::{debug, error, info};

use crate::config::BusinessConfig;
use crate::opportunity_api::update_opportunities;
use crate::related_list_state::RelatedListState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SavePhase {
    /// No save in progress or pending observation.
    #[default]
    Idle,
    /// Batched update in flight.
    Saving,
    /// Update accepted; awaiting the panel's buffer-clear and refetch.
    Saved,
    /// Update rejected with a user-visible message; the buffer stays intact.
    Failed { message: String },
}

/// Compute-shaped cache of the save status.
///
/// Its `compute()` is a deliberate no-op; updates come from
/// [`SaveRecordsCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveRecords {
    pub phase: SavePhase,
}

impl SaveRecords {
    pub fn is_saving(&self) -> bool {
        self.phase == SavePhase::Saving
    }

    pub fn failure_message(&self) -> Option<&str> {
        if let SavePhase::Failed { message } = &self.phase {
            Some(message)
        } else {
            None
        }
    }

    /// Back to idle after the panel consumed a terminal phase.
    pub fn reset(&mut self) {
        self.phase = SavePhase::Idle;
    }
}

impl Compute for SaveRecords {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        // A cache updated by a command; no derived dependencies.
        (Vec::new(), Vec::new())
    }

    fn compute(&self, _dep: Dep<'_>, _updater: Updater) {
        // Intentionally no-op. Side effects must not run inside a compute;
        // `SaveRecordsCommand` updates this cache instead.
    }

    fn assign_box(&mut self, value: Box<dyn Any + Send>) {
        assign_boxed(self, value);
    }
}

/// Manual-only command that sends one batched update built from the edit
/// buffer. An empty buffer is a no-op — the save control is disabled then,
/// and a race past it must not produce an empty write.
#[derive(Debug, Default)]
pub struct SaveRecordsCommand;

impl Command for SaveRecordsCommand {
    fn run(
        &self,
        snapshot: CommandSnapshot,
        updater: Updater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        let config = snapshot.state::<BusinessConfig>().clone();
        let patches = snapshot.state::<RelatedListState>().buffer.to_patches();

        Box::pin(async move {
            if patches.is_empty() {
                info!("SaveRecordsCommand: no drafts to save, skipping");
                return;
            }
            info!("SaveRecordsCommand: saving {} edited rows", patches.len());
            updater.set(SaveRecords {
                phase: SavePhase::Saving,
            });

            let request = update_opportunities(config.api_url().as_str(), patches);
            let result = tokio::select! {
                () = cancel.cancelled() => {
                    debug!("SaveRecordsCommand: superseded, dropping result");
                    return;
                }
                result = request => result,
            };

            match result {
                Ok(()) => {
                    info!("SaveRecordsCommand: batched update accepted");
                    updater.set(SaveRecords {
                        phase: SavePhase::Saved,
                    });
                }
                Err(err) => {
                    error!("SaveRecordsCommand: {err}");
                    updater.set(SaveRecords {
                        phase: SavePhase::Failed {
                            message: err.to_string(),
                        },
                    });
                }
            }
        })
    }
}
